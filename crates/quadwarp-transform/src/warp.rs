//! Perspective warp of an image by a homography
//!
//! Two sampling strategies are provided:
//!
//! - [`WarpMethod::Forward`] pushes every source pixel through H and
//!   writes it at the rounded destination location. Source pixels are
//!   visited row by row (y outer, x inner) and a later write overwrites an
//!   earlier one, so the output is fully determined by the scan order.
//!   Destination pixels that no source pixel lands on keep the
//!   background, which leaves holes when the mapping magnifies.
//! - [`WarpMethod::Inverse`] pulls every destination pixel back through
//!   H⁻¹ and copies the nearest source pixel, covering the destination
//!   without holes.
//!
//! Samples are copied verbatim; there is no interpolation or blending.
//! Locations that project outside the target, or to infinity, are skipped.

use crate::{Point, ProjectiveCoeffs, TransformResult};
use quadwarp_core::{Error, Pix, PixMut, PixelDepth};

/// Sampling strategy for [`warp_perspective`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarpMethod {
    /// Map each source pixel into the destination
    #[default]
    Forward,
    /// Map each destination pixel back into the source
    Inverse,
}

/// Background fill for destination pixels no sample reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarpFill {
    /// Fill with black pixels
    #[default]
    Black,
    /// Fill with white pixels
    White,
    /// Fill with a specific pixel value
    Color(u32),
}

impl WarpFill {
    /// Get the fill value for a specific pixel depth
    pub fn to_value(self, depth: PixelDepth) -> u32 {
        match self {
            WarpFill::Black => 0,
            WarpFill::White => match depth {
                PixelDepth::Bit8 => 255,
                PixelDepth::Bit32 => 0xFFFFFF00,
            },
            WarpFill::Color(val) => val,
        }
    }
}

/// Options for perspective warping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarpOptions {
    /// Sampling strategy
    pub method: WarpMethod,
    /// Background fill
    pub fill: WarpFill,
}

impl WarpOptions {
    /// Create options with a specific method
    pub fn with_method(method: WarpMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Create options with a specific fill
    pub fn with_fill(fill: WarpFill) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    /// Set the sampling strategy
    pub fn method(mut self, method: WarpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the background fill
    pub fn fill(mut self, fill: WarpFill) -> Self {
        self.fill = fill;
        self
    }
}

#[derive(Debug, Default)]
struct WarpStats {
    written: usize,
    outside: usize,
    at_infinity: usize,
}

/// Warp an image into a new `width x height` canvas.
///
/// The canvas has the depth of `pix` and starts filled with
/// `options.fill`.
///
/// # Errors
///
/// - [`Error::InvalidDimension`] (as `TransformError::Core`) if the
///   destination size has a zero side
/// - [`TransformError::SingularMatrix`](crate::TransformError::SingularMatrix)
///   for inverse mapping when H is not invertible
///
/// # Examples
///
/// ```
/// use quadwarp_core::{Pix, PixelDepth};
/// use quadwarp_transform::{ProjectiveCoeffs, WarpOptions, warp_perspective};
///
/// let pix = Pix::new_filled(4, 4, PixelDepth::Bit8, 200).unwrap();
/// let shift = ProjectiveCoeffs::from_coeffs([1.0, 0.0, 2.0, 0.0, 1.0, 2.0, 0.0, 0.0]);
/// let out = warp_perspective(&pix, &shift, (6, 6), &WarpOptions::default()).unwrap();
/// assert_eq!(out.get_pixel(1, 1), Some(0));
/// assert_eq!(out.get_pixel(2, 2), Some(200));
/// ```
pub fn warp_perspective(
    pix: &Pix,
    coeffs: &ProjectiveCoeffs,
    (width, height): (u32, u32),
    options: &WarpOptions,
) -> TransformResult<Pix> {
    let mut out = PixMut::new(width, height, pix.depth())?;
    out.set_spp(pix.spp());
    out.set_all(options.fill.to_value(pix.depth()));
    warp_perspective_into(pix, coeffs, &mut out, options.method)?;
    Ok(out.into())
}

/// Compute the homography from 4 correspondences, then warp.
///
/// # Arguments
/// * `pix` - Input image
/// * `src_pts` - 4 source points
/// * `dst_pts` - 4 destination points
/// * `size` - Destination width and height
/// * `options` - Sampling strategy and background fill
pub fn warp_perspective_pta(
    pix: &Pix,
    src_pts: [Point; 4],
    dst_pts: [Point; 4],
    size: (u32, u32),
    options: &WarpOptions,
) -> TransformResult<Pix> {
    let coeffs = ProjectiveCoeffs::from_four_points(src_pts, dst_pts)?;
    warp_perspective(pix, &coeffs, size, options)
}

/// Warp into an existing canvas, keeping whatever it already holds where
/// no sample lands.
///
/// # Errors
///
/// Returns [`Error::IncompatibleDepths`] (as `TransformError::Core`) if the
/// canvas depth differs from the source depth.
pub fn warp_perspective_into(
    pix: &Pix,
    coeffs: &ProjectiveCoeffs,
    dst: &mut PixMut,
    method: WarpMethod,
) -> TransformResult<()> {
    if pix.depth() != dst.depth() {
        return Err(Error::IncompatibleDepths(pix.depth().bits(), dst.depth().bits()).into());
    }

    let stats = match method {
        WarpMethod::Forward => warp_forward(pix, coeffs, dst),
        WarpMethod::Inverse => warp_inverse(pix, &coeffs.inverse()?, dst),
    };

    tracing::trace!(
        ?method,
        written = stats.written,
        outside = stats.outside,
        at_infinity = stats.at_infinity,
        "perspective warp {}x{} -> {}x{}",
        pix.width(),
        pix.height(),
        dst.width(),
        dst.height()
    );
    Ok(())
}

/// Project a batch of points, `None` for each point that maps to infinity.
pub fn warp_points(coeffs: &ProjectiveCoeffs, pts: &[Point]) -> Vec<Option<Point>> {
    pts.iter().map(|&p| coeffs.transform_point(p)).collect()
}

/// Round `(x, y)` and return its index in a `width x height` grid.
#[inline]
fn grid_index(x: f64, y: f64, width: u32, height: u32) -> Option<(u32, u32)> {
    let (x, y) = (x.round(), y.round());
    // NaN fails every comparison and is rejected here too
    if x >= 0.0 && x < width as f64 && y >= 0.0 && y < height as f64 {
        Some((x as u32, y as u32))
    } else {
        None
    }
}

fn warp_forward(pix: &Pix, coeffs: &ProjectiveCoeffs, dst: &mut PixMut) -> WarpStats {
    let mut stats = WarpStats::default();
    let (dw, dh) = (dst.width(), dst.height());

    for y in 0..pix.height() {
        for (x, &val) in pix.row_data(y).iter().enumerate() {
            let Some((px, py)) = coeffs.project(x as f64, y as f64) else {
                stats.at_infinity += 1;
                continue;
            };
            match grid_index(px, py, dw, dh) {
                Some((dx, dy)) => {
                    dst.set_pixel_unchecked(dx, dy, val);
                    stats.written += 1;
                }
                None => stats.outside += 1,
            }
        }
    }

    stats
}

fn warp_inverse(pix: &Pix, inverse: &ProjectiveCoeffs, dst: &mut PixMut) -> WarpStats {
    let mut stats = WarpStats::default();
    let (sw, sh) = (pix.width(), pix.height());

    for y in 0..dst.height() {
        for (x, slot) in dst.row_data_mut(y).iter_mut().enumerate() {
            let Some((px, py)) = inverse.project(x as f64, y as f64) else {
                stats.at_infinity += 1;
                continue;
            };
            match grid_index(px, py, sw, sh) {
                Some((sx, sy)) => {
                    *slot = pix.get_pixel_unchecked(sx, sy);
                    stats.written += 1;
                }
                None => stats.outside += 1,
            }
        }
    }

    stats
}
