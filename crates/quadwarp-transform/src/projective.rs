//! Projective transformation coefficients
//!
//! A homography maps homogeneous 2D coordinates from one plane to another.
//! With the bottom-right entry fixed at 1 it has 8 free parameters, which
//! are fully determined by 4 point correspondences:
//!
//! ```text
//! x' = (h0*x + h1*y + h2) / (h6*x + h7*y + 1)
//! y' = (h3*x + h4*y + h5) / (h6*x + h7*y + 1)
//! ```
//!
//! Each correspondence `(sx, sy) -> (dx, dy)` contributes two rows to an
//! 8x8 linear system, which is factored and solved directly against the
//! destination coordinates.
//!
//! Fixing the last entry at 1 excludes homographies whose [2][2] entry
//! would have to be 0.

use crate::{Point, TransformError, TransformResult};
use quadwarp_core::{Matrix, linalg};

/// Projective transformation coefficients (8 values)
///
/// The full matrix is
/// ```text
/// | h0 h1 h2 |
/// | h3 h4 h5 |
/// | h6 h7 1  |
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectiveCoeffs {
    /// Coefficients [h0, h1, h2, h3, h4, h5, h6, h7]
    coeffs: [f64; 8],
}

impl Default for ProjectiveCoeffs {
    fn default() -> Self {
        Self::identity()
    }
}

impl ProjectiveCoeffs {
    /// The identity mapping.
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Wrap 8 precomputed coefficients.
    pub fn from_coeffs(coeffs: [f64; 8]) -> Self {
        Self { coeffs }
    }

    /// Compute the homography taking each `src[i]` to `dst[i]`.
    ///
    /// # Errors
    ///
    /// - [`TransformError::InvalidParameters`] if a coordinate is NaN or infinite
    /// - [`TransformError::SingularMatrix`] if the points are degenerate
    ///   (three or more collinear, or repeated)
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_transform::{Point, ProjectiveCoeffs};
    ///
    /// let src = [
    ///     Point::new(0.0, 0.0),
    ///     Point::new(99.0, 0.0),
    ///     Point::new(0.0, 99.0),
    ///     Point::new(99.0, 99.0),
    /// ];
    /// let dst = src.map(|p| Point::new(p.x + 10.0, p.y + 10.0));
    /// let h = ProjectiveCoeffs::from_four_points(src, dst).unwrap();
    /// assert!((h.coeffs()[2] - 10.0).abs() < 1e-9);
    /// ```
    pub fn from_four_points(src: [Point; 4], dst: [Point; 4]) -> TransformResult<Self> {
        if let Some(p) = src.iter().chain(&dst).find(|p| !p.is_finite()) {
            return Err(TransformError::InvalidParameters(format!(
                "non-finite control point ({}, {})",
                p.x, p.y
            )));
        }

        let mut a = Matrix::new(8, 8)?;
        let mut b = [0.0; 8];
        for (i, (s, d)) in src.iter().zip(&dst).enumerate() {
            let (sx, sy) = (s.x as f64, s.y as f64);
            let (dx, dy) = (d.x as f64, d.y as f64);

            a.row_mut(2 * i)
                .copy_from_slice(&[sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy]);
            a.row_mut(2 * i + 1)
                .copy_from_slice(&[0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy]);
            b[2 * i] = dx;
            b[2 * i + 1] = dy;
        }

        let h = linalg::solve(&a, &b).map_err(TransformError::from_solve)?;
        let mut coeffs = [0.0; 8];
        coeffs.copy_from_slice(&h);

        tracing::debug!("homography from four points: {:?}", coeffs);
        Ok(Self { coeffs })
    }

    /// Like [`from_four_points`](Self::from_four_points), for point slices.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::DegenerateCorrespondence`] unless both
    /// slices hold exactly 4 points.
    pub fn from_point_slices(src: &[Point], dst: &[Point]) -> TransformResult<Self> {
        let (Ok(src), Ok(dst)) = (<[Point; 4]>::try_from(src), <[Point; 4]>::try_from(dst)) else {
            return Err(TransformError::DegenerateCorrespondence(format!(
                "need exactly 4 source and 4 destination points, got {} and {}",
                src.len(),
                dst.len()
            )));
        };
        Self::from_four_points(src, dst)
    }

    /// Get the coefficients [h0..h7].
    pub fn coeffs(&self) -> &[f64; 8] {
        &self.coeffs
    }

    /// The full 3x3 matrix, row-major, with the [2][2] entry equal to 1.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        let c = &self.coeffs;
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], 1.0]]
    }

    /// Project `(x, y)`, returning `None` when w is 0.
    #[inline]
    pub(crate) fn project(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let c = &self.coeffs;
        let w = c[6] * x + c[7] * y + 1.0;
        if w == 0.0 {
            return None;
        }
        let u = c[0] * x + c[1] * y + c[2];
        let v = c[3] * x + c[4] * y + c[5];
        Some((u / w, v / w))
    }

    /// Project a point.
    ///
    /// Returns `None` when the point maps to infinity (w = 0).
    pub fn transform_point(&self, pt: Point) -> Option<Point> {
        self.project(pt.x as f64, pt.y as f64)
            .map(|(x, y)| Point::new(x as f32, y as f32))
    }

    /// Project an integer pixel location, rounding to the nearest pixel.
    ///
    /// Returns `None` when the point maps to infinity or outside the `i32`
    /// range.
    pub fn transform_point_sampled(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (px, py) = self.project(x as f64, y as f64)?;
        let (rx, ry) = (px.round(), py.round());
        let range = i32::MIN as f64..=i32::MAX as f64;
        if range.contains(&rx) && range.contains(&ry) {
            Some((rx as i32, ry as i32))
        } else {
            None
        }
    }

    /// Compute the inverse mapping.
    ///
    /// The result is renormalized so that its [2][2] entry is 1.
    ///
    /// # Errors
    ///
    /// - [`TransformError::SingularMatrix`] if the matrix is not invertible
    /// - [`TransformError::InvalidParameters`] if the inverse has a zero
    ///   [2][2] entry and so cannot be normalized
    pub fn inverse(&self) -> TransformResult<Self> {
        let m = Matrix::from_rows(&self.to_matrix())?;
        let inv = linalg::decompose(&m)
            .and_then(|lu| lu.inverse())
            .map_err(TransformError::from_solve)?;

        let scale = inv[(2, 2)];
        if scale.abs() <= f64::EPSILON * inv.max_abs() {
            return Err(TransformError::InvalidParameters(
                "inverse homography has a zero [2][2] entry".to_string(),
            ));
        }

        let mut coeffs = [0.0; 8];
        for (k, c) in coeffs.iter_mut().enumerate() {
            *c = inv[(k / 3, k % 3)] / scale;
        }
        Ok(Self { coeffs })
    }
}
