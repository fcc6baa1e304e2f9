//! Image comparison operations
//!
//! - Pixel equality checks, with or without alpha
//! - Pixel difference counting
//! - Counting pixels with a given value

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
}

impl Pix {
    /// Count the number of pixels that differ between two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        if !self.sizes_equal(other) {
            return Err(Error::InvalidParameter(format!(
                "size mismatch: {}x{} vs {}x{}",
                self.width(),
                self.height(),
                other.width(),
                other.height()
            )));
        }
        if self.depth() != other.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                other.depth().bits(),
            ));
        }

        let n_diff = self
            .data()
            .iter()
            .zip(other.data())
            .filter(|(a, b)| a != b)
            .count() as u64;
        let total = self.data().len() as f64;

        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total,
        })
    }

    /// Check if two images are exactly equal.
    ///
    /// Size, depth and every pixel word must match.
    pub fn equals(&self, other: &Pix) -> bool {
        self.equals_with_alpha(other, true)
    }

    /// Check if two images are equal, with optional alpha comparison.
    ///
    /// With `compare_alpha` false, the low byte of 32 bpp pixels is
    /// ignored. 8 bpp images always compare the whole sample.
    pub fn equals_with_alpha(&self, other: &Pix, compare_alpha: bool) -> bool {
        if !self.sizes_equal(other) || self.depth() != other.depth() {
            return false;
        }
        let mask = match self.depth() {
            PixelDepth::Bit32 if !compare_alpha => 0xffff_ff00,
            _ => u32::MAX,
        };
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| (a ^ b) & mask == 0)
    }

    /// Count the pixels whose value is exactly `val`.
    pub fn count_value(&self, val: u32) -> u64 {
        self.data().iter().filter(|&&w| w == val).count() as u64
    }
}
