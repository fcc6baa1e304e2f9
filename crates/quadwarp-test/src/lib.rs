//! quadwarp-test - Regression test framework for quadwarp
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use quadwarp_test::RegParams;
//!
//! let mut rp = RegParams::new("projective");
//! rp.compare_values(1.0, h[0], 1e-9);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use quadwarp_core::{Pix, PixMut, PixelDepth};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // quadwarp-test is at crates/quadwarp-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build an image filled with `bg` holding an axis-aligned square of `fg`.
///
/// The square covers `[x, x + size) x [y, y + size)`, clipped to the image.
pub fn square_on_background(
    width: u32,
    height: u32,
    depth: PixelDepth,
    bg: u32,
    fg: u32,
    (x, y): (u32, u32),
    size: u32,
) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, depth)?;
    pm.set_all(bg);
    pm.fill_rect(x, y, size, size, fg);
    Ok(pm.into())
}

/// Build an 8 bpp diagonal gradient, `(x + y) % 256`.
pub fn gradient_gray(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, (x + y) % 256);
        }
    }
    Ok(pm.into())
}

/// Build a 32 bpp image whose every pixel is distinct, `(x << 16) | y`.
///
/// Useful for checking that samples are moved verbatim.
pub fn coordinate_pattern(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, (x << 16) | y);
        }
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_on_background() {
        let pix = square_on_background(10, 8, PixelDepth::Bit8, 0, 200, (2, 3), 4).unwrap();
        assert_eq!(pix.get_pixel(1, 3), Some(0));
        assert_eq!(pix.get_pixel(2, 3), Some(200));
        assert_eq!(pix.get_pixel(5, 6), Some(200));
        assert_eq!(pix.get_pixel(6, 6), Some(0));
        assert_eq!(pix.count_value(200), 16);
    }

    #[test]
    fn test_patterns() {
        let g = gradient_gray(300, 2).unwrap();
        assert_eq!(g.get_pixel(299, 1), Some(300 % 256));

        let c = coordinate_pattern(3, 4).unwrap();
        assert_eq!(c.get_pixel(2, 3), Some((2 << 16) | 3));
        assert_eq!(c.depth(), PixelDepth::Bit32);
    }
}
