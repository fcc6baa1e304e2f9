//! quadwarp-transform - Four-point homography and perspective warp
//!
//! This crate provides:
//!
//! - [`ProjectiveCoeffs`] - Homography from 4 point correspondences,
//!   point projection and inversion
//! - [`warp_perspective`] - Perspective warp of a [`Pix`](quadwarp_core::Pix)
//!   by forward or inverse mapping
//!
//! # Examples
//!
//! ```
//! use quadwarp_core::{Pix, PixelDepth};
//! use quadwarp_transform::{Point, WarpOptions, warp_perspective_pta};
//!
//! let pix = Pix::new_filled(100, 100, PixelDepth::Bit8, 255).unwrap();
//! let src = [
//!     Point::new(0.0, 0.0),
//!     Point::new(99.0, 0.0),
//!     Point::new(0.0, 99.0),
//!     Point::new(99.0, 99.0),
//! ];
//! let dst = [
//!     Point::new(10.0, 5.0),
//!     Point::new(90.0, 0.0),
//!     Point::new(0.0, 99.0),
//!     Point::new(99.0, 95.0),
//! ];
//! let out = warp_perspective_pta(&pix, src, dst, (100, 100), &WarpOptions::default()).unwrap();
//! assert_eq!(out.width(), 100);
//! ```

mod error;
mod point;
pub mod projective;
pub mod warp;

pub use error::{TransformError, TransformResult};
pub use point::Point;
pub use projective::ProjectiveCoeffs;
pub use warp::{
    WarpFill, WarpMethod, WarpOptions, warp_perspective, warp_perspective_into,
    warp_perspective_pta, warp_points,
};
