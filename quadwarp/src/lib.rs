//! quadwarp - Four-point homography and perspective warping for Rust
//!
//! # Overview
//!
//! - Dense linear algebra: LU decomposition with partial pivoting and a
//!   solver for arbitrary right-hand sides
//! - Homography estimation from 4 point correspondences
//! - Perspective warp of 8 bpp and 32 bpp images (forward or inverse
//!   mapping)
//! - Image I/O (PNG, binary PNM)
//!
//! # Example
//!
//! ```
//! use quadwarp::transform::{Point, ProjectiveCoeffs, WarpOptions, warp_perspective};
//! use quadwarp::{Pix, PixelDepth};
//!
//! let pix = Pix::new_filled(64, 64, PixelDepth::Bit8, 128).unwrap();
//! let src = [
//!     Point::new(0.0, 0.0),
//!     Point::new(63.0, 0.0),
//!     Point::new(0.0, 63.0),
//!     Point::new(63.0, 63.0),
//! ];
//! let dst = [
//!     Point::new(8.0, 4.0),
//!     Point::new(56.0, 0.0),
//!     Point::new(0.0, 63.0),
//!     Point::new(63.0, 60.0),
//! ];
//! let h = ProjectiveCoeffs::from_four_points(src, dst).unwrap();
//! let out = warp_perspective(&pix, &h, (64, 64), &WarpOptions::default()).unwrap();
//! assert_eq!(out.get_pixel(0, 63), Some(128));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use quadwarp_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadwarp_io as io;
pub use quadwarp_transform as transform;
