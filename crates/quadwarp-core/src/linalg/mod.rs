//! Dense linear algebra
//!
//! Small dense matrices and an LU-based solver, sized for the 8×8
//! systems produced by four-point homography fitting.
//!
//! - [`Matrix`] - zero-filled creation, deep duplication, element access
//! - [`LuDecomposition`] - Gaussian elimination with partial pivoting,
//!   stored in compact form (unit-lower L and U share one matrix)
//! - [`solve`] - factor and solve `A·x = b` in one call

pub mod lu;
pub mod matrix;

pub use lu::{LuDecomposition, decompose};
pub use matrix::Matrix;

use crate::error::Result;

/// Solve `A·x = b` for a square matrix `A`.
///
/// Equivalent to [`decompose`] followed by [`LuDecomposition::solve`].
///
/// # Errors
///
/// Returns [`Error::SingularMatrix`](crate::Error::SingularMatrix) if `A`
/// has no LU factorization with nonzero pivots, and
/// [`Error::LengthMismatch`](crate::Error::LengthMismatch) if `b` does
/// not have one entry per row.
pub fn solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    decompose(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_3x3() {
        // x = 1, y = -2, z = 3
        let a = Matrix::from_rows(&[[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]])
            .unwrap();
        let b = [-3.0, 5.0, 2.0];
        let x = solve(&a, &b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] + 2.0).abs() < 1e-12);
        assert!((x[2] - 3.0).abs() < 1e-12);
    }
}
