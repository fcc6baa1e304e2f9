//! LU decomposition with partial pivoting
//!
//! The factorization is stored in compact form: the strictly lower part
//! of [`LuDecomposition::lu`] holds the multipliers of the unit-lower
//! factor L (its unit diagonal is implied), the upper part including the
//! diagonal holds U. Together with the permutation they satisfy
//! `P·A = L·U`, where row `i` of `P·A` is row `permutation()[i]` of `A`.
//!
//! A pivot is treated as zero when its magnitude does not exceed
//! `n · ε · max|A|`. Singular systems are reported as
//! [`Error::SingularMatrix`] instead of being factored with a zero pivot.

use super::Matrix;
use crate::error::{Error, Result};

/// Compact LU factors of a square matrix plus the row permutation.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: Matrix,
    perm: Vec<usize>,
    swaps: usize,
}

/// Factor `matrix` as `P·A = L·U`.
///
/// Shorthand for [`LuDecomposition::new`].
pub fn decompose(matrix: &Matrix) -> Result<LuDecomposition> {
    LuDecomposition::new(matrix)
}

fn pivot_tolerance(matrix: &Matrix) -> f64 {
    matrix.rows() as f64 * f64::EPSILON * matrix.max_abs()
}

impl LuDecomposition {
    /// Factor a square matrix with Gaussian elimination and partial pivoting.
    ///
    /// For each column the row with the largest magnitude at or below the
    /// diagonal becomes the pivot row (the first one on ties). The
    /// multiplier of every eliminated entry is stored in its place.
    ///
    /// # Errors
    ///
    /// - [`Error::NotSquare`] if the matrix is not square
    /// - [`Error::NonFinite`] if any entry is NaN or infinite
    /// - [`Error::SingularMatrix`] if a column has no usable pivot
    pub fn new(matrix: &Matrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(Error::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        if !matrix.is_finite() {
            return Err(Error::NonFinite("matrix"));
        }

        let n = matrix.rows();
        let tol = pivot_tolerance(matrix);
        let mut lu = matrix.duplicate();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for j in 0..n - 1 {
            let mut p_row = j;
            let mut col_max = lu[(j, j)].abs();
            for i in j + 1..n {
                let v = lu[(i, j)].abs();
                if v > col_max {
                    col_max = v;
                    p_row = i;
                }
            }

            if p_row != j {
                lu.swap_rows(j, p_row);
                perm.swap(j, p_row);
                swaps += 1;
            }

            // The largest candidate is zero only if the whole sub-column is,
            // so no other row can be swapped in.
            if col_max <= tol {
                tracing::debug!("lu: no pivot in column {} (max |a| = {:e})", j, col_max);
                return Err(Error::SingularMatrix { column: j });
            }

            let pivot = lu[(j, j)];
            for i in j + 1..n {
                let m = lu[(i, j)] / pivot;
                lu[(i, j)] = m;
                if m == 0.0 {
                    continue;
                }
                for k in j + 1..n {
                    let u = lu[(j, k)];
                    lu[(i, k)] -= m * u;
                }
            }
        }

        if lu[(n - 1, n - 1)].abs() <= tol {
            tracing::debug!("lu: zero pivot in last column {}", n - 1);
            return Err(Error::SingularMatrix { column: n - 1 });
        }

        Ok(Self { lu, perm, swaps })
    }

    /// Order of the factored matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.lu.rows()
    }

    /// The compact L/U storage.
    #[inline]
    pub fn lu(&self) -> &Matrix {
        &self.lu
    }

    /// Row permutation: entry `i` is the original row now at position `i`.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Expand the unit-lower factor L.
    pub fn lower(&self) -> Matrix {
        let n = self.size();
        let mut l = self.lu.duplicate();
        for i in 0..n {
            l[(i, i)] = 1.0;
            for j in i + 1..n {
                l[(i, j)] = 0.0;
            }
        }
        l
    }

    /// Expand the upper factor U.
    pub fn upper(&self) -> Matrix {
        let n = self.size();
        let mut u = self.lu.duplicate();
        for i in 1..n {
            for j in 0..i {
                u[(i, j)] = 0.0;
            }
        }
        u
    }

    /// Determinant of the original matrix.
    pub fn determinant(&self) -> f64 {
        let diag: f64 = (0..self.size()).map(|i| self.lu[(i, i)]).product();
        if self.swaps % 2 == 0 { diag } else { -diag }
    }

    /// Solve `A·x = b`.
    ///
    /// Applies the pivot permutation to `b`, then forward substitution with
    /// the unit-lower factor and back substitution with the upper factor.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if `b.len()` differs from the matrix order
    /// - [`Error::NonFinite`] if `b` or the solution contains NaN/infinity
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.size();
        if b.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                actual: b.len(),
            });
        }
        if b.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFinite("right-hand side"));
        }

        let mut x: Vec<f64> = self.perm.iter().map(|&p| b[p]).collect();

        for k in 1..n {
            let row = self.lu.row(k);
            let sum: f64 = row[..k].iter().zip(&x[..k]).map(|(l, xv)| l * xv).sum();
            x[k] -= sum;
        }

        for k in (0..n).rev() {
            let row = self.lu.row(k);
            let sum: f64 = row[k + 1..]
                .iter()
                .zip(&x[k + 1..])
                .map(|(u, xv)| u * xv)
                .sum();
            x[k] = (x[k] - sum) / row[k];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFinite("solution"));
        }
        Ok(x)
    }

    /// Solve against several right-hand sides with one factorization.
    pub fn solve_many<B: AsRef<[f64]>>(&self, rhs: &[B]) -> Result<Vec<Vec<f64>>> {
        rhs.iter().map(|b| self.solve(b.as_ref())).collect()
    }

    /// Inverse of the original matrix.
    ///
    /// Solves for every canonical basis vector and stores each solution
    /// as a column of the result.
    pub fn inverse(&self) -> Result<Matrix> {
        let n = self.size();
        let mut inv = Matrix::new(n, n)?;
        let mut e = vec![0.0; n];
        for i in 0..n {
            e[i] = 1.0;
            let col = self.solve(&e)?;
            e[i] = 0.0;
            for (r, v) in col.into_iter().enumerate() {
                inv[(r, i)] = v;
            }
        }
        Ok(inv)
    }
}
