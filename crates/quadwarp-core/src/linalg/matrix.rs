//! Dense row-major matrix

use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Dense `rows × cols` matrix of `f64`, stored row-major.
///
/// # Examples
///
/// ```
/// use quadwarp_core::Matrix;
///
/// let mut m = Matrix::new(2, 2).unwrap();
/// m[(0, 1)] = 3.0;
/// let copy = m.duplicate();
/// assert_eq!(copy[(0, 1)], 3.0);
/// assert_eq!(copy[(1, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatrixSize`] if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidMatrixSize { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Create the `n × n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Create a matrix from fixed-width rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatrixSize`] if `rows` is empty or `N` is 0.
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Result<Self> {
        let mut m = Self::new(rows.len(), N)?;
        for (dst, src) in m.data.chunks_exact_mut(N).zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(m)
    }

    /// Return an independent deep copy of this matrix.
    pub fn duplicate(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.clone(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Get the entry at (`row`, `col`), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set the entry at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when out of range.
    pub fn set(&mut self, row: usize, col: usize, val: f64) -> Result<()> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                len: self.cols,
            });
        }
        self.data[row * self.cols + col] = val;
        Ok(())
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Mutably borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Swap two rows in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * self.cols);
        head[lo * self.cols..(lo + 1) * self.cols].swap_with_slice(&mut tail[..self.cols]);
    }

    /// Matrix-vector product `self · v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `v.len() != cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols {
            return Err(Error::LengthMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }
        Ok((0..self.rows)
            .map(|r| self.row(r).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the inner dimensions differ.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::LengthMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }
        let mut out = Matrix::new(self.rows, other.cols)?;
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    out[(i, j)] += a * other[(k, j)];
                }
            }
        }
        Ok(out)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(col < self.cols, "column {col} out of range {}", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(col < self.cols, "column {col} out of range {}", self.cols);
        &mut self.data[row * self.cols + col]
    }
}
