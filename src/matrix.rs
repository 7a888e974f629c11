//! Dense matrix algebra over GF(2^8)
//!
//! Matrices are stored as a single flat, row-major `Vec<u8>` with strided
//! indexing rather than a `Vec<Vec<u8>>` of rows, matching the layout this
//! codebase already uses for its Galois-field matrices, since a flat buffer
//! avoids one allocation per row and keeps rows contiguous for the coding
//! loop kernels.

use crate::error::{Error, Result};
use crate::galois;

/// A dense `rows x cols` matrix over GF(2^8), stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix of zeros.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0u8; rows * cols],
        }
    }

    /// Builds a matrix from a slice of equal-length rows.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(Error::ShapeMismatch {
                reason: "from_rows: rows have differing lengths".to_string(),
            });
        }
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Builds the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Builds the Vandermonde matrix with `v[r][c] = galois::exp(r, c)`.
    pub fn vandermonde(rows: usize, cols: usize) -> Self {
        let mut m = Self::zero(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                m.set_unchecked(r, c, galois::exp(r as u8, c as u32));
            }
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Reads the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        self.check_bounds(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Writes `value` at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        self.check_bounds(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    #[inline]
    fn set_unchecked(&mut self, row: usize, col: usize, value: u8) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns row `r` as a byte slice.
    pub fn row(&self, r: usize) -> Result<&[u8]> {
        if r >= self.rows {
            return Err(Error::IndexOutOfRange {
                row: r,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// Returns an owned copy of row `r`.
    pub fn row_copy(&self, r: usize) -> Result<Vec<u8>> {
        self.row(r).map(|s| s.to_vec())
    }

    /// Swaps rows `r1` and `r2` in place.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        if r1 >= self.rows || r2 >= self.rows {
            return Err(Error::IndexOutOfRange {
                row: r1.max(r2),
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if r1 == r2 {
            return Ok(());
        }
        let cols = self.cols;
        let (lo, hi) = if r1 < r2 { (r1, r2) } else { (r2, r1) };
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..(lo + 1) * cols].swap_with_slice(&mut tail[..cols]);
        Ok(())
    }

    /// Matrix product over GF(2^8): addition is XOR, multiplication uses
    /// the Galois field table.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::ShapeMismatch {
                reason: format!(
                    "multiply: {}x{} times {}x{}",
                    self.rows, self.cols, other.rows, other.cols
                ),
            });
        }
        let mut result = Matrix::zero(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = 0u8;
                for k in 0..self.cols {
                    acc ^= galois::multiply(self.data[r * self.cols + k], other.data[k * other.cols + c]);
                }
                result.set_unchecked(r, c, acc);
            }
        }
        Ok(result)
    }

    /// Horizontal concatenation `[self | right]`. Fails if row counts differ.
    pub fn augment(&self, right: &Matrix) -> Result<Matrix> {
        if self.rows != right.rows {
            return Err(Error::ShapeMismatch {
                reason: format!(
                    "augment: {} rows vs {} rows",
                    self.rows, right.rows
                ),
            });
        }
        let mut result = Matrix::zero(self.rows, self.cols + right.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                result.set_unchecked(r, c, self.data[r * self.cols + c]);
            }
            for c in 0..right.cols {
                result.set_unchecked(r, self.cols + c, right.data[r * right.cols + c]);
            }
        }
        Ok(result)
    }

    /// Extracts the half-open submatrix `[rmin, rmax) x [cmin, cmax)`.
    pub fn submatrix(&self, rmin: usize, cmin: usize, rmax: usize, cmax: usize) -> Result<Matrix> {
        if rmax > self.rows || cmax > self.cols || rmin > rmax || cmin > cmax {
            return Err(Error::IndexOutOfRange {
                row: rmax,
                col: cmax,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut result = Matrix::zero(rmax - rmin, cmax - cmin);
        for r in rmin..rmax {
            for c in cmin..cmax {
                result.set_unchecked(r - rmin, c - cmin, self.data[r * self.cols + c]);
            }
        }
        Ok(result)
    }

    /// Inverts a square matrix via Gauss-Jordan elimination over GF(2^8).
    ///
    /// Fails with [`Error::Singular`] if no nonzero pivot can be found for
    /// some column.
    pub fn invert(&self) -> Result<Matrix> {
        if self.rows != self.cols {
            return Err(Error::ShapeMismatch {
                reason: format!("invert: matrix is {}x{}, not square", self.rows, self.cols),
            });
        }
        let n = self.rows;
        let identity = Matrix::identity(n);
        let mut work = self.augment(&identity)?;
        let width = work.cols;

        for pivot in 0..n {
            if work.data[pivot * width + pivot] == 0 {
                let swap_with = (pivot + 1..n).find(|&r| work.data[r * width + pivot] != 0);
                match swap_with {
                    Some(r) => work.swap_rows(pivot, r)?,
                    None => return Err(Error::Singular { column: pivot }),
                }
            }

            let pivot_val = work.data[pivot * width + pivot];
            if pivot_val != 1 {
                let inv = galois::divide(1, pivot_val)?;
                for c in 0..width {
                    let v = work.data[pivot * width + c];
                    work.data[pivot * width + c] = galois::multiply(v, inv);
                }
            }

            for below in pivot + 1..n {
                let scale = work.data[below * width + pivot];
                if scale == 0 {
                    continue;
                }
                for c in 0..width {
                    let contribution = galois::multiply(scale, work.data[pivot * width + c]);
                    work.data[below * width + c] ^= contribution;
                }
            }
        }

        for d in 0..n {
            for above in 0..d {
                let scale = work.data[above * width + d];
                if scale == 0 {
                    continue;
                }
                for c in 0..width {
                    let contribution = galois::multiply(scale, work.data[d * width + c]);
                    work.data[above * width + c] ^= contribution;
                }
            }
        }

        work.submatrix(0, n, n, 2 * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_matrix() -> Matrix {
        Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap()
    }

    #[test]
    fn identity_is_neutral_for_multiply() {
        let m = small_matrix();
        let i = Matrix::identity(2);
        assert_eq!(i.multiply(&m).unwrap(), m);
        assert_eq!(m.multiply(&i).unwrap(), m);
    }

    #[test]
    fn get_set_roundtrip() {
        let mut m = Matrix::zero(2, 2);
        m.set(0, 1, 42).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), 42);
        assert_eq!(m.get(1, 1).unwrap(), 0);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let m = Matrix::zero(2, 2);
        assert!(matches!(m.get(5, 0), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn augment_then_submatrix_roundtrips() {
        let m = small_matrix();
        let i = Matrix::identity(2);
        let aug = m.augment(&i).unwrap();
        assert_eq!(aug.cols(), 4);
        let left = aug.submatrix(0, 0, 2, 2).unwrap();
        assert_eq!(left, m);
    }

    #[test]
    fn swap_rows_swaps_contents() {
        let mut m = small_matrix();
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m.row(0).unwrap(), &[3, 4]);
        assert_eq!(m.row(1).unwrap(), &[1, 2]);
    }

    #[test]
    fn invert_is_involutive() {
        let v = Matrix::vandermonde(4, 4);
        let inv = v.invert().unwrap();
        assert_eq!(v.multiply(&inv).unwrap(), Matrix::identity(4));
        assert_eq!(inv.invert().unwrap(), v);
    }

    #[test]
    fn vandermonde_top_block_is_invertible() {
        let v = Matrix::vandermonde(6, 4);
        let top = v.submatrix(0, 0, 4, 4).unwrap();
        let inv = top.invert().unwrap();
        assert_eq!(top.multiply(&inv).unwrap(), Matrix::identity(4));
    }

    #[test]
    fn singular_matrix_fails_to_invert() {
        let m = Matrix::from_rows(&[vec![1, 2], vec![1, 2]]).unwrap();
        assert!(matches!(m.invert(), Err(Error::Singular { .. })));
    }

    #[test]
    fn shape_mismatch_on_multiply() {
        let a = Matrix::zero(2, 3);
        let b = Matrix::zero(2, 3);
        assert!(matches!(a.multiply(&b), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn shape_mismatch_on_augment() {
        let a = Matrix::zero(2, 2);
        let b = Matrix::zero(3, 2);
        assert!(matches!(a.augment(&b), Err(Error::ShapeMismatch { .. })));
    }
}
