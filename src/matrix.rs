// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-size two-dimensional storage.
//!
//! A `Matrix` is allocated once, zero-initialized (every cell starts as
//! `T::default()`), and never resized. Rows are contiguous, so a row can be
//! handed out as a slice.
//!
//! # Examples
//!
//! ```
//! use sdi_skyline::matrix::Matrix;
//!
//! let mut m: Matrix<usize> = Matrix::new(2, 3);
//! m[(1, 2)] = 7;
//! assert_eq!(m.row(1), &[0, 0, 7]);
//! assert_eq!(m.rows(), 2);
//! ```

use std::ops::{Index, IndexMut};

/// Row-major rows×columns store backed by one owned buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T> {
    cells: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T: Default + Clone> Matrix<T> {
    /// Allocate a `rows`×`columns` matrix with every cell set to `T::default()`.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![T::default(); rows * columns],
            rows,
            columns,
        }
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        assert!(r < self.rows, "Matrix row out of range: {} >= {}", r, self.rows);
        &self.cells[r * self.columns..(r + 1) * self.columns]
    }

    /// Mutably borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        assert!(r < self.rows, "Matrix row out of range: {} >= {}", r, self.rows);
        &mut self.cells[r * self.columns..(r + 1) * self.columns]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.row(r)[c]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        &mut self.row_mut(r)[c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_initialized() {
        let m: Matrix<f64> = Matrix::new(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 4);
        for r in 0..3 {
            assert!(m.row(r).iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_cell_and_row_addressing_agree() {
        let mut m: Matrix<usize> = Matrix::new(2, 2);
        m[(0, 1)] = 5;
        m.row_mut(1)[0] = 9;
        assert_eq!(m.row(0), &[0, 5]);
        assert_eq!(m[(1, 0)], 9);
    }

    #[test]
    #[should_panic(expected = "Matrix row out of range")]
    fn test_row_out_of_range() {
        let m: Matrix<u8> = Matrix::new(2, 2);
        let _ = m.row(2);
    }

    #[test]
    fn test_empty_matrix() {
        let m: Matrix<u8> = Matrix::new(0, 5);
        assert_eq!(m.rows(), 0);
    }
}
