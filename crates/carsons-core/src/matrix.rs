//! Dense complex matrix used for primitive and phase impedances.
//!
//! Impedance matrices are small (a handful of conductors), so storage is a
//! flat row-major `Vec<Complex64>`. Element (i, j) lives at `i * cols + j`.

use std::ops::Index;

use num_complex::Complex64;

use crate::error::{CarsonsError, CarsonsResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl ComplexMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Complex64::new(0.0, 0.0); rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| {
            if i == j {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Complex64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> CarsonsResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(CarsonsError::Validation(
                "matrix rows have different lengths".into(),
            ));
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[Complex64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Complex64> {
        self.data.iter()
    }

    /// Copy of the `n_rows × n_cols` block whose top-left corner is (row, col).
    pub fn block(&self, row: usize, col: usize, n_rows: usize, n_cols: usize) -> Self {
        Self::from_fn(n_rows, n_cols, |i, j| self.get(row + i, col + j))
    }

    pub fn mul(&self, rhs: &ComplexMatrix) -> CarsonsResult<ComplexMatrix> {
        if self.cols != rhs.rows {
            return Err(CarsonsError::Validation(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }
        Ok(Self::from_fn(self.rows, rhs.cols, |i, j| {
            (0..self.cols).map(|k| self.get(i, k) * rhs.get(k, j)).sum()
        }))
    }

    pub fn sub(&self, rhs: &ComplexMatrix) -> CarsonsResult<ComplexMatrix> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(CarsonsError::Validation(format!(
                "cannot subtract {}x{} from {}x{}",
                rhs.rows, rhs.cols, self.rows, self.cols
            )));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Largest entry magnitude
    pub fn max_norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm()).fold(0.0, f64::max)
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|z| z.re.is_finite() && z.im.is_finite())
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.is_square()
            && (0..self.rows).all(|i| {
                (i + 1..self.cols).all(|j| (self.get(i, j) - self.get(j, i)).norm() <= tolerance)
            })
    }

    pub fn to_rows(&self) -> Vec<Vec<Complex64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

impl Index<(usize, usize)> for ComplexMatrix {
    type Output = Complex64;

    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        &self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_from_rows_and_indexing() {
        let m = ComplexMatrix::from_rows(vec![
            vec![c(1.0, 0.0), c(2.0, 1.0)],
            vec![c(3.0, 0.0), c(4.0, -1.0)],
        ])
        .unwrap();

        assert_eq!(m.rows(), 2);
        assert_eq!(m[(0, 1)], c(2.0, 1.0));
        assert_eq!(m.row(1), &[c(3.0, 0.0), c(4.0, -1.0)]);
        assert!(ComplexMatrix::from_rows(vec![vec![c(1.0, 0.0)], vec![]]).is_err());
    }

    #[test]
    fn test_block() {
        let m = ComplexMatrix::from_fn(3, 3, |i, j| c((i * 3 + j) as f64, 0.0));
        let b = m.block(1, 0, 2, 2);
        assert_eq!(b.to_rows(), vec![vec![c(3.0, 0.0), c(4.0, 0.0)], vec![c(6.0, 0.0), c(7.0, 0.0)]]);
        assert_eq!(m.block(0, 2, 1, 1)[(0, 0)], c(2.0, 0.0));
    }

    #[test]
    fn test_mul_and_sub() {
        let a = ComplexMatrix::from_rows(vec![vec![c(0.0, 1.0), c(1.0, 0.0)]]).unwrap();
        let b = ComplexMatrix::from_rows(vec![vec![c(0.0, 1.0)], vec![c(2.0, 0.0)]]).unwrap();

        let p = a.mul(&b).unwrap();
        assert_eq!(p.rows(), 1);
        assert_eq!(p[(0, 0)], c(1.0, 0.0));

        assert!(a.mul(&a).is_err());
        assert_eq!(a.sub(&a).unwrap().max_norm(), 0.0);
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn test_symmetry_check() {
        let mut m = ComplexMatrix::identity(3);
        m.set(0, 2, c(0.5, 0.5));
        assert!(!m.is_symmetric(1e-12));
        m.set(2, 0, c(0.5, 0.5));
        assert!(m.is_symmetric(1e-12));
    }
}
