use faer::{complex_native::c64, prelude::*, solvers::PartialPivLu, Mat};
use num_complex::Complex64;

use crate::error::{CarsonsError, CarsonsResult};
use crate::matrix::ComplexMatrix;

/// Trait for solving dense complex linear systems (AX = B).
///
/// `rhs` may hold several columns; the solution has the same shape.
pub trait LinearSystemBackend: Send + Sync {
    fn solve(&self, matrix: &ComplexMatrix, rhs: &ComplexMatrix) -> CarsonsResult<ComplexMatrix>;

    fn name(&self) -> &'static str;
}

fn check_dimensions(matrix: &ComplexMatrix, rhs: &ComplexMatrix) -> CarsonsResult<()> {
    if !matrix.is_square() {
        return Err(CarsonsError::Validation(format!(
            "matrix must be square, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }
    if rhs.rows() != matrix.rows() {
        return Err(CarsonsError::Validation(format!(
            "rhs rows ({}) do not match matrix dimension {}",
            rhs.rows(),
            matrix.rows()
        )));
    }
    Ok(())
}

/// Hand-written LU with partial pivoting.
///
/// A pivot smaller than `pivot_tolerance` times the largest entry of the
/// matrix is treated as singular.
#[derive(Debug, Clone)]
pub struct GaussSolver {
    pub pivot_tolerance: f64,
}

impl Default for GaussSolver {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
        }
    }
}

impl GaussSolver {
    /// Row-major LU factors (unit lower triangle below the diagonal) and
    /// the row swap performed at each step.
    fn factorize(&self, matrix: &ComplexMatrix) -> CarsonsResult<(Vec<Complex64>, Vec<usize>)> {
        let n = matrix.rows();
        let scale = matrix.max_norm();
        if !scale.is_finite() || scale == 0.0 {
            return Err(CarsonsError::SingularReduction(
                "matrix is zero or not finite".into(),
            ));
        }
        let threshold = self.pivot_tolerance * scale;

        let mut lu: Vec<Complex64> = matrix.iter().copied().collect();
        let mut pivots = vec![0usize; n];

        for k in 0..n {
            let mut max_val = lu[k * n + k].norm();
            let mut max_idx = k;
            for i in (k + 1)..n {
                let val = lu[i * n + k].norm();
                if val > max_val {
                    max_val = val;
                    max_idx = i;
                }
            }

            if max_val < threshold {
                return Err(CarsonsError::SingularReduction(format!(
                    "pivot {max_val:.3e} below tolerance in column {k}"
                )));
            }

            pivots[k] = max_idx;
            if max_idx != k {
                for j in 0..n {
                    lu.swap(k * n + j, max_idx * n + j);
                }
            }

            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    let upper = lu[k * n + j];
                    lu[i * n + j] -= factor * upper;
                }
            }
        }

        Ok((lu, pivots))
    }

    fn substitute(lu: &[Complex64], pivots: &[usize], b: &mut [Complex64]) {
        let n = pivots.len();
        for (k, &p) in pivots.iter().enumerate() {
            if p != k {
                b.swap(k, p);
            }
        }

        // L·y = b
        for i in 1..n {
            for j in 0..i {
                let yj = b[j];
                b[i] -= lu[i * n + j] * yj;
            }
        }

        // U·x = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let xj = b[j];
                b[i] -= lu[i * n + j] * xj;
            }
            b[i] /= lu[i * n + i];
        }
    }
}

impl LinearSystemBackend for GaussSolver {
    fn solve(&self, matrix: &ComplexMatrix, rhs: &ComplexMatrix) -> CarsonsResult<ComplexMatrix> {
        check_dimensions(matrix, rhs)?;
        let n = matrix.rows();
        if n == 0 {
            return Ok(ComplexMatrix::zeros(0, rhs.cols()));
        }

        let (lu, pivots) = self.factorize(matrix)?;

        let mut solution = ComplexMatrix::zeros(n, rhs.cols());
        let mut column = vec![Complex64::new(0.0, 0.0); n];
        for j in 0..rhs.cols() {
            for (i, value) in column.iter_mut().enumerate() {
                *value = rhs.get(i, j);
            }
            Self::substitute(&lu, &pivots, &mut column);
            for (i, value) in column.iter().enumerate() {
                solution.set(i, j, *value);
            }
        }
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "gauss"
    }
}

/// faer partial-pivot LU over `c64`.
///
/// faer does not report singular pivots; a non-finite solution is treated as
/// a singular system.
#[derive(Debug, Clone, Default)]
pub struct FaerSolver;

impl LinearSystemBackend for FaerSolver {
    fn solve(&self, matrix: &ComplexMatrix, rhs: &ComplexMatrix) -> CarsonsResult<ComplexMatrix> {
        check_dimensions(matrix, rhs)?;
        let n = matrix.rows();
        if n == 0 {
            return Ok(ComplexMatrix::zeros(0, rhs.cols()));
        }

        let mat = Mat::<c64>::from_fn(n, n, |i, j| {
            let z = matrix.get(i, j);
            c64::new(z.re, z.im)
        });
        let rhs_mat = Mat::<c64>::from_fn(n, rhs.cols(), |i, j| {
            let z = rhs.get(i, j);
            c64::new(z.re, z.im)
        });
        let lu = PartialPivLu::new(mat.as_ref());
        let sol = lu.solve(&rhs_mat);

        let solution = ComplexMatrix::from_fn(n, rhs.cols(), |i, j| {
            let z = sol.read(i, j);
            Complex64::new(z.re, z.im)
        });
        if !solution.is_finite() {
            return Err(CarsonsError::SingularReduction(
                "faer LU produced a non-finite solution".into(),
            ));
        }
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "faer"
    }
}
