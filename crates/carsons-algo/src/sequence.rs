//! # Symmetrical components
//!
//! The Fortescue transform diagonalizes the phase impedance matrix of a
//! transposed line:
//!
//! ```text
//! α = e^(j2π/3)
//!
//!     ┌            ┐              ┌            ┐
//!     │ 1   1   1  │              │ 1   1   1  │
//! A = │ 1   α²  α  │   A⁻¹ = 1/3 ·│ 1   α   α² │
//!     │ 1   α   α² │              │ 1   α²  α  │
//!     └            ┘              └            ┘
//!
//! Z012 = A⁻¹ · Zabc · A
//! ```
//!
//! Row/column 0 is the zero sequence, 1 the positive and 2 the negative.

use std::f64::consts::PI;

use num_complex::Complex64;

pub type Matrix3 = [[Complex64; 3]; 3];

/// α = e^(j2π/3)
pub fn alpha() -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * PI / 3.0)
}

pub fn fortescue() -> Matrix3 {
    let one = Complex64::new(1.0, 0.0);
    let a = alpha();
    let a2 = a * a;
    [[one, one, one], [one, a2, a], [one, a, a2]]
}

pub fn inverse_fortescue() -> Matrix3 {
    let third = Complex64::new(1.0 / 3.0, 0.0);
    let a = alpha();
    let a2 = a * a;
    [
        [third, third, third],
        [third, third * a, third * a2],
        [third, third * a2, third * a],
    ]
}

fn mul3(lhs: &Matrix3, rhs: &Matrix3) -> Matrix3 {
    let mut out = [[Complex64::new(0.0, 0.0); 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = (0..3).map(|k| lhs[i][k] * rhs[k][j]).sum();
        }
    }
    out
}

/// Sequence impedance matrix of a three-phase line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceImpedance {
    matrix: Matrix3,
}

impl SequenceImpedance {
    pub fn from_phase(z_abc: &Matrix3) -> Self {
        Self {
            matrix: calculate_sequence_impedance_matrix(z_abc),
        }
    }

    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    pub fn zero(&self) -> Complex64 {
        self.matrix[0][0]
    }

    pub fn positive(&self) -> Complex64 {
        self.matrix[1][1]
    }

    pub fn negative(&self) -> Complex64 {
        self.matrix[2][2]
    }
}

/// Z012 = A⁻¹ · Zabc · A
pub fn calculate_sequence_impedance_matrix(z_abc: &Matrix3) -> Matrix3 {
    mul3(&mul3(&inverse_fortescue(), z_abc), &fortescue())
}

/// `(positive, zero)` sequence impedances
pub fn calculate_sequence_impedances(z_abc: &Matrix3) -> (Complex64, Complex64) {
    let z012 = calculate_sequence_impedance_matrix(z_abc);
    (z012[1][1], z012[0][0])
}
