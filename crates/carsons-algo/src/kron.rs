//! # Kron reduction
//!
//! Neutrals and shields are grounded at both ends, so their voltage drop is
//! zero. Partitioning Ẑ into phase (p) and neutral (n) blocks
//!
//! ```text
//!     ┌           ┐
//! Ẑ = │ Ẑpp   Ẑpn │
//!     │ Ẑnp   Ẑnn │
//!     └           ┘
//! ```
//!
//! and eliminating the neutral currents gives the phase impedance matrix
//!
//! ```text
//! Z = Ẑpp − Ẑpn · Ẑnn⁻¹ · Ẑnp
//! ```
//!
//! Ẑnn⁻¹·Ẑnp is obtained by solving Ẑnn·X = Ẑnp; the inverse is never formed.

use carsons_core::{CarsonsError, CarsonsResult, ComplexMatrix, LinearSystemBackend};
use tracing::debug;

use crate::impedance::PhaseImpedance;
use crate::primitive::PrimitiveImpedance;

/// Schur complement of the trailing `n − phase_count` rows and columns.
///
/// With no trailing block the leading block is returned as is.
pub fn reduce_matrix(
    z: &ComplexMatrix,
    phase_count: usize,
    backend: &dyn LinearSystemBackend,
) -> CarsonsResult<ComplexMatrix> {
    if !z.is_square() {
        return Err(CarsonsError::Validation(format!(
            "primitive matrix must be square, got {}x{}",
            z.rows(),
            z.cols()
        )));
    }
    let n = z.rows();
    if phase_count > n {
        return Err(CarsonsError::Validation(format!(
            "phase count {phase_count} exceeds matrix dimension {n}"
        )));
    }

    let m = phase_count;
    let k = n - m;
    let z_pp = z.block(0, 0, m, m);
    if k == 0 {
        return Ok(z_pp);
    }

    let z_pn = z.block(0, m, m, k);
    let z_np = z.block(m, 0, k, m);
    let z_nn = z.block(m, m, k, k);

    debug!(phases = m, neutrals = k, solver = backend.name(), "kron reduction");
    let x = backend.solve(&z_nn, &z_np)?;
    z_pp.sub(&z_pn.mul(&x)?)
}

/// Reduce a primitive matrix to its phase impedance matrix.
///
/// Rows land at their canonical phase position; phases missing from the line
/// stay zero.
pub fn kron_reduce(
    primitive: &PrimitiveImpedance,
    backend: &dyn LinearSystemBackend,
) -> CarsonsResult<PhaseImpedance> {
    let phase_count = primitive.phase_count();
    let reduced = reduce_matrix(primitive.matrix(), phase_count, backend)?;

    let layout = primitive.layout();
    let positions = primitive.slots()[..phase_count]
        .iter()
        .map(|slot| {
            slot.label
                .phase()
                .and_then(|phase| layout.index_of(phase))
                .ok_or_else(|| {
                    CarsonsError::Validation(format!(
                        "conductor '{}' does not belong to the {layout} layout",
                        slot.label
                    ))
                })
        })
        .collect::<CarsonsResult<Vec<usize>>>()?;

    let dim = layout.dimension();
    let mut matrix = ComplexMatrix::zeros(dim, dim);
    for (a, &row) in positions.iter().enumerate() {
        for (b, &col) in positions.iter().enumerate() {
            matrix.set(row, col, reduced.get(a, b));
        }
    }

    PhaseImpedance::new(matrix, layout)
}
