//! Phase impedance matrix and the one-call entry points.

use carsons_core::{
    CarsonsError, CarsonsResult, Complex64, ComplexMatrix, ConductorModel, LinearSystemBackend,
    Phase, PhaseLayout,
};

use crate::geometry::{GeometryPolicy, OverheadLine};
use crate::primitive::build_primitive;
use crate::sequence::{Matrix3, SequenceImpedance};

/// Reduced phase impedance matrix Z (Ω/m), rows in canonical phase order.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseImpedance {
    matrix: ComplexMatrix,
    layout: PhaseLayout,
}

impl PhaseImpedance {
    pub fn new(matrix: ComplexMatrix, layout: PhaseLayout) -> CarsonsResult<Self> {
        let dim = layout.dimension();
        if matrix.rows() != dim || matrix.cols() != dim {
            return Err(CarsonsError::Validation(format!(
                "{layout} phase impedance must be {dim}x{dim}, got {}x{}",
                matrix.rows(),
                matrix.cols()
            )));
        }
        Ok(Self { matrix, layout })
    }

    pub fn matrix(&self) -> &ComplexMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> ComplexMatrix {
        self.matrix
    }

    pub fn layout(&self) -> PhaseLayout {
        self.layout
    }

    pub fn get(&self, row: Phase, col: Phase) -> Option<Complex64> {
        Some(
            self.matrix
                .get(self.layout.index_of(row)?, self.layout.index_of(col)?),
        )
    }

    /// The matrix as a fixed 3×3 array; secondary lines have no such form.
    pub fn to_three_phase(&self) -> CarsonsResult<Matrix3> {
        if self.layout != PhaseLayout::Primary {
            return Err(CarsonsError::Validation(
                "sequence impedances need a three-phase (A, B, C) matrix".into(),
            ));
        }
        let mut out = [[Complex64::new(0.0, 0.0); 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.matrix.get(i, j);
            }
        }
        Ok(out)
    }

    pub fn sequence(&self) -> CarsonsResult<SequenceImpedance> {
        Ok(SequenceImpedance::from_phase(&self.to_three_phase()?))
    }
}

/// Phase impedance of any geometry, reduced with the default solver.
pub fn calculate_impedance<P: GeometryPolicy + ?Sized>(policy: &P) -> CarsonsResult<PhaseImpedance> {
    build_primitive(policy)?.reduce()
}

pub fn calculate_impedance_with<P: GeometryPolicy + ?Sized>(
    policy: &P,
    backend: &dyn LinearSystemBackend,
) -> CarsonsResult<PhaseImpedance> {
    build_primitive(policy)?.reduce_with(backend)
}

/// Phase impedance of an overhead line described by `model`.
pub fn convert_geometric_model<M: ConductorModel + ?Sized>(
    model: &M,
) -> CarsonsResult<PhaseImpedance> {
    calculate_impedance(&OverheadLine::new(model)?)
}

/// Evaluate many geometries on the rayon pool. Results keep input order and
/// fail independently.
#[cfg(feature = "parallel")]
pub fn calculate_impedances<P: GeometryPolicy>(policies: &[P]) -> Vec<CarsonsResult<PhaseImpedance>> {
    use rayon::prelude::*;

    policies.par_iter().map(|policy| calculate_impedance(policy)).collect()
}
