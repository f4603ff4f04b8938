use carsons_core::{CarsonsResult, Conductor, ConductorTable, MultiConductorModel};

use super::{compact_ordering, ConductorSlot, GeometryPolicy};

/// Insulated conductors twisted together (triplex, quadruplex, secondary
/// service drops).
///
/// The conductors touch, so the spacing between two of them is the sum of
/// their outside radii. Only conductors that exist get a matrix slot; the
/// reduced matrix is padded back to the full layout afterwards.
#[derive(Debug, Clone)]
pub struct MultiConductorCable {
    table: ConductorTable,
}

impl MultiConductorCable {
    pub fn new<M: MultiConductorModel + ?Sized>(model: &M) -> CarsonsResult<Self> {
        let mut table = ConductorTable::from_model(model)?;
        let labels: Vec<_> = table.iter().map(|c| c.label.clone()).collect();
        for label in labels {
            if let Some(radius) = model.outside_radius(&label.to_string()) {
                if let Some(conductor) = table.get_mut(&label) {
                    conductor.outside_radius = Some(radius);
                }
            }
        }
        Ok(Self { table })
    }
}

impl GeometryPolicy for MultiConductorCable {
    fn name(&self) -> &'static str {
        "multi-conductor"
    }

    fn table(&self) -> &ConductorTable {
        &self.table
    }

    fn ordering(&self) -> CarsonsResult<Vec<ConductorSlot>> {
        compact_ordering(&self.table)
    }

    fn distance(&self, i: &Conductor, j: &Conductor) -> CarsonsResult<f64> {
        Ok(i.outside_radius()? + j.outside_radius()?)
    }
}
