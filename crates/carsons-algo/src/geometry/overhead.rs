use carsons_core::{CarsonsResult, ConductorModel, ConductorTable};

use super::GeometryPolicy;
use crate::series::{SeriesPolicy, Truncation};

/// Bare conductors strung above ground.
///
/// Uses the full Carson expressions with explicit earth images, so every
/// conductor needs a positive height.
#[derive(Debug, Clone)]
pub struct OverheadLine {
    table: ConductorTable,
    truncation: Truncation,
}

impl OverheadLine {
    pub fn new<M: ConductorModel + ?Sized>(model: &M) -> CarsonsResult<Self> {
        Ok(Self::from_table(ConductorTable::from_model(model)?))
    }

    pub fn from_table(table: ConductorTable) -> Self {
        Self {
            table,
            truncation: Truncation::default(),
        }
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn truncation(&self) -> Truncation {
        self.truncation
    }
}

impl GeometryPolicy for OverheadLine {
    fn name(&self) -> &'static str {
        "overhead"
    }

    fn table(&self) -> &ConductorTable {
        &self.table
    }

    fn series(&self) -> SeriesPolicy {
        SeriesPolicy::Image(self.truncation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carsons_core::{LineGeometry, PhaseLayout};

    #[test]
    fn test_overhead_policy() {
        let line = LineGeometry::new()
            .with_conductor("A", 1e-4, 0.005, (0.0, 9.0))
            .with_conductor("N", 1e-4, 0.005, (0.5, 7.0));
        let overhead = OverheadLine::new(&line).unwrap();

        assert_eq!(overhead.series(), SeriesPolicy::Image(Truncation::MODIFIED));
        assert_eq!(overhead.table().layout().unwrap(), PhaseLayout::Primary);
        assert_eq!(overhead.ordering().unwrap().len(), 4);

        let full = overhead.with_truncation(Truncation::FULL);
        assert_eq!(full.series(), SeriesPolicy::Image(Truncation::FULL));
    }
}
