//! Geometry variants.
//!
//! Every line construction is a [`GeometryPolicy`]: a conductor table plus the
//! rules that differ between constructions (conductor spacing, equivalent GMR
//! and resistance, matrix ordering, which Carson series to use). The impedance
//! formulas themselves live once, in [`crate::primitive`].
//!
//! | variant | distance | series | ordering |
//! |---------|----------|--------|----------|
//! | [`OverheadLine`] | centre to centre | [`SeriesPolicy::Image`] | padded |
//! | [`ConcentricNeutralCable`] | strand radius to own phase | modified | padded |
//! | [`TapeShieldedCable`] | shield GMR to own phase | modified | padded |
//! | [`MultiConductorCable`] | sum of outside radii | modified | compact |
//!
//! Padded orderings always reserve a slot for every phase of the layout, so an
//! absent phase shows up as a zero row and column. Compact orderings only hold
//! conductors that exist.

pub mod concentric;
pub mod multi_conductor;
pub mod overhead;
pub mod tape_shield;

pub use concentric::ConcentricNeutralCable;
pub use multi_conductor::MultiConductorCable;
pub use overhead::OverheadLine;
pub use tape_shield::TapeShieldedCable;

use carsons_core::{CarsonsResult, Conductor, ConductorLabel, ConductorTable, Hertz};

use crate::series::SeriesPolicy;

/// One row/column of a primitive matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConductorSlot {
    pub label: ConductorLabel,
    /// `false` for a phase reserved by the layout but missing from the line
    pub present: bool,
}

impl ConductorSlot {
    pub fn present(label: ConductorLabel) -> Self {
        Self {
            label,
            present: true,
        }
    }

    pub fn absent(label: ConductorLabel) -> Self {
        Self {
            label,
            present: false,
        }
    }
}

/// Construction-specific rules consumed by the primitive impedance builder.
pub trait GeometryPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn table(&self) -> &ConductorTable;

    fn series(&self) -> SeriesPolicy {
        SeriesPolicy::Modified
    }

    fn frequency(&self) -> Hertz {
        self.table().frequency()
    }

    /// Matrix rows in order. Phase slots always come first.
    fn ordering(&self) -> CarsonsResult<Vec<ConductorSlot>> {
        padded_ordering(self.table())
    }

    /// Spacing used for the mutual terms (m)
    fn distance(&self, i: &Conductor, j: &Conductor) -> CarsonsResult<f64> {
        Ok(i.position.distance_to(&j.position))
    }

    fn self_gmr(&self, conductor: &Conductor) -> CarsonsResult<f64> {
        Ok(conductor.gmr)
    }

    fn self_resistance(&self, conductor: &Conductor) -> CarsonsResult<f64> {
        Ok(conductor.resistance)
    }
}

/// Every phase of the layout, present or not, followed by the remaining
/// conductors in label order.
pub fn padded_ordering(table: &ConductorTable) -> CarsonsResult<Vec<ConductorSlot>> {
    let layout = table.layout()?;
    let mut slots: Vec<ConductorSlot> = layout
        .phases()
        .iter()
        .map(|&phase| {
            let label = ConductorLabel::Phase(phase);
            if table.contains(&label) {
                ConductorSlot::present(label)
            } else {
                ConductorSlot::absent(label)
            }
        })
        .collect();
    slots.extend(
        table
            .iter()
            .filter(|c| !c.label.is_phase())
            .map(|c| ConductorSlot::present(c.label.clone())),
    );
    Ok(slots)
}

/// Only the conductors present, phases first.
pub fn compact_ordering(table: &ConductorTable) -> CarsonsResult<Vec<ConductorSlot>> {
    table.layout()?;
    Ok(table
        .iter()
        .map(|c| ConductorSlot::present(c.label.clone()))
        .collect())
}

/// Spacing between two conductors when concentric neutrals may be present.
///
/// A concentric neutral sits on a circle of its strand radius `R` around its
/// phase: `R` from its own phase (or that phase's shield), `√(d² + R²)` from
/// any other phase. Everything else is centre to centre.
pub(crate) fn concentric_neutral_distance(i: &Conductor, j: &Conductor) -> f64 {
    let centre = i.position.distance_to(&j.position);
    let (neutral, radius, other) = match (i.neutral_radius, j.neutral_radius) {
        (Some(r), None) => (i, r, j),
        (None, Some(r)) => (j, r, i),
        _ => return centre,
    };
    if other.label.is_neutral() {
        return centre;
    }
    if neutral.label.owner() == other.label.owner() {
        radius
    } else {
        centre.hypot(radius)
    }
}
