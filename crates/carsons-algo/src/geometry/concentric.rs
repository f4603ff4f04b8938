//! Underground cables with a concentric neutral.
//!
//! The neutral is a ring of `k` strands wound around the phase conductor at
//! radius `R = (d_od − d_s)/2`. It is modelled as one equivalent conductor at
//! the phase position with
//!
//! ```text
//! GMR_cn = (GMR_s · k · R^(k−1))^(1/k)
//! r_cn   = r_s / k
//! ```
//!
//! A neutral labelled `N<phase>` (e.g. `NA`) with strand data belongs to that
//! phase. Neutrals without strand data stay ordinary conductors.

use carsons_core::{
    CarsonsError, CarsonsResult, ConcentricNeutral, ConcentricNeutralModel, Conductor,
    ConductorLabel, ConductorTable,
};
use tracing::debug;

use super::{concentric_neutral_distance, GeometryPolicy};

/// Radius of the circle through the strand centres (m)
pub fn neutral_radius(neutral: &ConcentricNeutral) -> f64 {
    (neutral.diameter_over_neutral - neutral.strand_diameter) / 2.0
}

/// GMR of the strand ring taken as one conductor (m)
pub fn equivalent_gmr(neutral: &ConcentricNeutral) -> f64 {
    let k = f64::from(neutral.strand_count);
    let radius = neutral_radius(neutral);
    (neutral.strand_gmr * k * radius.powf(k - 1.0)).powf(1.0 / k)
}

/// Resistance of the strands in parallel (Ω/m)
pub fn equivalent_resistance(neutral: &ConcentricNeutral) -> f64 {
    neutral.strand_resistance / f64::from(neutral.strand_count)
}

/// Load a model whose neutrals may be concentric into a conductor table.
///
/// Ordinary conductors come straight from the model. Each concentric neutral is
/// synthesized at its owning phase, which must be part of the line.
pub(crate) fn load_concentric_table<M: ConcentricNeutralModel + ?Sized>(
    model: &M,
) -> CarsonsResult<ConductorTable> {
    let (labels, diagnostics) = ConductorTable::scan(model)?;
    let mut table = ConductorTable::new(model.frequency());
    table.diagnostics_mut().merge(diagnostics);

    let mut concentric = Vec::new();
    for (raw, label) in labels {
        let strands = if label.is_neutral() {
            model.concentric_neutral(&raw)
        } else {
            None
        };
        match strands {
            Some(strands) => concentric.push((label, strands)),
            None => table.insert(ConductorTable::load_conductor(model, &raw, label)?)?,
        }
    }

    for (label, strands) in concentric {
        let owner = label
            .owner()
            .map(ConductorLabel::Phase)
            .and_then(|phase| table.get(&phase))
            .ok_or_else(|| CarsonsError::missing(label.to_string(), "owner phase"))?;
        let position = owner.position;

        if strands.strand_count == 0 {
            return Err(CarsonsError::Validation(format!(
                "concentric neutral '{label}' needs at least one strand"
            )));
        }
        let radius = neutral_radius(&strands);
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CarsonsError::Validation(format!(
                "concentric neutral '{label}' has ring radius {radius}; \
                 diameter over neutral must exceed strand diameter"
            )));
        }
        let gmr = equivalent_gmr(&strands);
        let resistance = equivalent_resistance(&strands);
        debug!(neutral = %label, radius, gmr, resistance, "synthesized concentric neutral");

        let neutral = Conductor::new(label, position, resistance, gmr)?.with_neutral_radius(radius);
        table.insert(neutral)?;
    }

    Ok(table)
}

/// Cable whose neutrals are concentric strand layers.
#[derive(Debug, Clone)]
pub struct ConcentricNeutralCable {
    table: ConductorTable,
}

impl ConcentricNeutralCable {
    pub fn new<M: ConcentricNeutralModel + ?Sized>(model: &M) -> CarsonsResult<Self> {
        Ok(Self {
            table: load_concentric_table(model)?,
        })
    }
}

impl GeometryPolicy for ConcentricNeutralCable {
    fn name(&self) -> &'static str {
        "concentric-neutral"
    }

    fn table(&self) -> &ConductorTable {
        &self.table
    }

    fn distance(&self, i: &Conductor, j: &Conductor) -> CarsonsResult<f64> {
        Ok(concentric_neutral_distance(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carsons_core::units::{Meters, OhmsPerMeter};
    use carsons_core::{LineGeometry, Phase};

    // 1/0 AA with 13 × #14 Cu strands
    fn strands() -> ConcentricNeutral {
        ConcentricNeutral {
            strand_gmr: Meters::from_feet(0.00208).value(),
            strand_resistance: OhmsPerMeter::from_ohms_per_mile(14.8722).value(),
            strand_diameter: Meters::from_inches(0.0641).value(),
            strand_count: 13,
            diameter_over_neutral: Meters::from_inches(1.29).value(),
        }
    }

    #[test]
    fn test_equivalent_conductor() {
        let cn = strands();
        assert!((Meters(neutral_radius(&cn)).to_inches() - 0.61295).abs() < 1e-9);
        // Kersting example 4.2: R = 0.0511 ft, GMR_cn = 0.0486 ft, r_cn = 1.1440 Ω/mile
        assert!((Meters(neutral_radius(&cn)).to_feet() - 0.0511).abs() < 1e-4);
        assert!((Meters(equivalent_gmr(&cn)).to_feet() - 0.0486).abs() < 2e-4);
        assert!((OhmsPerMeter(equivalent_resistance(&cn)).to_ohms_per_mile() - 1.1440).abs() < 1e-4);
    }

    #[test]
    fn test_neutral_takes_owner_position() {
        let line = LineGeometry::new()
            .with_conductor("A", 2.5e-4, 0.005, (0.3, -1.2))
            .with_concentric_neutral("NA", strands());
        let cable = ConcentricNeutralCable::new(&line).unwrap();

        let na = cable
            .table()
            .get(&ConductorLabel::neutral("NA").unwrap())
            .unwrap();
        let a = cable.table().get(&ConductorLabel::Phase(Phase::A)).unwrap();
        assert_eq!(na.position, a.position);
        assert_eq!(na.neutral_radius, Some(neutral_radius(&strands())));
        assert_eq!(cable.distance(na, a).unwrap(), neutral_radius(&strands()));
    }

    #[test]
    fn test_missing_owner_phase() {
        let line = LineGeometry::new()
            .with_conductor("A", 2.5e-4, 0.005, (0.3, -1.2))
            .with_concentric_neutral("NB", strands());
        assert!(matches!(
            ConcentricNeutralCable::new(&line),
            Err(CarsonsError::MissingData { field: "owner phase", .. })
        ));
    }

    #[test]
    fn test_zero_strands_rejected() {
        let mut cn = strands();
        cn.strand_count = 0;
        let line = LineGeometry::new()
            .with_conductor("A", 2.5e-4, 0.005, (0.3, -1.2))
            .with_concentric_neutral("NA", cn);
        assert!(matches!(
            ConcentricNeutralCable::new(&line),
            Err(CarsonsError::Validation(_))
        ));
    }

    #[test]
    fn test_strands_wider_than_cable_rejected() {
        let mut cn = strands();
        cn.strand_diameter = 0.04;
        cn.diameter_over_neutral = 0.03;
        let line = LineGeometry::new()
            .with_conductor("A", 2.5e-4, 0.005, (0.3, -1.2))
            .with_concentric_neutral("NA", cn);

        match ConcentricNeutralCable::new(&line) {
            Err(CarsonsError::Validation(msg)) => assert!(msg.contains("NA"), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
