//! Conductor records and the per-computation conductor table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::diagnostics::Diagnostics;
use crate::error::{CarsonsError, CarsonsResult};
use crate::model::ConductorModel;
use crate::phase::{ConductorLabel, Phase, PhaseLayout};
use crate::units::Hertz;

/// Cross-section coordinates in metres. `y` is the height above ground;
/// buried conductors have `y <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Mirror image below the earth plane
    pub fn image(&self) -> Position {
        Position::new(self.x, -self.y)
    }

    /// Distance from this conductor to the earth image of `other`
    pub fn image_distance_to(&self, other: &Position) -> f64 {
        self.distance_to(&other.image())
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position::new(x, y)
    }
}

/// One conductor as the impedance builder sees it.
///
/// Resistance and GMR are finite and strictly positive. The optional radii are
/// attributes only some geometries use: the outside radius for
/// multi-conductor cables, the neutral radius for concentric neutrals.
#[derive(Debug, Clone, PartialEq)]
pub struct Conductor {
    pub label: ConductorLabel,
    pub position: Position,
    /// Ω/m
    pub resistance: f64,
    /// m
    pub gmr: f64,
    pub outside_radius: Option<f64>,
    pub neutral_radius: Option<f64>,
}

impl Conductor {
    pub fn new(
        label: ConductorLabel,
        position: Position,
        resistance: f64,
        gmr: f64,
    ) -> CarsonsResult<Self> {
        check_positive(&label, "resistance", resistance)?;
        check_positive(&label, "geometric mean radius", gmr)?;
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(CarsonsError::Validation(format!(
                "position of conductor '{label}' is not finite"
            )));
        }
        Ok(Self {
            label,
            position,
            resistance,
            gmr,
            outside_radius: None,
            neutral_radius: None,
        })
    }

    pub fn with_outside_radius(mut self, radius: f64) -> Self {
        self.outside_radius = Some(radius);
        self
    }

    pub fn with_neutral_radius(mut self, radius: f64) -> Self {
        self.neutral_radius = Some(radius);
        self
    }

    pub fn outside_radius(&self) -> CarsonsResult<f64> {
        self.outside_radius
            .ok_or_else(|| CarsonsError::missing(self.label.to_string(), "outside radius"))
    }
}

fn check_positive(label: &ConductorLabel, field: &str, value: f64) -> CarsonsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CarsonsError::Validation(format!(
            "{field} of conductor '{label}' must be finite and positive, got {value}"
        )))
    }
}

/// Conductors of one line, keyed and ordered by label.
#[derive(Debug, Clone)]
pub struct ConductorTable {
    frequency: Hertz,
    conductors: BTreeMap<ConductorLabel, Conductor>,
    diagnostics: Diagnostics,
}

impl ConductorTable {
    pub fn new(frequency: Hertz) -> Self {
        Self {
            frequency,
            conductors: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Classify the model's labels.
    ///
    /// Malformed labels are skipped with a warning; a label listed twice is an
    /// error.
    pub fn scan<M: ConductorModel + ?Sized>(
        model: &M,
    ) -> CarsonsResult<(Vec<(String, ConductorLabel)>, Diagnostics)> {
        let mut diagnostics = Diagnostics::new();
        let mut labels: Vec<(String, ConductorLabel)> = Vec::new();

        for raw in model.phases() {
            let Some(label) = ConductorLabel::parse(&raw) else {
                warn!(label = %raw, "skipping malformed conductor label");
                diagnostics.skip_label(raw.as_str(), "not a phase or neutral label");
                continue;
            };
            if labels.iter().any(|(_, seen)| *seen == label) {
                return Err(CarsonsError::Validation(format!(
                    "duplicate conductor label '{raw}'"
                )));
            }
            labels.push((raw, label));
        }

        Ok((labels, diagnostics))
    }

    /// Build a conductor from the model's base lookups.
    pub fn load_conductor<M: ConductorModel + ?Sized>(
        model: &M,
        raw: &str,
        label: ConductorLabel,
    ) -> CarsonsResult<Conductor> {
        let position = model
            .wire_position(raw)
            .ok_or_else(|| CarsonsError::missing(raw, "wire position"))?;
        let resistance = model
            .resistance(raw)
            .ok_or_else(|| CarsonsError::missing(raw, "resistance"))?;
        let gmr = model
            .geometric_mean_radius(raw)
            .ok_or_else(|| CarsonsError::missing(raw, "geometric mean radius"))?;
        Conductor::new(label, position, resistance, gmr)
    }

    /// Table holding every well-formed conductor of the model, unmodified.
    pub fn from_model<M: ConductorModel + ?Sized>(model: &M) -> CarsonsResult<Self> {
        let (labels, diagnostics) = Self::scan(model)?;
        let mut table = Self::new(model.frequency());
        table.diagnostics = diagnostics;
        for (raw, label) in labels {
            table.insert(Self::load_conductor(model, &raw, label)?)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, conductor: Conductor) -> CarsonsResult<()> {
        if self.conductors.contains_key(&conductor.label) {
            return Err(CarsonsError::Validation(format!(
                "duplicate conductor label '{}'",
                conductor.label
            )));
        }
        self.conductors.insert(conductor.label.clone(), conductor);
        Ok(())
    }

    pub fn get(&self, label: &ConductorLabel) -> Option<&Conductor> {
        self.conductors.get(label)
    }

    pub fn get_mut(&mut self, label: &ConductorLabel) -> Option<&mut Conductor> {
        self.conductors.get_mut(label)
    }

    pub fn contains(&self, label: &ConductorLabel) -> bool {
        self.conductors.contains_key(label)
    }

    /// Conductors in matrix order
    pub fn iter(&self) -> impl Iterator<Item = &Conductor> {
        self.conductors.values()
    }

    pub fn len(&self) -> usize {
        self.conductors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conductors.is_empty()
    }

    pub fn frequency(&self) -> Hertz {
        self.frequency
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Phases present, in canonical order
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.conductors.keys().filter_map(ConductorLabel::phase)
    }

    pub fn layout(&self) -> CarsonsResult<PhaseLayout> {
        PhaseLayout::detect(self.phases())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineGeometry;

    fn sample() -> LineGeometry {
        LineGeometry::new()
            .with_conductor("C", 3.8e-4, 0.0067, (0.0, 8.5))
            .with_conductor("A", 3.8e-4, 0.0067, (1.0, 8.5))
            .with_conductor("N", 3.8e-4, 0.0067, (0.5, 7.3))
    }

    #[test]
    fn test_position_distances() {
        let a = Position::new(0.0, 3.0);
        let b = Position::new(4.0, 3.0);
        assert_eq!(a.distance_to(&b), 4.0);
        assert!((a.image_distance_to(&b) - 52.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.image_distance_to(&a), 6.0);
    }

    #[test]
    fn test_conductor_validation() {
        let label = ConductorLabel::Phase(Phase::A);
        assert!(Conductor::new(label.clone(), Position::new(0.0, 1.0), 1e-4, 0.01).is_ok());
        assert!(Conductor::new(label.clone(), Position::new(0.0, 1.0), 0.0, 0.01).is_err());
        assert!(Conductor::new(label.clone(), Position::new(0.0, 1.0), 1e-4, -1.0).is_err());
        assert!(Conductor::new(label, Position::new(0.0, 1.0), f64::NAN, 0.01).is_err());
    }

    #[test]
    fn test_table_orders_by_label() {
        let table = ConductorTable::from_model(&sample()).unwrap();
        let labels: Vec<String> = table.iter().map(|c| c.label.to_string()).collect();
        assert_eq!(labels, vec!["A", "C", "N"]);
        assert_eq!(table.phases().collect::<Vec<_>>(), vec![Phase::A, Phase::C]);
        assert_eq!(table.layout().unwrap(), PhaseLayout::Primary);
    }

    #[test]
    fn test_malformed_label_is_recorded() {
        let geometry = sample().with_conductor("pN2", 3.8e-4, 0.0067, (2.0, 7.3));
        let table = ConductorTable::from_model(&geometry).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.diagnostics().warning_count(), 1);
        assert_eq!(
            table.diagnostics().skipped_labels().collect::<Vec<_>>(),
            vec!["pN2"]
        );
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut geometry = sample();
        geometry.phases.push("A".to_string());
        assert!(matches!(
            ConductorTable::from_model(&geometry),
            Err(CarsonsError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_lookup() {
        let mut geometry = sample();
        geometry.resistance.remove("N");
        let err = ConductorTable::from_model(&geometry).unwrap_err();
        assert!(matches!(
            err,
            CarsonsError::MissingData { ref label, field: "resistance" } if label == "N"
        ));
    }
}
