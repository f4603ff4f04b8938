//! Conductor model contract and the bundled [`LineGeometry`] implementation.
//!
//! The impedance engine never owns line data. It pulls what it needs through
//! [`ConductorModel`] and the construction-specific extension traits, so any
//! data source (a database row, a network model, a file) can be plugged in.
//!
//! [`LineGeometry`] is a plain serde record with maps keyed by label. It loads
//! from TOML or JSON and has a fluent builder for use in code:
//!
//! ```
//! use carsons_core::model::{ConductorModel, LineGeometry};
//! use carsons_core::units::Hertz;
//!
//! let line = LineGeometry::new()
//!     .with_conductor("A", 1.9e-4, 0.0092, (0.762, 8.5344))
//!     .with_conductor("N", 3.8e-4, 0.0037, (0.0, 7.3152))
//!     .with_frequency(Hertz(50.0));
//!
//! assert_eq!(line.phases(), vec!["A".to_string(), "N".to_string()]);
//! assert_eq!(line.frequency(), Hertz(50.0));
//! ```
//!
//! The same line in TOML:
//!
//! ```toml
//! phases = ["A", "N"]
//! frequency = 50.0
//!
//! [wire_positions]
//! A = { x = 0.762, y = 8.5344 }
//! N = { x = 0.0, y = 7.3152 }
//!
//! [resistance]
//! A = 1.9e-4
//! N = 3.8e-4
//!
//! [geometric_mean_radius]
//! A = 0.0092
//! N = 0.0037
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::conductor::Position;
use crate::constants::DEFAULT_FREQUENCY;
use crate::error::{CarsonsError, CarsonsResult};
use crate::units::Hertz;

/// Base geometry lookups every line provides. All quantities are SI.
pub trait ConductorModel {
    /// Conductor labels, in input order
    fn phases(&self) -> Vec<String>;

    fn wire_position(&self, label: &str) -> Option<Position>;

    /// Ω/m
    fn resistance(&self, label: &str) -> Option<f64>;

    /// m
    fn geometric_mean_radius(&self, label: &str) -> Option<f64>;

    fn frequency(&self) -> Hertz {
        DEFAULT_FREQUENCY
    }
}

/// Strand data of a concentric neutral, all SI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentricNeutral {
    /// GMR of one strand (m)
    pub strand_gmr: f64,
    /// Resistance of one strand (Ω/m)
    pub strand_resistance: f64,
    /// Diameter of one strand (m)
    pub strand_diameter: f64,
    pub strand_count: u32,
    /// Outside diameter over the neutral strands (m)
    pub diameter_over_neutral: f64,
}

/// Copper tape shield dimensions, all SI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapeShield {
    /// Outside diameter of the shield (m)
    pub outer_diameter: f64,
    /// Tape thickness (m)
    pub thickness: f64,
}

/// Lines whose neutrals may be concentric strand layers.
pub trait ConcentricNeutralModel: ConductorModel {
    /// Strand data for a neutral label such as `NA`, or `None` when that
    /// neutral is an ordinary conductor.
    fn concentric_neutral(&self, label: &str) -> Option<ConcentricNeutral>;
}

/// Lines whose phases may carry a tape shield.
pub trait TapeShieldModel: ConductorModel {
    fn tape_shield(&self, phase: &str) -> Option<TapeShield>;
}

/// Insulated conductors bundled together (triplex, quadruplex).
pub trait MultiConductorModel: ConductorModel {
    /// Outside radius of the insulated conductor (m)
    fn outside_radius(&self, label: &str) -> Option<f64>;
}

/// Serializable line description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    #[serde(default)]
    pub phases: Vec<String>,
    #[serde(default = "default_frequency")]
    pub frequency: Hertz,
    #[serde(default)]
    pub wire_positions: BTreeMap<String, Position>,
    #[serde(default)]
    pub resistance: BTreeMap<String, f64>,
    #[serde(default)]
    pub geometric_mean_radius: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub concentric_neutrals: BTreeMap<String, ConcentricNeutral>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tape_shields: BTreeMap<String, TapeShield>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outside_radius: BTreeMap<String, f64>,
}

fn default_frequency() -> Hertz {
    DEFAULT_FREQUENCY
}

impl Default for LineGeometry {
    fn default() -> Self {
        Self {
            phases: Vec::new(),
            frequency: DEFAULT_FREQUENCY,
            wire_positions: BTreeMap::new(),
            resistance: BTreeMap::new(),
            geometric_mean_radius: BTreeMap::new(),
            concentric_neutrals: BTreeMap::new(),
            tape_shields: BTreeMap::new(),
            outside_radius: BTreeMap::new(),
        }
    }
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_label(&mut self, label: &str) {
        if !self.phases.iter().any(|p| p == label) {
            self.phases.push(label.to_string());
        }
    }

    /// Add (or replace) a conductor with its base data.
    pub fn with_conductor(
        mut self,
        label: &str,
        resistance: f64,
        gmr: f64,
        position: impl Into<Position>,
    ) -> Self {
        self.push_label(label);
        self.wire_positions
            .insert(label.to_string(), position.into());
        self.resistance.insert(label.to_string(), resistance);
        self.geometric_mean_radius.insert(label.to_string(), gmr);
        self
    }

    /// Add a concentric neutral. Its position, resistance and GMR are derived
    /// from the strands and the owning phase, so none are given here.
    pub fn with_concentric_neutral(mut self, label: &str, neutral: ConcentricNeutral) -> Self {
        self.push_label(label);
        self.concentric_neutrals.insert(label.to_string(), neutral);
        self
    }

    pub fn with_tape_shield(mut self, phase: &str, shield: TapeShield) -> Self {
        self.tape_shields.insert(phase.to_string(), shield);
        self
    }

    pub fn with_outside_radius(mut self, label: &str, radius: f64) -> Self {
        self.outside_radius.insert(label.to_string(), radius);
        self
    }

    pub fn with_frequency(mut self, frequency: Hertz) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn from_toml_str(s: &str) -> CarsonsResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> CarsonsResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.toml` or `.json` file, picked by extension.
    pub fn from_path(path: &Path) -> CarsonsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(CarsonsError::Parse(format!(
                "unsupported geometry file extension: {}",
                path.display()
            ))),
        }
    }
}

impl ConductorModel for LineGeometry {
    fn phases(&self) -> Vec<String> {
        self.phases.clone()
    }

    fn wire_position(&self, label: &str) -> Option<Position> {
        self.wire_positions.get(label).copied()
    }

    fn resistance(&self, label: &str) -> Option<f64> {
        self.resistance.get(label).copied()
    }

    fn geometric_mean_radius(&self, label: &str) -> Option<f64> {
        self.geometric_mean_radius.get(label).copied()
    }

    fn frequency(&self) -> Hertz {
        self.frequency
    }
}

impl ConcentricNeutralModel for LineGeometry {
    fn concentric_neutral(&self, label: &str) -> Option<ConcentricNeutral> {
        self.concentric_neutrals.get(label).copied()
    }
}

impl TapeShieldModel for LineGeometry {
    fn tape_shield(&self, phase: &str) -> Option<TapeShield> {
        self.tape_shields.get(phase).copied()
    }
}

impl MultiConductorModel for LineGeometry {
    fn outside_radius(&self, label: &str) -> Option<f64> {
        self.outside_radius.get(label).copied()
    }
}
