//! Phase and conductor labels.
//!
//! A line is described by string labels: `A`, `B`, `C` for primary phases,
//! `S1`, `S2` for the two hot legs of a split-phase secondary, and anything
//! beginning with `N` for a neutral (`N`, `NA`, `N1`, ...). Shield conductors
//! are never named by the input; they are synthesized by the tape-shield
//! geometry and carry the phase they wrap.
//!
//! The derived ordering of [`ConductorLabel`] is the matrix ordering: phases in
//! canonical order, then shields by phase, then neutrals sorted by label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CarsonsError, CarsonsResult};

/// Reserved leading character of every neutral label
pub const NEUTRAL_PREFIX: char = 'N';

/// Energized conductor position in a primary or secondary layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
    S1,
    S2,
}

impl Phase {
    pub const PRIMARY: [Phase; 3] = [Phase::A, Phase::B, Phase::C];
    pub const SECONDARY: [Phase; 2] = [Phase::S1, Phase::S2];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
            Phase::S1 => "S1",
            Phase::S2 => "S2",
        }
    }

    pub fn is_secondary(self) -> bool {
        matches!(self, Phase::S1 | Phase::S2)
    }

    fn from_label(label: &str) -> Option<Phase> {
        match label {
            "A" => Some(Phase::A),
            "B" => Some(Phase::B),
            "C" => Some(Phase::C),
            "S1" => Some(Phase::S1),
            "S2" => Some(Phase::S2),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CarsonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::from_label(s).ok_or_else(|| CarsonsError::InvalidLabel(s.to_string()))
    }
}

/// Identity of one conductor in the primitive matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConductorLabel {
    Phase(Phase),
    /// Tape shield wrapped around the given phase
    Shield(Phase),
    /// Neutral; the label always starts with [`NEUTRAL_PREFIX`]
    Neutral(String),
}

impl ConductorLabel {
    /// Classify an input label. Returns `None` for labels that are neither a
    /// phase nor a neutral, which the loader skips.
    pub fn parse(label: &str) -> Option<Self> {
        if let Some(phase) = Phase::from_label(label) {
            Some(ConductorLabel::Phase(phase))
        } else if label.starts_with(NEUTRAL_PREFIX) {
            Some(ConductorLabel::Neutral(label.to_string()))
        } else {
            None
        }
    }

    /// Validated neutral constructor.
    pub fn neutral(label: impl Into<String>) -> CarsonsResult<Self> {
        let label = label.into();
        if label.starts_with(NEUTRAL_PREFIX) {
            Ok(ConductorLabel::Neutral(label))
        } else {
            Err(CarsonsError::InvalidLabel(format!(
                "neutral label '{label}' must start with '{NEUTRAL_PREFIX}'"
            )))
        }
    }

    /// The phase for a phase conductor, `None` otherwise.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ConductorLabel::Phase(p) => Some(*p),
            _ => None,
        }
    }

    /// The phase a conductor belongs to. A neutral named `N<phase>` (e.g.
    /// `NA`) belongs to that phase; other neutrals have no owner.
    pub fn owner(&self) -> Option<Phase> {
        match self {
            ConductorLabel::Phase(p) | ConductorLabel::Shield(p) => Some(*p),
            ConductorLabel::Neutral(label) => label
                .strip_prefix(NEUTRAL_PREFIX)
                .and_then(Phase::from_label),
        }
    }

    pub fn is_phase(&self) -> bool {
        matches!(self, ConductorLabel::Phase(_))
    }

    pub fn is_shield(&self) -> bool {
        matches!(self, ConductorLabel::Shield(_))
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, ConductorLabel::Neutral(_))
    }
}

impl From<Phase> for ConductorLabel {
    fn from(phase: Phase) -> Self {
        ConductorLabel::Phase(phase)
    }
}

impl fmt::Display for ConductorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConductorLabel::Phase(p) => write!(f, "{p}"),
            ConductorLabel::Shield(p) => write!(f, "{p}t"),
            ConductorLabel::Neutral(label) => f.write_str(label),
        }
    }
}

impl FromStr for ConductorLabel {
    type Err = CarsonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConductorLabel::parse(s).ok_or_else(|| CarsonsError::InvalidLabel(s.to_string()))
    }
}

/// Shape of the reduced phase impedance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseLayout {
    /// A, B, C
    Primary,
    /// S1, S2
    Secondary,
}

impl PhaseLayout {
    pub fn phases(self) -> &'static [Phase] {
        match self {
            PhaseLayout::Primary => &Phase::PRIMARY,
            PhaseLayout::Secondary => &Phase::SECONDARY,
        }
    }

    pub fn dimension(self) -> usize {
        self.phases().len()
    }

    pub fn index_of(self, phase: Phase) -> Option<usize> {
        self.phases().iter().position(|p| *p == phase)
    }

    /// Pick the layout for the set of phases present on a line.
    ///
    /// Secondary exactly when the phases are `{S1, S2}`; an empty set is
    /// primary. Anything mixing the two families is rejected.
    pub fn detect(phases: impl IntoIterator<Item = Phase>) -> CarsonsResult<Self> {
        let mut primary = 0usize;
        let mut secondary = Vec::new();
        for phase in phases {
            if phase.is_secondary() {
                if !secondary.contains(&phase) {
                    secondary.push(phase);
                }
            } else {
                primary += 1;
            }
        }

        match (primary, secondary.len()) {
            (_, 0) => Ok(PhaseLayout::Primary),
            (0, 2) => Ok(PhaseLayout::Secondary),
            (0, _) => Err(CarsonsError::Validation(
                "secondary lines need both S1 and S2".into(),
            )),
            _ => Err(CarsonsError::Validation(
                "cannot mix primary (A/B/C) and secondary (S1/S2) phases".into(),
            )),
        }
    }
}

impl fmt::Display for PhaseLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseLayout::Primary => f.write_str("primary"),
            PhaseLayout::Secondary => f.write_str("secondary"),
        }
    }
}
