//! Underground cables with a copper tape shield.
//!
//! The shield is an annulus of outside diameter `d_s` and thickness `T` around
//! the phase conductor. It becomes an extra conductor at the phase position:
//!
//! ```text
//! GMR_shield = (d_s − T) / 2
//! r_shield   = ρ_cu / (π·((d_s/2)² − (d_s/2 − T)²))
//! ```
//!
//! Shields sit between the phases and the neutrals in the primitive matrix and
//! are eliminated by the Kron reduction like any neutral.

use std::f64::consts::PI;

use carsons_core::constants::TAPE_SHIELD_RESISTIVITY;
use carsons_core::{
    CarsonsError, CarsonsResult, ConcentricNeutralModel, Conductor, ConductorLabel,
    ConductorTable, TapeShield, TapeShieldModel,
};
use tracing::debug;

use super::concentric::load_concentric_table;
use super::{concentric_neutral_distance, GeometryPolicy};

pub fn shield_gmr(shield: &TapeShield) -> f64 {
    (shield.outer_diameter - shield.thickness) / 2.0
}

pub fn shield_resistance(shield: &TapeShield) -> f64 {
    let outer = shield.outer_diameter / 2.0;
    let inner = outer - shield.thickness;
    TAPE_SHIELD_RESISTIVITY / (PI * (outer.powi(2) - inner.powi(2)))
}

fn add_shields<M: TapeShieldModel + ?Sized>(
    model: &M,
    table: &mut ConductorTable,
) -> CarsonsResult<()> {
    let phases: Vec<_> = table.phases().collect();
    for phase in phases {
        let Some(shield) = model.tape_shield(phase.as_str()) else {
            continue;
        };
        if !(shield.thickness > 0.0 && shield.thickness < shield.outer_diameter / 2.0) {
            return Err(CarsonsError::Validation(format!(
                "tape shield on phase {phase}: thickness must be positive and less than the outer radius"
            )));
        }
        let position = table
            .get(&ConductorLabel::Phase(phase))
            .map(|c| c.position)
            .ok_or_else(|| CarsonsError::missing(phase.as_str(), "wire position"))?;

        let gmr = shield_gmr(&shield);
        let resistance = shield_resistance(&shield);
        debug!(%phase, gmr, resistance, "synthesized tape shield");
        table.insert(Conductor::new(
            ConductorLabel::Shield(phase),
            position,
            resistance,
            gmr,
        )?)?;
    }
    Ok(())
}

/// Cable whose phases may carry a tape shield.
#[derive(Debug, Clone)]
pub struct TapeShieldedCable {
    table: ConductorTable,
}

impl TapeShieldedCable {
    /// Shielded cable whose neutrals are ordinary conductors.
    pub fn new<M: TapeShieldModel + ?Sized>(model: &M) -> CarsonsResult<Self> {
        let mut table = ConductorTable::from_model(model)?;
        add_shields(model, &mut table)?;
        Ok(Self { table })
    }

    /// Shielded cable that may also carry concentric neutrals.
    pub fn with_concentric_neutrals<M>(model: &M) -> CarsonsResult<Self>
    where
        M: TapeShieldModel + ConcentricNeutralModel + ?Sized,
    {
        let mut table = load_concentric_table(model)?;
        add_shields(model, &mut table)?;
        Ok(Self { table })
    }
}

impl GeometryPolicy for TapeShieldedCable {
    fn name(&self) -> &'static str {
        "tape-shield"
    }

    fn table(&self) -> &ConductorTable {
        &self.table
    }

    fn distance(&self, i: &Conductor, j: &Conductor) -> CarsonsResult<f64> {
        match (&i.label, &j.label) {
            (ConductorLabel::Shield(shield), ConductorLabel::Phase(phase))
                if shield == phase =>
            {
                Ok(i.gmr)
            }
            (ConductorLabel::Phase(phase), ConductorLabel::Shield(shield))
                if shield == phase =>
            {
                Ok(j.gmr)
            }
            _ => Ok(concentric_neutral_distance(i, j)),
        }
    }
}
