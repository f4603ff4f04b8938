//! Physical constants and unit factors.

use crate::units::Hertz;

/// Earth resistivity ρ (Ω·m)
pub const EARTH_RESISTIVITY: f64 = 100.0;

/// Permeability of free space μ₀ (H/m)
pub const MU_0: f64 = 4.0 * std::f64::consts::PI * 1e-7;

/// Resistivity of annealed copper at 50 °C (Ω·m), used for tape shields
pub const TAPE_SHIELD_RESISTIVITY: f64 = 2.3715e-8;

/// Frequency assumed when a model does not specify one
pub const DEFAULT_FREQUENCY: Hertz = Hertz(60.0);

pub const METERS_PER_FOOT: f64 = 0.3048;
pub const METERS_PER_INCH: f64 = 0.0254;
pub const METERS_PER_MIL: f64 = 2.54e-5;
pub const METERS_PER_MILE: f64 = 1609.344;
