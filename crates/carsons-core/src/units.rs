//! Unit-safe wrappers for line parameter quantities.
//!
//! The engine works in SI throughout: metres for geometry, ohms per metre for
//! impedance, hertz for frequency. Test references and field data are usually
//! imperial (feet, inches, mils, ohms per mile), so the conversions live here
//! and nowhere else.
//!
//! All types use `#[repr(transparent)]`, so they have the same layout as `f64`.
//!
//! # Usage
//!
//! ```
//! use carsons_core::units::{Hertz, Meters, OhmsPerMeter};
//!
//! let height = Meters::from_feet(28.0);
//! let r = OhmsPerMeter::from_ohms_per_mile(0.306);
//!
//! assert!((height.value() - 8.5344).abs() < 1e-12);
//! assert!((r.to_ohms_per_mile() - 0.306).abs() < 1e-12);
//! assert!((Hertz(60.0).angular() - 376.99111843077515).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

use crate::constants::{METERS_PER_FOOT, METERS_PER_INCH, METERS_PER_MILE, METERS_PER_MIL};

/// Scaling, display and raw access shared by every quantity.
macro_rules! unit_newtype {
    ($type:ident, $symbol:literal) => {
        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                $type(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                $type(self.0 / rhs)
            }
        }

        impl From<$type> for f64 {
            fn from(value: $type) -> f64 {
                value.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $symbol)
            }
        }

        impl $type {
            pub const fn new(value: f64) -> Self {
                $type(value)
            }

            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}

// =============================================================================
// Frequency
// =============================================================================

/// System frequency in hertz (Hz)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Hertz(pub f64);

unit_newtype!(Hertz, "Hz");

impl Hertz {
    /// Angular frequency ω = 2πf in rad/s
    #[inline]
    pub fn angular(self) -> f64 {
        2.0 * std::f64::consts::PI * self.0
    }
}

impl Default for Hertz {
    fn default() -> Self {
        crate::constants::DEFAULT_FREQUENCY
    }
}

// =============================================================================
// Length
// =============================================================================

/// Length in metres (m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(pub f64);

unit_newtype!(Meters, "m");

impl Meters {
    #[inline]
    pub fn from_feet(feet: f64) -> Self {
        Self(feet * METERS_PER_FOOT)
    }

    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self(inches * METERS_PER_INCH)
    }

    /// Thousandths of an inch, the usual unit for tape thickness
    #[inline]
    pub fn from_mils(mils: f64) -> Self {
        Self(mils * METERS_PER_MIL)
    }

    #[inline]
    pub fn from_miles(miles: f64) -> Self {
        Self(miles * METERS_PER_MILE)
    }

    #[inline]
    pub fn to_feet(self) -> f64 {
        self.0 / METERS_PER_FOOT
    }

    #[inline]
    pub fn to_inches(self) -> f64 {
        self.0 / METERS_PER_INCH
    }
}

// =============================================================================
// Per-length impedance
// =============================================================================

/// Series resistance or reactance per unit length (Ω/m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct OhmsPerMeter(pub f64);

unit_newtype!(OhmsPerMeter, "Ω/m");

impl OhmsPerMeter {
    #[inline]
    pub fn from_ohms_per_mile(value: f64) -> Self {
        Self(value / METERS_PER_MILE)
    }

    #[inline]
    pub fn from_ohms_per_kilometer(value: f64) -> Self {
        Self(value / 1000.0)
    }

    #[inline]
    pub fn to_ohms_per_mile(self) -> f64 {
        self.0 * METERS_PER_MILE
    }

    #[inline]
    pub fn to_ohms_per_kilometer(self) -> f64 {
        self.0 * 1000.0
    }
}
