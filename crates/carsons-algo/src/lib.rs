//! # carsons-algo: series impedance of lines and cables
//!
//! Computes per-unit-length series impedance of distribution lines from their
//! cross-section geometry with Carson's equations.
//!
//! ```text
//! ConductorModel ──► GeometryPolicy ──► PrimitiveBuilder ──► Ẑ ──► Kron ──► Z ──► Fortescue ──► Z012
//! ```
//!
//! ## Geometries
//!
//! | type | construction |
//! |------|--------------|
//! | [`OverheadLine`] | bare overhead conductors, full Carson series with earth images |
//! | [`ConcentricNeutralCable`] | underground cable with concentric neutral strands |
//! | [`TapeShieldedCable`] | underground cable with a copper tape shield |
//! | [`MultiConductorCable`] | triplex/quadruplex and secondary service cables |
//!
//! ## Example
//!
//! ```
//! use carsons_algo::{calculate_impedance, OverheadLine};
//! use carsons_core::units::OhmsPerMeter;
//! use carsons_core::{LineGeometry, Phase};
//!
//! // IEEE 13-node configuration 601, SI units
//! let line = LineGeometry::new()
//!     .with_conductor("A", 0.000115575, 0.00947938, (0.762, 8.5344))
//!     .with_conductor("B", 0.000115575, 0.00947938, (0.0, 8.5344))
//!     .with_conductor("C", 0.000115575, 0.00947938, (2.1336, 8.5344))
//!     .with_conductor("N", 0.000367852, 0.00248107, (1.2192, 7.3152));
//!
//! let z = calculate_impedance(&OverheadLine::new(&line)?)?;
//! let z_aa = OhmsPerMeter(z.get(Phase::A, Phase::A).unwrap().re).to_ohms_per_mile();
//! assert!((z_aa - 0.3465).abs() < 1e-3);
//!
//! let seq = z.sequence()?;
//! assert!(seq.zero().norm() > seq.positive().norm());
//! # Ok::<(), carsons_core::CarsonsError>(())
//! ```

pub mod geometry;
pub mod impedance;
pub mod kron;
pub mod primitive;
pub mod sequence;
pub mod series;

pub use geometry::{
    ConcentricNeutralCable, ConductorSlot, GeometryPolicy, MultiConductorCable, OverheadLine,
    TapeShieldedCable,
};
#[cfg(feature = "parallel")]
pub use impedance::calculate_impedances;
pub use impedance::{
    calculate_impedance, calculate_impedance_with, convert_geometric_model, PhaseImpedance,
};
pub use kron::{kron_reduce, reduce_matrix};
pub use primitive::{build_primitive, PrimitiveBuilder, PrimitiveImpedance};
pub use sequence::{
    calculate_sequence_impedance_matrix, calculate_sequence_impedances, Matrix3,
    SequenceImpedance,
};
pub use series::{CarsonTerms, SeriesKind, SeriesPolicy, Truncation};
