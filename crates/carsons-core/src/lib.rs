//! # carsons-core: conductor models and shared numerics
//!
//! Data structures the impedance engine in `carsons-algo` is built on:
//!
//! - [`model`] - the [`ConductorModel`] contract and the serde-backed [`LineGeometry`]
//! - [`phase`] - phase/neutral/shield labels and the primary/secondary layout
//! - [`conductor`] - validated conductor records and the per-computation [`ConductorTable`]
//! - [`matrix`] - a small dense [`ComplexMatrix`]
//! - [`solver`] - complex linear-system backends (hand-written LU, faer)
//! - [`units`], [`constants`] - SI newtypes, imperial conversions, physical constants
//! - [`error`], [`diagnostics`] - [`CarsonsError`] and load-time warnings
//!
//! Everything is in SI units: metres, ohms per metre, hertz.

pub mod conductor;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod matrix;
pub mod model;
pub mod phase;
pub mod solver;
pub mod units;

pub use conductor::{Conductor, ConductorTable, Position};
pub use diagnostics::{DiagnosticIssue, Diagnostics};
pub use error::{CarsonsError, CarsonsResult};
pub use matrix::ComplexMatrix;
pub use model::{
    ConcentricNeutral, ConcentricNeutralModel, ConductorModel, LineGeometry, MultiConductorModel,
    TapeShield, TapeShieldModel,
};
pub use num_complex::Complex64;
pub use phase::{ConductorLabel, Phase, PhaseLayout};
pub use solver::{FaerSolver, GaussSolver, LinearSystemBackend, SolverKind};
pub use units::{Hertz, Meters, OhmsPerMeter};
