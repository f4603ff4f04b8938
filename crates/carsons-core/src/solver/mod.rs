//! Dense complex linear-system backends used by Kron reduction.

pub mod backend;
pub mod registry;

pub use backend::{FaerSolver, GaussSolver, LinearSystemBackend};
pub use registry::SolverKind;
