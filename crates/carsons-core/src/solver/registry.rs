use super::backend::{FaerSolver, GaussSolver, LinearSystemBackend};
use crate::error::CarsonsError;
use std::str::FromStr;
use std::sync::Arc;

/// Simple registry of available solvers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverKind {
    #[default]
    Gauss,
    Faer,
}

impl FromStr for SolverKind {
    type Err = CarsonsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "gauss" | "default" => Ok(SolverKind::Gauss),
            "faer" => Ok(SolverKind::Faer),
            other => Err(CarsonsError::Validation(format!(
                "unknown solver '{}'; supported values: {}",
                other,
                SolverKind::available().join(", ")
            ))),
        }
    }
}

impl SolverKind {
    pub fn build_solver(self) -> Arc<dyn LinearSystemBackend> {
        match self {
            SolverKind::Gauss => Arc::new(GaussSolver::default()),
            SolverKind::Faer => Arc::new(FaerSolver),
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["gauss", "faer"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Gauss => "gauss",
            SolverKind::Faer => "faer",
        }
    }
}
