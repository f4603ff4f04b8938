//! Unified error type for impedance calculations
//!
//! Every fallible operation in the workspace returns [`CarsonsResult`]. Errors
//! are local to a single computation: nothing is retried and no partial
//! matrices are handed back.
//!
//! # Example
//!
//! ```
//! use carsons_core::{CarsonsError, CarsonsResult};
//!
//! fn require_positive(label: &str, gmr: f64) -> CarsonsResult<f64> {
//!     if gmr > 0.0 {
//!         Ok(gmr)
//!     } else {
//!         Err(CarsonsError::Validation(format!("gmr of '{label}' must be positive")))
//!     }
//! }
//!
//! assert!(require_positive("A", 0.0).is_err());
//! ```

use thiserror::Error;

/// Error type for all conductor-model and impedance operations.
#[derive(Error, Debug)]
pub enum CarsonsError {
    /// I/O errors while reading a geometry file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A conductor referenced by the model lacks a required attribute
    #[error("Missing {field} for conductor '{label}'")]
    MissingData { label: String, field: &'static str },

    /// A label rejected by a validated constructor or `FromStr`
    #[error("Invalid conductor label: {0}")]
    InvalidLabel(String),

    /// The neutral partition of a primitive matrix cannot be eliminated
    #[error("Singular reduction: {0}")]
    SingularReduction(String),
}

/// Convenience type alias for Results using CarsonsError.
pub type CarsonsResult<T> = Result<T, CarsonsError>;

impl CarsonsError {
    pub fn missing(label: impl Into<String>, field: &'static str) -> Self {
        CarsonsError::MissingData {
            label: label.into(),
            field,
        }
    }
}

// JSON parsing errors
impl From<serde_json::Error> for CarsonsError {
    fn from(err: serde_json::Error) -> Self {
        CarsonsError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for CarsonsError {
    fn from(err: toml::de::Error) -> Self {
        CarsonsError::Parse(err.to_string())
    }
}
