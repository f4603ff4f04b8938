//! Load-time diagnostics for a conductor table.
//!
//! Loading never fails on a label it cannot classify: the label is dropped
//! from the line and recorded here so callers can surface it.
//!
//! ```
//! use carsons_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.skip_label("pN2", "not a phase or neutral label");
//!
//! assert_eq!(diag.skipped_labels().collect::<Vec<_>>(), vec!["pN2"]);
//! assert_eq!(diag.summary(), "1 skipped label");
//! ```

use serde::Serialize;

/// A conductor label left out of the computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticIssue {
    /// Label as the model spelled it
    pub label: String,
    pub reason: String,
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped '{}': {}", self.label, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_label(&mut self, label: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(DiagnosticIssue {
            label: label.into(),
            reason: reason.into(),
        });
    }

    pub fn skipped_labels(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.label.as_str())
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn summary(&self) -> String {
        match self.warning_count() {
            0 => "no skipped labels".to_string(),
            1 => "1 skipped label".to_string(),
            n => format!("{n} skipped labels"),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}
