//! # Carson's earth-return series
//!
//! Carson (1926) expressed the earth-return correction to the impedance of a
//! conductor above lossy ground as two infinite series, P (resistive) and
//! Q (reactive), in the parameters
//!
//! ```text
//! k = D · √(ωμ/ρ)          D: distance to the earth image
//! θ = atan(|Δx| / (h_i + h_j))
//! ```
//!
//! The corrections are then ΔR = (μω/π)·P and ΔX = (μω/π)·Q.
//!
//! Only the leading terms matter at power frequencies. The six P terms and
//! seven Q terms below are the ones distribution engineering texts carry;
//! [`Truncation`] chooses how many of them are summed.
//!
//! ```text
//! P: π/8, −k/(3√2)·cos θ, k²/16·(0.6728 + ln(2/k))·cos 2θ, k²/16·θ·sin 2θ,
//!    k³/(45√2)·cos 3θ, −π·k⁴·cos 4θ/1536
//! Q: −0.0386, ½·ln(2/k), k/(3√2)·cos θ, −π·k²/64·cos 2θ, k³/(45√2)·cos 3θ,
//!    −k⁴/384·θ·sin 4θ, −k⁴/384·cos 4θ·(ln(2/k) + 1.0895)
//! ```
//!
//! ## References
//!
//! - **Carson (1926)**: "Wave propagation in overhead wires with ground return",
//!   Bell System Technical Journal 5(4), 539-554
//! - **Kersting**: "Distribution System Modeling and Analysis", Chapter 4

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::iter::FusedIterator;
use std::str::FromStr;

use carsons_core::{CarsonsError, CarsonsResult};

/// Which of the two Carson series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Resistive correction
    P,
    /// Reactive correction
    Q,
}

impl SeriesKind {
    pub const fn max_terms(self) -> usize {
        match self {
            SeriesKind::P => 6,
            SeriesKind::Q => 7,
        }
    }

    /// Term `index` of the series. The constant leading term needs no
    /// arguments; every later one does.
    fn term(self, index: usize, args: Option<SeriesArgs>) -> Option<f64> {
        if index == 0 {
            return Some(match self {
                SeriesKind::P => PI / 8.0,
                SeriesKind::Q => -0.0386,
            });
        }

        let SeriesArgs { k, theta } = args?;
        let log_term = (2.0 / k).ln();
        // 1/(3√2) and 1/(45√2)
        let c1 = FRAC_1_SQRT_2 / 3.0;
        let c3 = FRAC_1_SQRT_2 / 45.0;

        let value = match (self, index) {
            (SeriesKind::P, 1) => -c1 * k * theta.cos(),
            (SeriesKind::P, 2) => k.powi(2) / 16.0 * (0.6728 + log_term) * (2.0 * theta).cos(),
            (SeriesKind::P, 3) => k.powi(2) / 16.0 * theta * (2.0 * theta).sin(),
            (SeriesKind::P, 4) => c3 * k.powi(3) * (3.0 * theta).cos(),
            (SeriesKind::P, 5) => -PI * k.powi(4) * (4.0 * theta).cos() / 1536.0,
            (SeriesKind::Q, 1) => 0.5 * log_term,
            (SeriesKind::Q, 2) => c1 * k * theta.cos(),
            (SeriesKind::Q, 3) => -PI * k.powi(2) / 64.0 * (2.0 * theta).cos(),
            (SeriesKind::Q, 4) => c3 * k.powi(3) * (3.0 * theta).cos(),
            (SeriesKind::Q, 5) => -k.powi(4) / 384.0 * theta * (4.0 * theta).sin(),
            (SeriesKind::Q, 6) => -k.powi(4) / 384.0 * (4.0 * theta).cos() * (log_term + 1.0895),
            _ => return None,
        };
        Some(value)
    }
}

/// Carson parameters for one conductor pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesArgs {
    pub k: f64,
    /// radians
    pub theta: f64,
}

/// Bounded, restartable iterator over the terms of a Carson series.
///
/// Terms are computed on demand, so `take(n)` never evaluates term `n`.
///
/// ```
/// use carsons_algo::series::{CarsonTerms, SeriesArgs, SeriesKind};
///
/// let args = SeriesArgs { k: 0.05, theta: 0.1 };
/// assert_eq!(CarsonTerms::new(SeriesKind::Q, args).count(), 7);
///
/// let leading: f64 = CarsonTerms::leading(SeriesKind::P).sum();
/// assert_eq!(leading, std::f64::consts::PI / 8.0);
/// ```
#[derive(Debug, Clone)]
pub struct CarsonTerms {
    kind: SeriesKind,
    args: Option<SeriesArgs>,
    next: usize,
    end: usize,
}

impl CarsonTerms {
    pub fn new(kind: SeriesKind, args: SeriesArgs) -> Self {
        Self {
            kind,
            args: Some(args),
            next: 0,
            end: kind.max_terms(),
        }
    }

    /// Only the constant leading term, which needs no geometry.
    pub fn leading(kind: SeriesKind) -> Self {
        Self {
            kind,
            args: None,
            next: 0,
            end: 1,
        }
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for CarsonTerms {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.end {
            return None;
        }
        let term = self.kind.term(self.next, self.args)?;
        self.next += 1;
        Some(term)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CarsonTerms {}
impl FusedIterator for CarsonTerms {}

/// Sum of the first `terms` P terms
pub fn p_series(args: SeriesArgs, terms: usize) -> f64 {
    CarsonTerms::new(SeriesKind::P, args).take(terms).sum()
}

/// Sum of the first `terms` Q terms
pub fn q_series(args: SeriesArgs, terms: usize) -> f64 {
    CarsonTerms::new(SeriesKind::Q, args).take(terms).sum()
}

/// Number of P and Q terms summed by the image-distance series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    p_terms: usize,
    q_terms: usize,
}

impl Truncation {
    /// One P term and two Q terms (Kersting's modified equations)
    pub const MODIFIED: Truncation = Truncation {
        p_terms: 1,
        q_terms: 2,
    };

    /// Every tabulated term
    pub const FULL: Truncation = Truncation {
        p_terms: SeriesKind::P.max_terms(),
        q_terms: SeriesKind::Q.max_terms(),
    };

    pub fn new(p_terms: usize, q_terms: usize) -> CarsonsResult<Self> {
        let p_max = SeriesKind::P.max_terms();
        let q_max = SeriesKind::Q.max_terms();
        if !(1..=p_max).contains(&p_terms) || !(1..=q_max).contains(&q_terms) {
            return Err(CarsonsError::Validation(format!(
                "truncation must use 1..={p_max} P terms and 1..={q_max} Q terms, got {p_terms}/{q_terms}"
            )));
        }
        Ok(Self { p_terms, q_terms })
    }

    pub fn p_terms(self) -> usize {
        self.p_terms
    }

    pub fn q_terms(self) -> usize {
        self.q_terms
    }
}

impl Default for Truncation {
    fn default() -> Self {
        Truncation::MODIFIED
    }
}

impl FromStr for Truncation {
    type Err = CarsonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modified" => Ok(Truncation::MODIFIED),
            "full" => Ok(Truncation::FULL),
            other => Err(CarsonsError::Validation(format!(
                "unknown truncation '{other}'; supported values: modified, full"
            ))),
        }
    }
}

/// How a geometry evaluates the earth-return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPolicy {
    /// Leading P term and two Q terms, with the image distance cancelled out
    /// of the reactance. Independent of conductor height.
    Modified,
    /// Full Carson expressions with explicit earth images, summed to the
    /// given truncation. Needs every conductor above ground.
    Image(Truncation),
}
