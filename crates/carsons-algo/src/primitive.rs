//! # Primitive impedance matrix
//!
//! The primitive matrix Ẑ holds the self and mutual series impedance of every
//! modelled conductor, earth return included, before any neutral is
//! eliminated. Entry (i, j) is R_ij + jX_ij in Ω/m.
//!
//! ## Carson's equations
//!
//! With ω = 2πf, μ = μ₀ and the series P, Q from [`crate::series`]:
//!
//! ```text
//! R_ii = r_i + (μω/π)·P_ii                 X_ii = (ωμ/2π)·ln(2h_i / GMR_i) + (μω/π)·Q_ii
//! R_ij =       (μω/π)·P_ij                 X_ij = (ωμ/2π)·ln(D_ij / d_ij)  + (μω/π)·Q_ij
//! ```
//!
//! D_ij is the distance from conductor i to the earth image of conductor j and
//! d_ij the spacing given by the geometry.
//!
//! With one P term and two Q terms the image distance cancels out of the
//! reactance:
//!
//! ```text
//! X = (ωμ/2π)·(−ln d − ln √(ωμ/ρ) + 2·Q₀ + ln 2)        d = GMR on the diagonal
//! ```
//!
//! which is what [`SeriesPolicy::Modified`] evaluates. It does not depend on
//! height, so it also serves buried cables.

use std::f64::consts::{LN_2, PI};

use carsons_core::constants::{EARTH_RESISTIVITY, MU_0};
use carsons_core::{
    CarsonsError, CarsonsResult, Complex64, ComplexMatrix, Conductor, ConductorLabel, Hertz,
    LinearSystemBackend, PhaseLayout,
};
use tracing::{debug, trace};

use crate::geometry::{ConductorSlot, GeometryPolicy};
use crate::impedance::PhaseImpedance;
use crate::kron;
use crate::series::{p_series, q_series, CarsonTerms, SeriesArgs, SeriesKind, SeriesPolicy, Truncation};

// ============================================================================
// PRIMITIVE MATRIX
// ============================================================================

/// Ẑ together with the conductor behind each row.
#[derive(Debug, Clone)]
pub struct PrimitiveImpedance {
    matrix: ComplexMatrix,
    slots: Vec<ConductorSlot>,
    layout: PhaseLayout,
}

impl PrimitiveImpedance {
    pub fn matrix(&self) -> &ComplexMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> ComplexMatrix {
        self.matrix
    }

    pub fn slots(&self) -> &[ConductorSlot] {
        &self.slots
    }

    pub fn layout(&self) -> PhaseLayout {
        self.layout
    }

    pub fn dimension(&self) -> usize {
        self.slots.len()
    }

    /// Number of leading phase slots; the Kron partition boundary.
    pub fn phase_count(&self) -> usize {
        self.slots.iter().take_while(|s| s.label.is_phase()).count()
    }

    pub fn index_of(&self, label: &ConductorLabel) -> Option<usize> {
        self.slots.iter().position(|s| s.label == *label)
    }

    pub fn get(&self, row: &ConductorLabel, col: &ConductorLabel) -> Option<Complex64> {
        Some(self.matrix.get(self.index_of(row)?, self.index_of(col)?))
    }

    /// Kron-reduce with the default solver.
    pub fn reduce(&self) -> CarsonsResult<PhaseImpedance> {
        kron::kron_reduce(self, &carsons_core::GaussSolver::default())
    }

    pub fn reduce_with(&self, backend: &dyn LinearSystemBackend) -> CarsonsResult<PhaseImpedance> {
        kron::kron_reduce(self, backend)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Evaluates Carson's equations for a geometry.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveBuilder {
    frequency: Hertz,
}

impl PrimitiveBuilder {
    pub fn new(frequency: Hertz) -> Self {
        Self { frequency }
    }

    /// Builder at the geometry's own frequency
    pub fn for_policy<P: GeometryPolicy + ?Sized>(policy: &P) -> Self {
        Self::new(policy.frequency())
    }

    pub fn frequency(&self) -> Hertz {
        self.frequency
    }

    /// Build Ẑ for `policy`.
    ///
    /// ```text
    /// STEP 1: ORDER SLOTS      policy ordering, phases first
    /// STEP 2: RESOLVE          slot -> conductor (absent phases stay empty)
    /// STEP 3: VALIDATE         heights when the image series is used
    /// STEP 4: FILL             upper triangle, mirrored
    /// ```
    pub fn build<P: GeometryPolicy + ?Sized>(&self, policy: &P) -> CarsonsResult<PrimitiveImpedance> {
        if !(self.frequency.is_finite() && self.frequency.value() > 0.0) {
            return Err(CarsonsError::Validation(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }

        // ====================================================================
        // STEP 1-2: ORDER AND RESOLVE
        // ====================================================================
        let table = policy.table();
        let layout = table.layout()?;
        let slots = policy.ordering()?;
        let conductors: Vec<Option<&Conductor>> = slots
            .iter()
            .map(|slot| {
                if !slot.present {
                    return Ok(None);
                }
                table
                    .get(&slot.label)
                    .map(Some)
                    .ok_or_else(|| CarsonsError::missing(slot.label.to_string(), "conductor"))
            })
            .collect::<CarsonsResult<_>>()?;

        let series = policy.series();
        debug!(
            geometry = policy.name(),
            conductors = slots.len(),
            frequency = self.frequency.value(),
            ?series,
            "building primitive impedance matrix"
        );

        // ====================================================================
        // STEP 3: VALIDATE
        // ====================================================================
        if let SeriesPolicy::Image(_) = series {
            for conductor in conductors.iter().flatten() {
                if conductor.position.y <= 0.0 {
                    return Err(CarsonsError::Validation(format!(
                        "conductor '{}' must be above ground (y = {}) for the image series",
                        conductor.label, conductor.position.y
                    )));
                }
            }
        }

        // ====================================================================
        // STEP 4: FILL
        // ====================================================================
        let n = slots.len();
        let mut matrix = ComplexMatrix::zeros(n, n);
        for i in 0..n {
            let Some(ci) = conductors[i] else { continue };
            for j in i..n {
                let Some(cj) = conductors[j] else { continue };
                let z = if i == j {
                    self.self_impedance(policy, ci, series)?
                } else {
                    self.mutual_impedance(policy, ci, cj, series)?
                };
                trace!(row = %ci.label, col = %cj.label, re = z.re, im = z.im, "primitive entry");
                matrix.set(i, j, z);
                matrix.set(j, i, z);
            }
        }

        Ok(PrimitiveImpedance {
            matrix,
            slots,
            layout,
        })
    }

    fn omega(&self) -> f64 {
        self.frequency.angular()
    }

    /// μω/π, the factor on P and Q
    fn earth_factor(&self) -> f64 {
        MU_0 * self.omega() / PI
    }

    /// ωμ/2π, the factor on the logarithmic terms
    fn log_factor(&self) -> f64 {
        self.omega() * MU_0 / (2.0 * PI)
    }

    fn carson_args(&self, image_distance: f64, theta: f64) -> SeriesArgs {
        SeriesArgs {
            k: image_distance * (self.omega() * MU_0 / EARTH_RESISTIVITY).sqrt(),
            theta,
        }
    }

    /// Reactance with the image distance cancelled, for spacing `d`.
    fn modified_reactance(&self, d: f64) -> f64 {
        let q0: f64 = CarsonTerms::leading(SeriesKind::Q).sum();
        let ratio = (self.omega() * MU_0 / EARTH_RESISTIVITY).sqrt();
        self.log_factor() * (-d.ln() - ratio.ln() + 2.0 * q0 + LN_2)
    }

    fn modified_resistance(&self) -> f64 {
        let p0: f64 = CarsonTerms::leading(SeriesKind::P).sum();
        self.earth_factor() * p0
    }

    fn image_terms(&self, args: SeriesArgs, truncation: Truncation) -> (f64, f64) {
        (
            self.earth_factor() * p_series(args, truncation.p_terms()),
            self.earth_factor() * q_series(args, truncation.q_terms()),
        )
    }

    fn self_impedance<P: GeometryPolicy + ?Sized>(
        &self,
        policy: &P,
        conductor: &Conductor,
        series: SeriesPolicy,
    ) -> CarsonsResult<Complex64> {
        let r = policy.self_resistance(conductor)?;
        let gmr = policy.self_gmr(conductor)?;
        if !(gmr.is_finite() && gmr > 0.0) {
            return Err(CarsonsError::Validation(format!(
                "self GMR of '{}' must be positive, got {gmr}",
                conductor.label
            )));
        }

        Ok(match series {
            SeriesPolicy::Modified => {
                Complex64::new(r + self.modified_resistance(), self.modified_reactance(gmr))
            }
            SeriesPolicy::Image(truncation) => {
                let image = 2.0 * conductor.position.y;
                let (dr, dx) = self.image_terms(self.carson_args(image, 0.0), truncation);
                Complex64::new(r + dr, self.log_factor() * (image / gmr).ln() + dx)
            }
        })
    }

    fn mutual_impedance<P: GeometryPolicy + ?Sized>(
        &self,
        policy: &P,
        i: &Conductor,
        j: &Conductor,
        series: SeriesPolicy,
    ) -> CarsonsResult<Complex64> {
        let d = policy.distance(i, j)?;
        if !(d.is_finite() && d > 0.0) {
            return Err(CarsonsError::Validation(format!(
                "conductors '{}' and '{}' must be a positive distance apart, got {d}",
                i.label, j.label
            )));
        }

        Ok(match series {
            SeriesPolicy::Modified => {
                Complex64::new(self.modified_resistance(), self.modified_reactance(d))
            }
            SeriesPolicy::Image(truncation) => {
                let image = i.position.image_distance_to(&j.position);
                let theta =
                    ((j.position.x - i.position.x).abs() / (i.position.y + j.position.y)).atan();
                let (dr, dx) = self.image_terms(self.carson_args(image, theta), truncation);
                Complex64::new(dr, self.log_factor() * (image / d).ln() + dx)
            }
        })
    }
}

/// Build Ẑ for a geometry at its own frequency.
pub fn build_primitive<P: GeometryPolicy + ?Sized>(policy: &P) -> CarsonsResult<PrimitiveImpedance> {
    PrimitiveBuilder::for_policy(policy).build(policy)
}
