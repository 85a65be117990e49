//! Rachford-Rice vapor fraction solver.

use crate::error::{FlashError, SolverResult};
use crate::root::{NewtonRaphson, RootOptions, ScalarRootFinder};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vf_core::numeric::{FRACTION_SUM_EPS, clamp_unit};

/// Phase state implied by the solved vapor fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseRegime {
    /// 0 < ψ < 1
    TwoPhase,
    /// ψ = 0: the feed stays liquid
    SubcooledLiquid,
    /// ψ = 1: the feed is fully vaporized
    SuperheatedVapor,
}

impl PhaseRegime {
    fn from_psi(psi: f64) -> Self {
        if psi <= 0.0 {
            PhaseRegime::SubcooledLiquid
        } else if psi >= 1.0 {
            PhaseRegime::SuperheatedVapor
        } else {
            PhaseRegime::TwoPhase
        }
    }
}

/// Solved vapor fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaporFractionSolution {
    /// Vapor fraction ψ = V/F, in [0, 1]
    pub psi: f64,
    pub regime: PhaseRegime,
    /// Root-finder iterations (0 for the single-phase short-circuits)
    pub iterations: usize,
    /// Rachford-Rice residual f(ψ)
    pub residual: f64,
}

/// Rachford-Rice solver configuration.
///
/// Cheap to clone and shareable across threads; all knobs are per-instance.
#[derive(Debug, Clone)]
pub struct RachfordRice {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub initial_guess: f64,
    finder: Arc<dyn ScalarRootFinder>,
}

impl Default for RachfordRice {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_guess: 0.5,
            finder: Arc::new(NewtonRaphson::default()),
        }
    }
}

impl RachfordRice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_finder(mut self, finder: Arc<dyn ScalarRootFinder>) -> Self {
        self.finder = finder;
        self
    }

    pub fn finder(&self) -> &dyn ScalarRootFinder {
        self.finder.as_ref()
    }

    /// Solve `Σ z_i (K_i - 1) / (1 + ψ (K_i - 1)) = 0` for ψ in [0, 1].
    ///
    /// If every `K_i >= 1` the feed is all vapor (ψ = 1); if every `K_i <= 1` it
    /// is all liquid (ψ = 0). Neither case is an error.
    pub fn solve(&self, z: &[f64], k: &[f64]) -> SolverResult<VaporFractionSolution> {
        validate_inputs(z, k)?;
        let z = DVector::from_column_slice(z);
        let k_minus_one = DVector::from_iterator(k.len(), k.iter().map(|ki| ki - 1.0));

        if k_minus_one.iter().all(|d| *d >= 0.0) {
            tracing::debug!("all K >= 1, feed is fully vaporized");
            return Ok(VaporFractionSolution {
                psi: 1.0,
                regime: PhaseRegime::SuperheatedVapor,
                iterations: 0,
                residual: residual_terms(1.0, &z, &k_minus_one),
            });
        }
        if k_minus_one.iter().all(|d| *d <= 0.0) {
            tracing::debug!("all K <= 1, feed stays liquid");
            return Ok(VaporFractionSolution {
                psi: 0.0,
                regime: PhaseRegime::SubcooledLiquid,
                iterations: 0,
                residual: residual_terms(0.0, &z, &k_minus_one),
            });
        }

        let options = RootOptions {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            initial_guess: self.initial_guess,
            lower: 0.0,
            upper: 1.0,
        };
        let f = |psi: f64| residual_terms(psi, &z, &k_minus_one);
        let report = self.finder.solve(&f, &options)?;

        let psi = clamp_unit(report.root);
        tracing::debug!(
            finder = self.finder.name(),
            psi,
            iterations = report.iterations,
            residual = report.residual,
            "Rachford-Rice converged"
        );

        Ok(VaporFractionSolution {
            psi,
            regime: PhaseRegime::from_psi(psi),
            iterations: report.iterations,
            residual: report.residual,
        })
    }
}

/// Rachford-Rice residual f(ψ) for index-aligned feed fractions and K-values.
pub fn residual(psi: f64, z: &[f64], k: &[f64]) -> f64 {
    let z = DVector::from_column_slice(z);
    let k_minus_one = DVector::from_iterator(k.len(), k.iter().map(|ki| ki - 1.0));
    residual_terms(psi, &z, &k_minus_one)
}

fn residual_terms(psi: f64, z: &DVector<f64>, k_minus_one: &DVector<f64>) -> f64 {
    let denom = k_minus_one.map(|d| 1.0 + psi * d);
    z.component_mul(k_minus_one).component_div(&denom).sum()
}

fn validate_inputs(z: &[f64], k: &[f64]) -> SolverResult<()> {
    if z.is_empty() {
        return Err(FlashError::invalid("no components"));
    }
    if z.len() != k.len() {
        return Err(FlashError::invalid(format!(
            "{} mole fractions but {} K-values",
            z.len(),
            k.len()
        )));
    }
    if let Some(bad) = z.iter().find(|zi| !zi.is_finite() || **zi < 0.0) {
        return Err(FlashError::invalid(format!("invalid mole fraction {bad}")));
    }
    let sum: f64 = z.iter().sum();
    if (sum - 1.0).abs() > FRACTION_SUM_EPS {
        return Err(FlashError::invalid(format!(
            "mole fractions sum to {sum}, expected 1"
        )));
    }
    if let Some(bad) = k.iter().find(|ki| !ki.is_finite() || **ki <= 0.0) {
        return Err(FlashError::invalid(format!(
            "K-values must be positive, got {bad}"
        )));
    }
    Ok(())
}
