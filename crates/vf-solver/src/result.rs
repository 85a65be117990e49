//! Flash result value object and derived views.

use crate::balance::MaterialBalance;
use crate::rachford_rice::PhaseRegime;
use serde::{Deserialize, Serialize};
use vf_thermo::KValueSet;

/// Conditions the K-values were evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashConditions {
    pub temperature_c: f64,
    pub pressure_mmhg: f64,
}

/// Outcome of one flash calculation.
///
/// Built once by the flash routines and never mutated afterwards. All vectors
/// are index-aligned with [`FlashResult::ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashResult {
    /// `None` when the flash was run on caller-supplied K-values
    pub(crate) conditions: Option<FlashConditions>,
    pub(crate) ids: Vec<String>,
    pub(crate) feed: Vec<f64>,
    pub(crate) k_values: KValueSet,
    pub(crate) psi: f64,
    pub(crate) regime: PhaseRegime,
    pub(crate) liquid: Vec<f64>,
    pub(crate) vapor: Vec<f64>,
    pub(crate) balance: MaterialBalance,
    pub(crate) iterations: usize,
    pub(crate) residual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Vapor,
    Liquid,
}

/// One outlet of the flash drum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStream {
    pub phase: Phase,
    /// Molar flow in the feed's flow units
    pub flow: f64,
    /// (component id, mole fraction) in feed order
    pub composition: Vec<(String, f64)>,
    pub temperature_c: Option<f64>,
    pub pressure_mmhg: Option<f64>,
}

impl FlashResult {
    pub fn conditions(&self) -> Option<FlashConditions> {
        self.conditions
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Feed mole fractions z.
    pub fn feed(&self) -> &[f64] {
        &self.feed
    }

    pub fn k_values(&self) -> &KValueSet {
        &self.k_values
    }

    /// Vapor fraction ψ = V/F.
    pub fn psi(&self) -> f64 {
        self.psi
    }

    pub fn vapor_fraction(&self) -> f64 {
        self.psi
    }

    pub fn liquid_fraction(&self) -> f64 {
        1.0 - self.psi
    }

    pub fn regime(&self) -> PhaseRegime {
        self.regime
    }

    pub fn liquid(&self) -> &[f64] {
        &self.liquid
    }

    pub fn vapor(&self) -> &[f64] {
        &self.vapor
    }

    pub fn liquid_mole_fraction(&self, id: &str) -> Option<f64> {
        self.index_of(id).map(|i| self.liquid[i])
    }

    pub fn vapor_mole_fraction(&self, id: &str) -> Option<f64> {
        self.index_of(id).map(|i| self.vapor[i])
    }

    pub fn feed_flow(&self) -> f64 {
        self.balance.feed_flow
    }

    pub fn vapor_flow(&self) -> f64 {
        self.balance.vapor_flow
    }

    pub fn liquid_flow(&self) -> f64 {
        self.balance.liquid_flow
    }

    pub fn balance(&self) -> &MaterialBalance {
        &self.balance
    }

    /// Root-finder iterations (0 for single-phase results).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Rachford-Rice residual at the returned ψ.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn is_two_phase(&self) -> bool {
        self.regime == PhaseRegime::TwoPhase
    }

    /// Relative volatility of component `i` over `j`: `(y_i/x_i) / (y_j/x_j)`.
    ///
    /// Returns 1.0 when either index is out of range or a ratio is undefined.
    pub fn separation_factor(&self, i: usize, j: usize) -> f64 {
        let ratio = |k: usize| -> Option<f64> {
            let x = *self.liquid.get(k)?;
            let y = *self.vapor.get(k)?;
            (x > 0.0).then(|| y / x)
        };
        match (ratio(i), ratio(j)) {
            (Some(a), Some(b)) if b > 0.0 && (a / b).is_finite() => a / b,
            _ => 1.0,
        }
    }

    /// Vapor and liquid outlets, in that order. A stream with zero flow is
    /// still listed so callers can index the pair positionally.
    pub fn product_streams(&self) -> [ProductStream; 2] {
        [
            self.stream(Phase::Vapor, self.balance.vapor_flow, &self.vapor),
            self.stream(Phase::Liquid, self.balance.liquid_flow, &self.liquid),
        ]
    }

    fn stream(&self, phase: Phase, flow: f64, fractions: &[f64]) -> ProductStream {
        ProductStream {
            phase,
            flow,
            composition: self.ids.iter().cloned().zip(fractions.iter().copied()).collect(),
            temperature_c: self.conditions.map(|c| c.temperature_c),
            pressure_mmhg: self.conditions.map(|c| c.pressure_mmhg),
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }
}
