//! Isothermal flash orchestration.
//!
//! `feed → K-values → ψ → (x, y) → material balance`, in a single pass. Any
//! stage error is returned as-is; there is no retry.

use crate::balance::verify_material_balance;
use crate::error::SolverResult;
use crate::phases::{NormalizationPolicy, resolve_phases};
use crate::rachford_rice::RachfordRice;
use crate::result::{FlashConditions, FlashResult};
use crate::root::RootMethod;
use serde::{Deserialize, Serialize};
use vf_thermo::{Antoine, FeedState, KValueCalculator, KValueSet, NonIdealCorrections, VaporPressureModel};

/// Per-call solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashOptions {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub initial_guess: f64,
    pub normalization: NormalizationPolicy,
    pub method: RootMethod,
    /// Activity / fugacity factors applied to model K-values, index-aligned with the feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrections: Option<NonIdealCorrections>,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_guess: 0.5,
            normalization: NormalizationPolicy::default(),
            method: RootMethod::default(),
            corrections: None,
        }
    }
}

impl FlashOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationPolicy) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_corrections(mut self, corrections: NonIdealCorrections) -> Self {
        self.corrections = Some(corrections);
        self
    }

    pub fn rachford_rice(&self) -> RachfordRice {
        RachfordRice::new()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_initial_guess(self.initial_guess)
            .with_finder(self.method.finder())
    }
}

/// Ideal flash using the Antoine vapor pressure model.
pub fn flash(feed: &FeedState, options: &FlashOptions) -> SolverResult<FlashResult> {
    flash_with_model(feed, &Antoine, options)
}

/// Flash with any vapor pressure model.
pub fn flash_with_model(
    feed: &FeedState,
    model: &dyn VaporPressureModel,
    options: &FlashOptions,
) -> SolverResult<FlashResult> {
    let _span = tracing::debug_span!(
        "flash",
        model = model.name(),
        t_c = feed.temperature_c(),
        p_mmhg = feed.pressure_mmhg()
    )
    .entered();

    let k_values = KValueCalculator::new(model)
        .with_corrections(options.corrections.as_ref())
        .compute(feed.composition(), feed.temperature(), feed.pressure())?;

    let conditions = FlashConditions {
        temperature_c: feed.temperature_c(),
        pressure_mmhg: feed.pressure_mmhg(),
    };
    split(
        Some(conditions),
        &feed.composition().fractions(),
        k_values,
        feed.flow(),
        options,
    )
}

/// Flash on caller-supplied K-values, skipping the vapor pressure stage.
///
/// `options.corrections` is not applied here; the K-values are taken as final.
pub fn flash_with_k_values(
    z: &[f64],
    k_values: &KValueSet,
    feed_flow: f64,
    options: &FlashOptions,
) -> SolverResult<FlashResult> {
    split(None, z, k_values.clone(), feed_flow, options)
}

fn split(
    conditions: Option<FlashConditions>,
    z: &[f64],
    k_values: KValueSet,
    feed_flow: f64,
    options: &FlashOptions,
) -> SolverResult<FlashResult> {
    let solution = options.rachford_rice().solve(z, k_values.values())?;
    let phases = resolve_phases(solution.psi, z, k_values.values(), options.normalization)?;
    let balance =
        verify_material_balance(feed_flow, z, solution.psi, &phases.liquid, &phases.vapor)?;

    tracing::debug!(
        psi = solution.psi,
        regime = ?solution.regime,
        iterations = solution.iterations,
        "flash complete"
    );

    Ok(FlashResult {
        conditions,
        ids: k_values.ids().to_vec(),
        feed: z.to_vec(),
        k_values,
        psi: solution.psi,
        regime: solution.regime,
        liquid: phases.liquid,
        vapor: phases.vapor,
        balance,
        iterations: solution.iterations,
        residual: solution.residual,
    })
}
