//! Sensitivity sweeps over temperature, pressure or one feed mole fraction.
//!
//! Points are independent flashes and are evaluated in parallel. A point that
//! fails is recorded with its error and does not abort the sweep.

use crate::case::FlashCase;
use crate::error::{AppError, AppResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use vf_core::numeric::{Tolerances, nearly_equal};
use vf_core::units::{degc, mmhg};
use vf_solver::{FlashResult, PhaseRegime, flash_with_model};
use vf_thermo::FeedState;

/// Quantity being varied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SweepParameter {
    /// Feed temperature [°C]
    Temperature,
    /// System pressure [mmHg]
    Pressure,
    /// Mole fraction of the component at `index`; the others are rescaled
    /// proportionally so the feed stays closed.
    MoleFraction { index: usize },
}

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDefinition {
    pub parameter: SweepParameter,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    #[serde(default)]
    pub spacing: SweepSpacing,
}

impl SweepDefinition {
    pub fn new(
        parameter: SweepParameter,
        start: f64,
        end: f64,
        num_points: usize,
        spacing: SweepSpacing,
    ) -> AppResult<Self> {
        let def = Self {
            parameter,
            start,
            end,
            num_points,
            spacing,
        };
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(AppError::InvalidSweep("bounds must be finite".to_string()));
        }
        if self.num_points < 2 {
            return Err(AppError::InvalidSweep(
                "sweep must have at least 2 points".to_string(),
            ));
        }
        if nearly_equal(self.start, self.end, Tolerances::default()) {
            return Err(AppError::InvalidSweep(
                "start and end values must be different".to_string(),
            ));
        }
        match self.parameter {
            SweepParameter::Pressure if self.start <= 0.0 || self.end <= 0.0 => Err(
                AppError::InvalidSweep("pressure bounds must be positive".to_string()),
            ),
            SweepParameter::MoleFraction { .. }
                if !(0.0..=1.0).contains(&self.start) || !(0.0..=1.0).contains(&self.end) =>
            {
                Err(AppError::InvalidSweep(
                    "mole fraction bounds must lie in [0, 1]".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.spacing {
            SweepSpacing::Linear => self.generate_linear(),
            SweepSpacing::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        // Exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        // Both ends must be positive; otherwise fall back to linear spacing.
        if self.num_points <= 1 || self.start <= 0.0 || self.end <= 0.0 {
            return self.generate_linear();
        }
        let (log_start, log_end) = (self.start.ln(), self.end.ln());
        let log_delta = (log_end - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "T [°C]"),
            Self::Pressure => write!(f, "P [mmHg]"),
            Self::MoleFraction { index } => write!(f, "z[{index}]"),
        }
    }
}

/// Summary of one successful sweep point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub value: f64,
    pub psi: f64,
    pub regime: PhaseRegime,
    /// Liquid mole fraction of the lead component
    pub lead_liquid: f64,
    /// Vapor mole fraction of the lead component
    pub lead_vapor: f64,
    /// Relative volatility of the lead component over the reference component
    pub separation_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub index: usize,
    pub value: f64,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub definition: SweepDefinition,
    pub lead_component: String,
    /// One entry per point, `None` where the flash failed
    pub rows: Vec<Option<SweepRow>>,
    pub failures: Vec<SweepFailure>,
}

impl SweepResult {
    pub fn num_successful(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn successful_rows(&self) -> impl Iterator<Item = &SweepRow> + '_ {
        self.rows.iter().flatten()
    }
}

/// Run a sweep around the base conditions of `case`.
pub fn run_sweep(case: &FlashCase, definition: &SweepDefinition) -> AppResult<SweepResult> {
    definition.validate()?;
    let base = case.to_feed_state()?;
    let n = base.composition().len();

    let lead = match definition.parameter {
        SweepParameter::MoleFraction { index } if index >= n => {
            return Err(AppError::InvalidSweep(format!(
                "mole fraction index {index} out of range for {n} components"
            )));
        }
        SweepParameter::MoleFraction { index } => index,
        _ => 0,
    };
    let reference = if lead == 0 { 1 } else { 0 };
    let lead_component = base.composition().ids()[lead].clone();

    let points = definition.generate_points();
    tracing::info!(
        case = %case.name,
        parameter = %definition.parameter,
        points = points.len(),
        "running sweep"
    );

    let outcomes: Vec<AppResult<FlashResult>> = points
        .par_iter()
        .map(|&value| -> AppResult<FlashResult> {
            let feed = feed_at(&base, definition.parameter, value)?;
            Ok(flash_with_model(&feed, case.model.model(), &case.solver)?)
        })
        .collect();

    let mut rows = Vec::with_capacity(points.len());
    let mut failures = Vec::new();
    for (index, (value, outcome)) in points.iter().copied().zip(outcomes).enumerate() {
        match outcome {
            Ok(result) => rows.push(Some(SweepRow {
                value,
                psi: result.psi(),
                regime: result.regime(),
                lead_liquid: result.liquid()[lead],
                lead_vapor: result.vapor()[lead],
                separation_factor: result.separation_factor(lead, reference),
            })),
            Err(e) => {
                tracing::warn!(index, value, error = %e, "sweep point failed");
                rows.push(None);
                failures.push(SweepFailure {
                    index,
                    value,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(SweepResult {
        definition: definition.clone(),
        lead_component,
        rows,
        failures,
    })
}

fn feed_at(base: &FeedState, parameter: SweepParameter, value: f64) -> AppResult<FeedState> {
    let feed = match parameter {
        SweepParameter::Temperature => base.at_conditions(degc(value), base.pressure())?,
        SweepParameter::Pressure => base.at_conditions(base.temperature(), mmhg(value))?,
        SweepParameter::MoleFraction { index } => {
            let z = rescale_fractions(&base.composition().fractions(), index, value);
            base.with_composition(base.composition().with_fractions(&z)?)
        }
    };
    Ok(feed)
}

/// Set `z[index] = value` and scale the remaining fractions so the total stays 1.
///
/// If the other fractions are all zero the remainder is split evenly among them.
pub fn rescale_fractions(z: &[f64], index: usize, value: f64) -> Vec<f64> {
    let others: f64 = z
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, v)| v)
        .sum();
    let remainder = 1.0 - value;
    let n_others = z.len().saturating_sub(1);

    z.iter()
        .enumerate()
        .map(|(i, zi)| {
            if i == index {
                value
            } else if others > 0.0 {
                zi * remainder / others
            } else {
                remainder / n_others as f64
            }
        })
        .collect()
}
