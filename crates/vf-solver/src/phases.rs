//! Liquid and vapor compositions from a solved vapor fraction.

use crate::error::{FlashError, SolverResult};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use vf_core::numeric::normalized;

/// What to do with the raw phase fractions before returning them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Divide x and y by their own sums so each adds up to exactly 1.
    #[default]
    Both,
    /// Return the raw `x_i = z_i / (1 + ψ(K_i - 1))` and `y_i = K_i x_i`.
    Neither,
}

/// Index-aligned liquid (x) and vapor (y) mole fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCompositions {
    pub liquid: Vec<f64>,
    pub vapor: Vec<f64>,
}

impl PhaseCompositions {
    pub fn liquid_sum(&self) -> f64 {
        self.liquid.iter().sum()
    }

    pub fn vapor_sum(&self) -> f64 {
        self.vapor.iter().sum()
    }
}

/// Phase compositions at vapor fraction `psi`.
///
/// When ψ is an exact root of the Rachford-Rice equation the raw sums are both
/// 1; away from the root (or at a clamped boundary) they are not, which is what
/// the normalization policy is for.
pub fn resolve_phases(
    psi: f64,
    z: &[f64],
    k: &[f64],
    policy: NormalizationPolicy,
) -> SolverResult<PhaseCompositions> {
    if z.len() != k.len() {
        return Err(FlashError::invalid(format!(
            "{} mole fractions but {} K-values",
            z.len(),
            k.len()
        )));
    }
    if !psi.is_finite() || !(0.0..=1.0).contains(&psi) {
        return Err(FlashError::invalid(format!(
            "vapor fraction must lie in [0, 1], got {psi}"
        )));
    }

    let z = DVector::from_column_slice(z);
    let k = DVector::from_column_slice(k);
    let denom = k.map(|ki| 1.0 + psi * (ki - 1.0));
    if let Some(d) = denom.iter().find(|d| !d.is_finite() || **d <= 0.0) {
        return Err(FlashError::Domain {
            what: format!("non-positive phase split denominator {d} at psi = {psi}"),
        });
    }

    let x = z.component_div(&denom);
    let y = k.component_mul(&x);

    let (liquid, vapor) = match policy {
        NormalizationPolicy::Both => (
            normalized(x.as_slice()).ok_or_else(|| degenerate("liquid", x.sum()))?,
            normalized(y.as_slice()).ok_or_else(|| degenerate("vapor", y.sum()))?,
        ),
        NormalizationPolicy::Neither => (x.as_slice().to_vec(), y.as_slice().to_vec()),
    };
    tracing::trace!(psi, ?policy, sum_x = x.sum(), sum_y = y.sum(), "resolved phases");

    Ok(PhaseCompositions { liquid, vapor })
}

fn degenerate(phase: &str, sum: f64) -> FlashError {
    FlashError::Domain {
        what: format!("{phase} fractions sum to {sum}"),
    }
}
