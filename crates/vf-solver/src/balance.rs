//! Material balance check for a resolved flash.

use crate::error::{FlashError, SolverResult};
use serde::{Deserialize, Serialize};

/// Flows implied by ψ and how far the split is from reproducing the feed.
///
/// Purely diagnostic: nothing here feeds back into ψ, x or y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBalance {
    pub feed_flow: f64,
    /// V = ψF
    pub vapor_flow: f64,
    /// L = F - V
    pub liquid_flow: f64,
    /// |F - (V + L)|
    pub overall_error: f64,
    /// |F z_i - (V y_i + L x_i)| per component, in flow units
    pub component_errors: Vec<f64>,
}

impl MaterialBalance {
    pub fn max_component_error(&self) -> f64 {
        self.component_errors.iter().copied().fold(0.0, f64::max)
    }

    /// True when the overall and every component error are at most `tol`.
    pub fn is_within(&self, tol: f64) -> bool {
        self.overall_error <= tol && self.max_component_error() <= tol
    }
}

pub fn verify_material_balance(
    feed_flow: f64,
    z: &[f64],
    psi: f64,
    x: &[f64],
    y: &[f64],
) -> SolverResult<MaterialBalance> {
    if !feed_flow.is_finite() || feed_flow <= 0.0 {
        return Err(FlashError::invalid(format!(
            "feed flow must be positive, got {feed_flow}"
        )));
    }
    if x.len() != z.len() || y.len() != z.len() {
        return Err(FlashError::invalid(format!(
            "composition lengths differ: z {}, x {}, y {}",
            z.len(),
            x.len(),
            y.len()
        )));
    }

    let vapor_flow = psi * feed_flow;
    let liquid_flow = feed_flow - vapor_flow;
    let overall_error = (feed_flow - (vapor_flow + liquid_flow)).abs();
    let component_errors: Vec<f64> = z
        .iter()
        .zip(x.iter().zip(y))
        .map(|(zi, (xi, yi))| (feed_flow * zi - (vapor_flow * yi + liquid_flow * xi)).abs())
        .collect();

    let balance = MaterialBalance {
        feed_flow,
        vapor_flow,
        liquid_flow,
        overall_error,
        component_errors,
    };
    tracing::debug!(
        vapor_flow,
        liquid_flow,
        max_error = balance.max_component_error(),
        "material balance"
    );
    Ok(balance)
}
