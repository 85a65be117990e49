use crate::VfError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Closure tolerance for mole fraction sums.
pub const FRACTION_SUM_EPS: Real = 1e-6;

/// Absolute / relative comparison tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `|a - b| <= abs`, or within `rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VfError::NonFinite { what, value: v })
    }
}

/// Clamp into [0, 1]. NaN passes through unchanged.
#[inline]
pub fn clamp_unit(v: Real) -> Real {
    v.clamp(0.0, 1.0)
}

/// Divide every entry by the sum.
///
/// `None` when the sum is zero, negative or non-finite.
pub fn normalized(values: &[Real]) -> Option<Vec<Real>> {
    let sum: Real = values.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(values.iter().map(|v| v / sum).collect())
}
