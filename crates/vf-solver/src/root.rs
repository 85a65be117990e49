//! Bounded scalar root finders.
//!
//! The convergence policy (tolerance, iteration bound, clamping to the search
//! interval) lives here, independent of any physical model, so it can be tested
//! on plain functions.

use crate::error::{FlashError, SolverResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Root search configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOptions {
    /// Converged once successive iterates differ by less than this
    pub tolerance: f64,
    /// Maximum iterations before giving up
    pub max_iterations: usize,
    /// Starting point (Newton) / ignored by bracketing methods
    pub initial_guess: f64,
    /// Lower end of the admissible interval
    pub lower: f64,
    /// Upper end of the admissible interval
    pub upper: f64,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_guess: 0.5,
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl RootOptions {
    pub fn validate(&self) -> SolverResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(FlashError::invalid(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FlashError::invalid("max_iterations must be at least 1"));
        }
        if !(self.lower.is_finite() && self.upper.is_finite()) || self.lower >= self.upper {
            return Err(FlashError::invalid(format!(
                "invalid search interval [{}, {}]",
                self.lower, self.upper
            )));
        }
        if !self.initial_guess.is_finite()
            || self.initial_guess < self.lower
            || self.initial_guess > self.upper
        {
            return Err(FlashError::invalid(format!(
                "initial guess {} outside [{}, {}]",
                self.initial_guess, self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Root search outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootReport {
    /// Root estimate, always inside `[lower, upper]`
    pub root: f64,
    /// Function value at `root`
    pub residual: f64,
    /// Number of iterations used
    pub iterations: usize,
}

/// A scalar root finder on a closed interval.
///
/// When the function has no root inside the interval the finder returns the
/// boundary it was driven to, rather than an error.
pub trait ScalarRootFinder: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, f: &dyn Fn(f64) -> f64, options: &RootOptions) -> SolverResult<RootReport>;
}

/// Newton-Raphson with a finite-difference derivative and per-step clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphson {
    /// Finite-difference step for df/dx
    pub derivative_step: f64,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self {
            derivative_step: 1e-8,
        }
    }
}

impl ScalarRootFinder for NewtonRaphson {
    fn name(&self) -> &str {
        "newton-raphson"
    }

    fn solve(&self, f: &dyn Fn(f64) -> f64, options: &RootOptions) -> SolverResult<RootReport> {
        options.validate()?;
        let h = self.derivative_step;
        if !h.is_finite() || h <= 0.0 {
            return Err(FlashError::invalid(format!(
                "derivative step must be positive, got {h}"
            )));
        }

        let mut x = options.initial_guess;
        for iter in 1..=options.max_iterations {
            let fx = finite_value(f(x), x, iter)?;
            if fx == 0.0 {
                return Ok(RootReport {
                    root: x,
                    residual: fx,
                    iterations: iter,
                });
            }

            // Forward difference, backward at the upper bound to stay inside the interval.
            let dfdx = if x + h <= options.upper {
                (finite_value(f(x + h), x + h, iter)? - fx) / h
            } else {
                (fx - finite_value(f(x - h), x - h, iter)?) / h
            };
            if !dfdx.is_finite() || dfdx == 0.0 {
                return Err(FlashError::Convergence {
                    what: format!("{}: vanishing derivative at x = {x}", self.name()),
                    iterations: iter,
                });
            }

            let x_new = (x - fx / dfdx).clamp(options.lower, options.upper);
            tracing::trace!(iter, x, fx, dfdx, x_new, "newton step");

            if (x_new - x).abs() < options.tolerance {
                return Ok(RootReport {
                    root: x_new,
                    residual: f(x_new),
                    iterations: iter,
                });
            }
            x = x_new;
        }

        Err(FlashError::Convergence {
            what: format!(
                "{}: |dx| still above {} at x = {x}",
                self.name(),
                options.tolerance
            ),
            iterations: options.max_iterations,
        })
    }
}

/// Interval bisection.
///
/// Without a sign change on `[lower, upper]` it returns the endpoint with the
/// smaller `|f|`, which for a monotone function is where clamped Newton ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bisection;

impl ScalarRootFinder for Bisection {
    fn name(&self) -> &str {
        "bisection"
    }

    fn solve(&self, f: &dyn Fn(f64) -> f64, options: &RootOptions) -> SolverResult<RootReport> {
        options.validate()?;

        let (mut lo, mut hi) = (options.lower, options.upper);
        let mut f_lo = finite_value(f(lo), lo, 0)?;
        let f_hi = finite_value(f(hi), hi, 0)?;

        if f_lo == 0.0 {
            return Ok(RootReport { root: lo, residual: 0.0, iterations: 0 });
        }
        if f_hi == 0.0 {
            return Ok(RootReport { root: hi, residual: 0.0, iterations: 0 });
        }
        if f_lo.signum() == f_hi.signum() {
            let (root, residual) = if f_lo.abs() <= f_hi.abs() { (lo, f_lo) } else { (hi, f_hi) };
            return Ok(RootReport { root, residual, iterations: 0 });
        }

        for iter in 1..=options.max_iterations {
            let mid = 0.5 * (lo + hi);
            let f_mid = finite_value(f(mid), mid, iter)?;
            tracing::trace!(iter, lo, hi, mid, f_mid, "bisection step");

            if f_mid == 0.0 || 0.5 * (hi - lo) < options.tolerance {
                return Ok(RootReport {
                    root: mid,
                    residual: f_mid,
                    iterations: iter,
                });
            }
            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        Err(FlashError::Convergence {
            what: format!(
                "{}: bracket [{lo}, {hi}] still wider than {}",
                self.name(),
                options.tolerance
            ),
            iterations: options.max_iterations,
        })
    }
}

/// Built-in root finder selection, usable from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMethod {
    #[default]
    Newton,
    Bisection,
}

impl RootMethod {
    pub fn finder(self) -> Arc<dyn ScalarRootFinder> {
        match self {
            RootMethod::Newton => Arc::new(NewtonRaphson::default()),
            RootMethod::Bisection => Arc::new(Bisection),
        }
    }
}

fn finite_value(v: f64, x: f64, iterations: usize) -> SolverResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FlashError::Convergence {
            what: format!("function value {v} at x = {x}"),
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn quadratic(x: f64) -> f64 {
        x * x - 0.25
    }

    #[test]
    fn newton_finds_interior_root() {
        let report = NewtonRaphson::default()
            .solve(&quadratic, &RootOptions::default())
            .unwrap();
        assert!((report.root - 0.5).abs() < 1e-6);
        assert!(report.residual.abs() < 1e-6);
    }

    #[test]
    fn newton_clamps_to_bounds() {
        // Root at x = -2 lies outside [0, 1]; Newton is driven to 0 and stays there.
        let f = |x: f64| -(x + 2.0);
        let report = NewtonRaphson::default()
            .solve(&f, &RootOptions::default())
            .unwrap();
        assert_eq!(report.root, 0.0);

        let f = |x: f64| 3.0 - x;
        let report = NewtonRaphson::default()
            .solve(&f, &RootOptions::default())
            .unwrap();
        assert_eq!(report.root, 1.0);
    }

    #[test]
    fn newton_reports_iteration_bound() {
        let options = RootOptions {
            tolerance: 1e-12,
            max_iterations: 2,
            initial_guess: 0.9,
            ..RootOptions::default()
        };
        let f = |x: f64| (x - 0.1_f64).powi(3);
        let err = NewtonRaphson::default().solve(&f, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn newton_rejects_flat_function() {
        let f = |_x: f64| 1.0;
        let err = NewtonRaphson::default()
            .solve(&f, &RootOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn newton_accepts_identically_zero_function() {
        let f = |_x: f64| 0.0;
        let report = NewtonRaphson::default()
            .solve(&f, &RootOptions::default())
            .unwrap();
        assert_eq!(report.root, 0.5);
        assert_eq!(report.residual, 0.0);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn bisection_finds_interior_root() {
        let report = Bisection.solve(&quadratic, &RootOptions::default()).unwrap();
        assert!((report.root - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bisection_without_sign_change_returns_nearest_bound() {
        let f = |x: f64| -(x + 2.0);
        let report = Bisection.solve(&f, &RootOptions::default()).unwrap();
        assert_eq!(report.root, 0.0);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn bisection_reports_iteration_bound() {
        let options = RootOptions {
            tolerance: 1e-12,
            max_iterations: 5,
            ..RootOptions::default()
        };
        let f = |x: f64| x - 0.3;
        let err = Bisection.solve(&f, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn invalid_options_rejected() {
        let bad = [
            RootOptions { tolerance: 0.0, ..RootOptions::default() },
            RootOptions { max_iterations: 0, ..RootOptions::default() },
            RootOptions { initial_guess: 1.5, ..RootOptions::default() },
            RootOptions { lower: 1.0, upper: 0.0, ..RootOptions::default() },
        ];
        for options in bad {
            let err = NewtonRaphson::default().solve(&quadratic, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn method_selects_finder() {
        assert_eq!(RootMethod::Newton.finder().name(), "newton-raphson");
        assert_eq!(RootMethod::Bisection.finder().name(), "bisection");
    }
}
