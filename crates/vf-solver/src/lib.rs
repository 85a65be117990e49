//! Isothermal flash solver for vapor-liquid equilibrium.
//!
//! This crate turns a feed (composition, T, P, flow) into a two-phase split:
//! K-values from a vapor pressure model, the vapor fraction from the
//! Rachford-Rice equation, phase compositions, and a material-balance check.
//! Every call is a pure function of its inputs; nothing is cached between calls.

pub mod balance;
pub mod error;
pub mod flash;
pub mod phases;
pub mod rachford_rice;
pub mod result;
pub mod root;

pub use balance::{MaterialBalance, verify_material_balance};
pub use error::{ErrorKind, FlashError, SolverResult};
pub use flash::{FlashOptions, flash, flash_with_k_values, flash_with_model};
pub use phases::{NormalizationPolicy, PhaseCompositions, resolve_phases};
pub use rachford_rice::{PhaseRegime, RachfordRice, VaporFractionSolution};
pub use result::{FlashConditions, FlashResult, Phase, ProductStream};
pub use root::{Bisection, NewtonRaphson, RootMethod, RootOptions, RootReport, ScalarRootFinder};
