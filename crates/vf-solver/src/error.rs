//! Error types for flash calculations.

use thiserror::Error;
use vf_thermo::ThermoError;

/// Errors that can occur during a flash calculation.
///
/// Every failure falls into one of three categories (see [`ErrorKind`]) and is
/// returned from the stage that detected it without retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlashError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Domain error: {what}")]
    Domain { what: String },

    #[error("Convergence failed after {iterations} iterations: {what}")]
    Convergence { what: String, iterations: usize },
}

/// Coarse classification of a [`FlashError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Domain,
    Convergence,
}

pub type SolverResult<T> = Result<T, FlashError>;

impl FlashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlashError::InvalidInput { .. } => ErrorKind::InvalidInput,
            FlashError::Domain { .. } => ErrorKind::Domain,
            FlashError::Convergence { .. } => ErrorKind::Convergence,
        }
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        FlashError::InvalidInput { what: what.into() }
    }
}

impl From<ThermoError> for FlashError {
    fn from(e: ThermoError) -> Self {
        match e {
            ThermoError::InvalidInput { what } => FlashError::InvalidInput { what },
            ThermoError::Domain { what } => FlashError::Domain { what },
        }
    }
}
