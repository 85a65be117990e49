//! Thermodynamic data errors.

use thiserror::Error;
use vf_core::VfError;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while evaluating component data or validating a feed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Caller-supplied data violates a precondition (compositions, pressures, flows).
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    /// A correlation was evaluated outside the range where it is defined.
    #[error("Domain error: {what}")]
    Domain { what: String },
}

impl ThermoError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidInput { what: what.into() }
    }

    pub(crate) fn domain(what: impl Into<String>) -> Self {
        Self::Domain { what: what.into() }
    }
}

impl From<VfError> for ThermoError {
    fn from(err: VfError) -> Self {
        match err {
            VfError::NonFinite { what, value } => ThermoError::Domain {
                what: format!("non-finite {what}: {value}"),
            },
        }
    }
}
