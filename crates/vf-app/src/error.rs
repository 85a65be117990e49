//! Error types for the vf-app layer.

use std::path::PathBuf;
use vf_solver::{ErrorKind, FlashError};
use vf_thermo::ThermoError;

/// Unified error for case handling, sweeps and reporting, shared by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Flash(#[from] FlashError),
}

/// Result type for vf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Category of the underlying flash failure, if this came from the solver stack.
    pub fn flash_kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Flash(e) => Some(e.kind()),
            AppError::Thermo(e) => Some(FlashError::from(e.clone()).kind()),
            _ => None,
        }
    }
}
