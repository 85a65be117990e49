use thiserror::Error;

/// Low-level numeric failures, mapped into the categorised errors of the
/// crates above.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
