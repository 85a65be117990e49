//! vf-core: stable foundation for vleflash.
//!
//! Contains:
//! - units (uom temperature/pressure types + constructors in flash-friendly units)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::VfError;
pub use numeric::*;
pub use units::*;
