//! vf-thermo: pure-component data and phase-equilibrium ratios for vleflash.
//!
//! Provides:
//! - Component definitions with Antoine constants (`ComponentSpec`, `ComponentTable`)
//! - A small built-in catalog (benzene, toluene, light alkanes)
//! - Vapor pressure models (`VaporPressureModel`, `Antoine`, `PressureCorrectedAntoine`)
//! - Equilibrium ratios (`KValueCalculator`, `KValueSet`)
//! - Feed compositions with weight/mole conversion, and the validated `FeedState`
//!
//! # Example
//!
//! ```
//! use vf_core::units::{degc, mmhg};
//! use vf_thermo::{catalog, k_value, vapor_pressure};
//!
//! let benzene = catalog::lookup("benzene").unwrap();
//! let p_sat = vapor_pressure(&benzene, degc(100.0)).unwrap();
//! let k = k_value(&benzene, degc(100.0), mmhg(760.0)).unwrap();
//! assert!((p_sat - 1350.0).abs() < 5.0);
//! assert!((k - 1.78).abs() < 0.01);
//! ```

pub mod catalog;
pub mod component;
pub mod composition;
pub mod error;
pub mod feed;
pub mod kvalue;
pub mod vapor_pressure;

// Re-exports for ergonomics
pub use catalog::{CatalogEntry, builtin_table, filter_catalog};
pub use component::{AntoineConstants, ComponentSpec, ComponentTable};
pub use composition::{FeedComposition, mole_to_weight_fractions, weight_to_mole_fractions};
pub use error::{ThermoError, ThermoResult};
pub use feed::{DEFAULT_FEED_FLOW, FeedState};
pub use kvalue::{KValueCalculator, KValueSet, NonIdealCorrections, k_value};
pub use vapor_pressure::{
    Antoine, PressureCorrectedAntoine, VaporPressureModel, vapor_pressure, vapor_pressure_with,
};
