//! vf-app: application layer for vleflash.
//!
//! Case files, sensitivity sweeps and text reports on top of the flash solver,
//! shared by the command-line front end.

pub mod case;
pub mod error;
pub mod report;
pub mod sweep;

pub use case::{
    CASE_VERSION, ComponentEntryDef, CompositionBasis, ConditionsDef, FlashCase, PressureUnit,
    VaporPressureModelDef, load, load_json, load_yaml, save_json, save_yaml,
};
pub use error::{AppError, AppResult};
pub use report::{FlashReport, SweepTable};
pub use sweep::{
    SweepDefinition, SweepFailure, SweepParameter, SweepResult, SweepRow, SweepSpacing,
    rescale_fractions, run_sweep,
};
