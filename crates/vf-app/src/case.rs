//! Flash case file format (YAML / JSON) and conversion to solver inputs.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vf_core::units::{Pressure, atm, degc, mmhg, pa};
use vf_solver::{FlashOptions, FlashResult, flash_with_model};
use vf_thermo::catalog::lookup;
use vf_thermo::{
    Antoine, AntoineConstants, ComponentSpec, FeedComposition, FeedState, PressureCorrectedAntoine,
    VaporPressureModel,
};

/// Current case file version.
pub const CASE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlashCase {
    pub version: u32,
    pub name: String,
    pub components: Vec<ComponentEntryDef>,
    #[serde(default)]
    pub basis: CompositionBasis,
    pub conditions: ConditionsDef,
    #[serde(default = "default_flow")]
    pub flow: f64,
    #[serde(default)]
    pub model: VaporPressureModelDef,
    #[serde(default)]
    pub solver: FlashOptions,
}

/// One feed component. Without `antoine` the id is resolved against the
/// built-in catalog; `molar_mass` and `acentric_factor` then override the
/// catalog values when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentEntryDef {
    pub id: String,
    /// Mole fraction, or weight percent when `basis` is `weight_percent`
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antoine: Option<AntoineConstants>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acentric_factor: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompositionBasis {
    #[default]
    Mole,
    WeightPercent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConditionsDef {
    pub temperature_c: f64,
    pub pressure: f64,
    #[serde(default)]
    pub pressure_unit: PressureUnit,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "mmHg")]
    MmHg,
    #[serde(rename = "atm")]
    Atm,
    #[serde(rename = "Pa")]
    Pa,
}

impl PressureUnit {
    pub fn quantity(self, value: f64) -> Pressure {
        match self {
            PressureUnit::MmHg => mmhg(value),
            PressureUnit::Atm => atm(value),
            PressureUnit::Pa => pa(value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VaporPressureModelDef {
    #[default]
    Antoine,
    PressureCorrected,
}

impl VaporPressureModelDef {
    pub fn model(self) -> &'static dyn VaporPressureModel {
        match self {
            VaporPressureModelDef::Antoine => &Antoine,
            VaporPressureModelDef::PressureCorrected => &PressureCorrectedAntoine,
        }
    }
}

fn default_flow() -> f64 {
    vf_thermo::DEFAULT_FEED_FLOW
}

impl FlashCase {
    /// Benzene/toluene at 100 °C and 760 mmHg, z = (0.4, 0.6).
    pub fn benzene_toluene_demo() -> Self {
        Self {
            version: CASE_VERSION,
            name: "benzene-toluene".to_string(),
            components: vec![catalog_entry("benzene", 0.4), catalog_entry("toluene", 0.6)],
            basis: CompositionBasis::Mole,
            conditions: ConditionsDef {
                temperature_c: 100.0,
                pressure: 760.0,
                pressure_unit: PressureUnit::MmHg,
            },
            flow: default_flow(),
            model: VaporPressureModelDef::Antoine,
            solver: FlashOptions::default(),
        }
    }

    /// Structural checks that do not need the component data resolved.
    pub fn validate(&self) -> AppResult<()> {
        if self.version != CASE_VERSION {
            return Err(AppError::Validation(format!(
                "unsupported case version {} (expected {CASE_VERSION})",
                self.version
            )));
        }
        if self.components.is_empty() {
            return Err(AppError::Validation("case has no components".to_string()));
        }
        for (i, entry) in self.components.iter().enumerate() {
            if self.components[..i].iter().any(|other| other.id == entry.id) {
                return Err(AppError::Validation(format!(
                    "component {} listed twice",
                    entry.id
                )));
            }
        }
        if !self.conditions.temperature_c.is_finite() {
            return Err(AppError::Validation("temperature must be finite".to_string()));
        }
        if !self.conditions.pressure.is_finite() || self.conditions.pressure <= 0.0 {
            return Err(AppError::Validation(format!(
                "pressure must be positive, got {}",
                self.conditions.pressure
            )));
        }
        if !self.flow.is_finite() || self.flow <= 0.0 {
            return Err(AppError::Validation(format!(
                "flow must be positive, got {}",
                self.flow
            )));
        }
        Ok(())
    }

    /// Resolve catalog references and build the component list in case order.
    pub fn component_specs(&self) -> AppResult<Vec<ComponentSpec>> {
        self.components.iter().map(resolve_component).collect()
    }

    /// Validated feed (composition converted to mole fractions).
    pub fn to_feed_state(&self) -> AppResult<FeedState> {
        self.validate()?;
        let specs = self.component_specs()?;
        let items: Vec<(ComponentSpec, f64)> = specs
            .into_iter()
            .zip(self.components.iter().map(|c| c.amount))
            .collect();
        let composition = match self.basis {
            CompositionBasis::Mole => FeedComposition::new(items)?,
            CompositionBasis::WeightPercent => FeedComposition::from_weight_percent(items)?,
        };

        let pressure = self.conditions.pressure_unit.quantity(self.conditions.pressure);
        let feed = FeedState::new(composition, degc(self.conditions.temperature_c), pressure)?
            .with_flow(self.flow)?;
        Ok(feed)
    }

    pub fn options(&self) -> &FlashOptions {
        &self.solver
    }

    /// Flash this case once.
    pub fn run(&self) -> AppResult<FlashResult> {
        let feed = self.to_feed_state()?;
        tracing::info!(case = %self.name, model = self.model.model().name(), "running flash case");
        Ok(flash_with_model(&feed, self.model.model(), &self.solver)?)
    }
}

fn catalog_entry(id: &str, amount: f64) -> ComponentEntryDef {
    ComponentEntryDef {
        id: id.to_string(),
        amount,
        antoine: None,
        molar_mass: None,
        acentric_factor: None,
    }
}

fn resolve_component(entry: &ComponentEntryDef) -> AppResult<ComponentSpec> {
    let mut spec = match entry.antoine {
        Some(antoine) => ComponentSpec::new(entry.id.clone(), antoine),
        None => lookup(&entry.id).ok_or_else(|| AppError::UnknownComponent(entry.id.clone()))?,
    };
    if let Some(mw) = entry.molar_mass {
        spec = spec.with_molar_mass(mw);
    }
    if let Some(omega) = entry.acentric_factor {
        spec = spec.with_acentric_factor(omega);
    }
    spec.validate()?;
    Ok(spec)
}

pub fn load_yaml(path: &Path) -> AppResult<FlashCase> {
    let content = read(path)?;
    let case: FlashCase = serde_yaml::from_str(&content)?;
    case.validate()?;
    Ok(case)
}

pub fn load_json(path: &Path) -> AppResult<FlashCase> {
    let content = read(path)?;
    let case: FlashCase = serde_json::from_str(&content)?;
    case.validate()?;
    Ok(case)
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> AppResult<FlashCase> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_yaml(path: &Path, case: &FlashCase) -> AppResult<()> {
    case.validate()?;
    let content = serde_yaml::to_string(case)?;
    write(path, content)
}

pub fn save_json(path: &Path, case: &FlashCase) -> AppResult<()> {
    case.validate()?;
    let content = serde_json::to_string_pretty(case)?;
    write(path, content)
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: String) -> AppResult<()> {
    std::fs::write(path, content).map_err(|source| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source,
    })
}
