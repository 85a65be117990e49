//! Pure-component definitions.

use crate::error::{ThermoError, ThermoResult};
use serde::{Deserialize, Serialize};

/// Antoine constants for `log10(P_sat[mmHg]) = A - B / (T[°C] + C)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntoineConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AntoineConstants {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

/// A single chemical component.
///
/// Immutable once built; tables of these are passed explicitly into each
/// calculation instead of living on a calculator object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    id: String,
    antoine: AntoineConstants,
    /// Molar mass [g/mol]; needed only for weight/mole conversions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    molar_mass: Option<f64>,
    /// Acentric factor; used only by the pressure-corrected vapor pressure model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    acentric_factor: Option<f64>,
}

impl ComponentSpec {
    pub fn new(id: impl Into<String>, antoine: AntoineConstants) -> Self {
        Self {
            id: id.into(),
            antoine,
            molar_mass: None,
            acentric_factor: None,
        }
    }

    pub fn with_molar_mass(mut self, molar_mass: f64) -> Self {
        self.molar_mass = Some(molar_mass);
        self
    }

    pub fn with_acentric_factor(mut self, omega: f64) -> Self {
        self.acentric_factor = Some(omega);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn antoine(&self) -> AntoineConstants {
        self.antoine
    }

    pub fn molar_mass(&self) -> Option<f64> {
        self.molar_mass
    }

    pub fn acentric_factor(&self) -> Option<f64> {
        self.acentric_factor
    }

    /// Check the constants and optional properties for physical plausibility.
    pub fn validate(&self) -> ThermoResult<()> {
        if self.id.trim().is_empty() {
            return Err(ThermoError::invalid("component id must not be empty"));
        }
        let AntoineConstants { a, b, c } = self.antoine;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(ThermoError::invalid(format!(
                "non-finite Antoine constants for {}",
                self.id
            )));
        }
        if let Some(mw) = self.molar_mass {
            if !mw.is_finite() || mw <= 0.0 {
                return Err(ThermoError::invalid(format!(
                    "molar mass of {} must be positive, got {mw}",
                    self.id
                )));
            }
        }
        if let Some(omega) = self.acentric_factor {
            if !omega.is_finite() {
                return Err(ThermoError::invalid(format!(
                    "non-finite acentric factor for {}",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Ordered set of components with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ComponentSpec>", into = "Vec<ComponentSpec>")]
pub struct ComponentTable {
    items: Vec<ComponentSpec>,
}

impl ComponentTable {
    pub fn new(items: Vec<ComponentSpec>) -> ThermoResult<Self> {
        for (i, spec) in items.iter().enumerate() {
            spec.validate()?;
            if items[..i].iter().any(|other| other.id == spec.id) {
                return Err(ThermoError::invalid(format!(
                    "duplicate component id: {}",
                    spec.id
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn get(&self, id: &str) -> Option<&ComponentSpec> {
        self.items.iter().find(|spec| spec.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|spec| spec.id == id)
    }

    /// Look up a component, failing with `InvalidInput` when the id is unknown.
    pub fn require(&self, id: &str) -> ThermoResult<&ComponentSpec> {
        self.get(id)
            .ok_or_else(|| ThermoError::invalid(format!("unknown component: {id}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<Vec<ComponentSpec>> for ComponentTable {
    type Error = ThermoError;

    fn try_from(items: Vec<ComponentSpec>) -> ThermoResult<Self> {
        Self::new(items)
    }
}

impl From<ComponentTable> for Vec<ComponentSpec> {
    fn from(table: ComponentTable) -> Self {
        table.items
    }
}
