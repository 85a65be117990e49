//! Equilibrium ratios (K-values).

use crate::component::ComponentSpec;
use crate::composition::FeedComposition;
use crate::error::{ThermoError, ThermoResult};
use crate::vapor_pressure::{Antoine, VaporPressureModel};
use serde::{Deserialize, Serialize};
use vf_core::units::{Pressure, Temperature, to_degc, to_mmhg};

/// Ideal K-value of one component: `P_sat(T) / P`.
pub fn k_value(
    component: &ComponentSpec,
    temperature: Temperature,
    pressure: Pressure,
) -> ThermoResult<f64> {
    let p_mmhg = system_pressure_mmhg(pressure)?;
    let p_sat = Antoine.saturation_pressure_mmhg(component, to_degc(temperature), p_mmhg)?;
    Ok(p_sat / p_mmhg)
}

fn system_pressure_mmhg(pressure: Pressure) -> ThermoResult<f64> {
    let p = to_mmhg(pressure);
    if !p.is_finite() || p <= 0.0 {
        return Err(ThermoError::invalid(format!(
            "system pressure must be positive, got {p} mmHg"
        )));
    }
    Ok(p)
}

/// Multiplicative non-ideality factors, `K_eff = K · γ_liquid / φ_vapor`.
///
/// Deserialization goes through [`NonIdealCorrections::new`], so a case file
/// cannot carry unequal or non-positive factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CorrectionsDef")]
pub struct NonIdealCorrections {
    gamma_liquid: Vec<f64>,
    phi_vapor: Vec<f64>,
}

#[derive(Deserialize)]
struct CorrectionsDef {
    gamma_liquid: Vec<f64>,
    phi_vapor: Vec<f64>,
}

impl TryFrom<CorrectionsDef> for NonIdealCorrections {
    type Error = ThermoError;

    fn try_from(def: CorrectionsDef) -> ThermoResult<Self> {
        Self::new(def.gamma_liquid, def.phi_vapor)
    }
}

impl NonIdealCorrections {
    pub fn new(gamma_liquid: Vec<f64>, phi_vapor: Vec<f64>) -> ThermoResult<Self> {
        if gamma_liquid.len() != phi_vapor.len() {
            return Err(ThermoError::invalid(format!(
                "activity ({}) and fugacity ({}) coefficient counts differ",
                gamma_liquid.len(),
                phi_vapor.len()
            )));
        }
        if gamma_liquid
            .iter()
            .chain(phi_vapor.iter())
            .any(|v| !v.is_finite() || *v <= 0.0)
        {
            return Err(ThermoError::invalid(
                "activity and fugacity coefficients must be positive and finite",
            ));
        }
        Ok(Self {
            gamma_liquid,
            phi_vapor,
        })
    }

    /// γ = φ = 1 for every component.
    pub fn ideal(n: usize) -> Self {
        Self {
            gamma_liquid: vec![1.0; n],
            phi_vapor: vec![1.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.gamma_liquid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gamma_liquid.is_empty()
    }

    fn factor(&self, i: usize) -> f64 {
        self.gamma_liquid[i] / self.phi_vapor[i]
    }
}

/// K-values for an ordered set of components, index-aligned with the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KValueSet {
    ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vapor_pressures_mmhg: Option<Vec<f64>>,
    k: Vec<f64>,
}

impl KValueSet {
    /// Build directly from ids and K-values (no vapor pressure information).
    pub fn from_values(ids: Vec<String>, k: Vec<f64>) -> ThermoResult<Self> {
        if ids.len() != k.len() {
            return Err(ThermoError::invalid("K-value count must match component count"));
        }
        check_positive(&ids, &k, ThermoError::invalid)?;
        Ok(Self {
            ids,
            vapor_pressures_mmhg: None,
            k,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.k
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Saturation pressures [mmHg] the K-values were derived from, if known.
    pub fn vapor_pressures_mmhg(&self) -> Option<&[f64]> {
        self.vapor_pressures_mmhg.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.ids.iter().position(|s| s == id).map(|i| self.k[i])
    }

    pub fn vapor_pressure_mmhg(&self, id: &str) -> Option<f64> {
        let i = self.ids.iter().position(|s| s == id)?;
        self.vapor_pressures_mmhg.as_ref().map(|p| p[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ids.iter().map(String::as_str).zip(self.k.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}

/// Caller-supplied K-values fail as invalid input; computed ones as domain errors.
fn check_positive(
    ids: &[String],
    k: &[f64],
    error: fn(String) -> ThermoError,
) -> ThermoResult<()> {
    for (id, &ki) in ids.iter().zip(k) {
        if !ki.is_finite() || ki <= 0.0 {
            return Err(error(format!(
                "K-value of {id} must be positive and finite, got {ki}"
            )));
        }
    }
    Ok(())
}

/// Computes K-values for a whole feed from a vapor pressure model.
pub struct KValueCalculator<'a> {
    model: &'a dyn VaporPressureModel,
    corrections: Option<&'a NonIdealCorrections>,
}

impl<'a> KValueCalculator<'a> {
    pub fn new(model: &'a dyn VaporPressureModel) -> Self {
        Self {
            model,
            corrections: None,
        }
    }

    pub fn with_corrections(mut self, corrections: Option<&'a NonIdealCorrections>) -> Self {
        self.corrections = corrections;
        self
    }

    /// K-values for every feed component at (T, P).
    pub fn compute(
        &self,
        composition: &FeedComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> ThermoResult<KValueSet> {
        let p_mmhg = system_pressure_mmhg(pressure)?;
        let t_c = to_degc(temperature);

        if let Some(c) = self.corrections {
            if c.len() != composition.len() {
                return Err(ThermoError::invalid(format!(
                    "{} correction factors supplied for {} components",
                    c.len(),
                    composition.len()
                )));
            }
        }

        let n = composition.len();
        let mut ids = Vec::with_capacity(n);
        let mut vapor_pressures_mmhg = Vec::with_capacity(n);
        let mut k = Vec::with_capacity(n);

        for (i, (component, _)) in composition.iter().enumerate() {
            let p_sat = self
                .model
                .saturation_pressure_mmhg(component, t_c, p_mmhg)?;
            let factor = self.corrections.map_or(1.0, |c| c.factor(i));
            ids.push(component.id().to_string());
            vapor_pressures_mmhg.push(p_sat);
            k.push(p_sat / p_mmhg * factor);
        }

        check_positive(&ids, &k, ThermoError::domain)?;
        tracing::trace!(model = self.model.name(), t_c, p_mmhg, ?k, "computed K-values");

        Ok(KValueSet {
            ids,
            vapor_pressures_mmhg: Some(vapor_pressures_mmhg),
            k,
        })
    }
}
