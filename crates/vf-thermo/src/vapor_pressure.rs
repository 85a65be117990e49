//! Saturation pressure correlations.

use crate::component::{AntoineConstants, ComponentSpec};
use crate::error::{ThermoError, ThermoResult};
use vf_core::numeric::ensure_finite;
use vf_core::units::{Pressure, Temperature, to_degc, to_mmhg};

/// Trait for vapor pressure models.
///
/// Implementations must be thread-safe (Send + Sync) so independent flash
/// evaluations can share one model across worker threads.
pub trait VaporPressureModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Saturation pressure [mmHg] of `component` at `t_c` [°C].
    ///
    /// `system_mmhg` is the total system pressure; ideal correlations ignore it.
    fn saturation_pressure_mmhg(
        &self,
        component: &ComponentSpec,
        t_c: f64,
        system_mmhg: f64,
    ) -> ThermoResult<f64>;
}

/// Plain Antoine correlation, `P_sat = 10^(A - B / (T + C))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Antoine;

impl VaporPressureModel for Antoine {
    fn name(&self) -> &str {
        "antoine"
    }

    fn saturation_pressure_mmhg(
        &self,
        component: &ComponentSpec,
        t_c: f64,
        _system_mmhg: f64,
    ) -> ThermoResult<f64> {
        antoine_mmhg(component.id(), component.antoine(), t_c)
    }
}

/// Antoine with a simplified acentric-factor pressure correction:
/// `P_sat · (1 + ω (P / P_sat - 1) · 0.1)` for ω > 0.
///
/// Components without an acentric factor fall back to plain Antoine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressureCorrectedAntoine;

impl VaporPressureModel for PressureCorrectedAntoine {
    fn name(&self) -> &str {
        "antoine-pressure-corrected"
    }

    fn saturation_pressure_mmhg(
        &self,
        component: &ComponentSpec,
        t_c: f64,
        system_mmhg: f64,
    ) -> ThermoResult<f64> {
        let p_sat = antoine_mmhg(component.id(), component.antoine(), t_c)?;
        let omega = component.acentric_factor().unwrap_or(0.0);
        if omega <= 0.0 {
            return Ok(p_sat);
        }

        let corrected = p_sat * (1.0 + omega * (system_mmhg / p_sat - 1.0) * 0.1);
        let corrected = ensure_finite(corrected, "corrected vapor pressure")?;
        if corrected <= 0.0 {
            return Err(ThermoError::domain(format!(
                "pressure correction drove vapor pressure of {} non-positive",
                component.id()
            )));
        }
        Ok(corrected)
    }
}

/// Saturation pressure [mmHg] of a component via the Antoine equation.
pub fn vapor_pressure(component: &ComponentSpec, temperature: Temperature) -> ThermoResult<f64> {
    antoine_mmhg(component.id(), component.antoine(), to_degc(temperature))
}

/// Same as [`vapor_pressure`] but through an arbitrary model and system pressure.
pub fn vapor_pressure_with<M: VaporPressureModel + ?Sized>(
    model: &M,
    component: &ComponentSpec,
    temperature: Temperature,
    pressure: Pressure,
) -> ThermoResult<f64> {
    model.saturation_pressure_mmhg(component, to_degc(temperature), to_mmhg(pressure))
}

fn antoine_mmhg(id: &str, k: AntoineConstants, t_c: f64) -> ThermoResult<f64> {
    if !t_c.is_finite() {
        return Err(ThermoError::domain(format!(
            "non-finite temperature {t_c} °C for {id}"
        )));
    }

    let denom = t_c + k.c;
    // The correlation has a pole at T = -C and is meaningless below it.
    if denom <= 0.0 {
        return Err(ThermoError::domain(format!(
            "Antoine equation undefined for {id} at {t_c} °C (T + C = {denom})"
        )));
    }

    let p_sat = 10f64.powf(k.a - k.b / denom);
    if !p_sat.is_finite() || p_sat <= 0.0 {
        return Err(ThermoError::domain(format!(
            "vapor pressure of {id} at {t_c} °C is not representable ({p_sat})"
        )));
    }
    Ok(p_sat)
}
