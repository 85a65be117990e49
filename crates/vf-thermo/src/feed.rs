//! Validated feed stream state.

use crate::composition::FeedComposition;
use crate::error::{ThermoError, ThermoResult};
use vf_core::units::{Pressure, Temperature, to_degc, to_mmhg};

/// Total molar flow used when the caller does not supply one [mol/h].
pub const DEFAULT_FEED_FLOW: f64 = 100.0;

/// Feed stream entering a flash drum: composition, T, P and total molar flow.
///
/// Owned by the caller; the flash routines only borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    composition: FeedComposition,
    temperature: Temperature,
    pressure: Pressure,
    flow: f64,
}

impl FeedState {
    /// Feed with the default flow of [`DEFAULT_FEED_FLOW`].
    pub fn new(
        composition: FeedComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> ThermoResult<Self> {
        let t_c = to_degc(temperature);
        if !t_c.is_finite() {
            return Err(ThermoError::invalid(format!(
                "feed temperature must be finite, got {t_c} °C"
            )));
        }
        let p = to_mmhg(pressure);
        if !p.is_finite() || p <= 0.0 {
            return Err(ThermoError::invalid(format!(
                "feed pressure must be positive, got {p} mmHg"
            )));
        }

        Ok(Self {
            composition,
            temperature,
            pressure,
            flow: DEFAULT_FEED_FLOW,
        })
    }

    /// Replace the total molar flow (must be positive and finite).
    pub fn with_flow(mut self, flow: f64) -> ThermoResult<Self> {
        if !flow.is_finite() || flow <= 0.0 {
            return Err(ThermoError::invalid(format!(
                "feed flow must be positive, got {flow}"
            )));
        }
        self.flow = flow;
        Ok(self)
    }

    pub fn composition(&self) -> &FeedComposition {
        &self.composition
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature_c(&self) -> f64 {
        to_degc(self.temperature)
    }

    pub fn pressure_mmhg(&self) -> f64 {
        to_mmhg(self.pressure)
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// Same feed at different conditions (re-validated).
    pub fn at_conditions(&self, temperature: Temperature, pressure: Pressure) -> ThermoResult<Self> {
        Self::new(self.composition.clone(), temperature, pressure)?.with_flow(self.flow)
    }

    /// Same conditions with a different composition.
    pub fn with_composition(&self, composition: FeedComposition) -> Self {
        Self {
            composition,
            ..self.clone()
        }
    }
}
