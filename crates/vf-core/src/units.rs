// vf-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature};
use uom::si::pressure::{atmosphere, pascal};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin as uom_kelvin};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Antoine correlations in this workspace are tabulated against 760 mmHg per atm exactly.
pub const MMHG_PER_ATM: f64 = 760.0;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    Pressure::new::<atmosphere>(v)
}

/// Pressure in millimetres of mercury, routed through atm so that `atm(1.0) == mmhg(760.0)`.
#[inline]
pub fn mmhg(v: f64) -> Pressure {
    Pressure::new::<atmosphere>(v / MMHG_PER_ATM)
}

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    Temperature::new::<uom_kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_mmhg(p: Pressure) -> f64 {
    p.get::<atmosphere>() * MMHG_PER_ATM
}

#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    t.get::<degree_celsius>()
}
