//! Feed composition (ordered component / mole fraction pairs).

use crate::component::{ComponentSpec, ComponentTable};
use crate::error::{ThermoError, ThermoResult};
use serde::{Deserialize, Serialize};
use vf_core::numeric::FRACTION_SUM_EPS;

/// Feed composition defined by mole fractions.
///
/// Fractions are non-negative and sum to 1 within [`FRACTION_SUM_EPS`]. Unlike a
/// general mixture type this does not silently renormalize: a feed that does not
/// close is a caller error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedComposition {
    items: Vec<(ComponentSpec, f64)>,
}

impl FeedComposition {
    /// Create a composition from mole fractions.
    pub fn new(items: Vec<(ComponentSpec, f64)>) -> ThermoResult<Self> {
        if items.is_empty() {
            return Err(ThermoError::invalid("empty feed composition"));
        }

        let mut sum = 0.0;
        for (i, (spec, z)) in items.iter().enumerate() {
            spec.validate()?;
            if items[..i].iter().any(|(other, _)| other.id() == spec.id()) {
                return Err(ThermoError::invalid(format!(
                    "component {} listed twice in feed",
                    spec.id()
                )));
            }
            if !z.is_finite() {
                return Err(ThermoError::invalid(format!(
                    "non-finite mole fraction for {}",
                    spec.id()
                )));
            }
            if *z < 0.0 {
                return Err(ThermoError::invalid(format!(
                    "negative mole fraction for {}: {z}",
                    spec.id()
                )));
            }
            sum += z;
        }

        if (sum - 1.0).abs() > FRACTION_SUM_EPS {
            return Err(ThermoError::invalid(format!(
                "mole fractions sum to {sum}, expected 1"
            )));
        }

        Ok(Self { items })
    }

    /// Build from a component table and `(id, z)` pairs, preserving the pair order.
    pub fn from_table(table: &ComponentTable, fractions: &[(&str, f64)]) -> ThermoResult<Self> {
        let items = fractions
            .iter()
            .map(|(id, z)| -> ThermoResult<(ComponentSpec, f64)> {
                Ok((table.require(id)?.clone(), *z))
            })
            .collect::<ThermoResult<Vec<_>>>()?;
        Self::new(items)
    }

    /// Build from mass fractions (summing to 1); every component needs a molar mass.
    pub fn from_weight_fractions(items: Vec<(ComponentSpec, f64)>) -> ThermoResult<Self> {
        let (specs, weights): (Vec<_>, Vec<_>) = items.into_iter().unzip();
        let moles = weight_to_mole_fractions(&specs, &weights)?;
        Self::new(specs.into_iter().zip(moles).collect())
    }

    /// Build from weight percentages (summing to 100).
    pub fn from_weight_percent(items: Vec<(ComponentSpec, f64)>) -> ThermoResult<Self> {
        Self::from_weight_fractions(items.into_iter().map(|(s, w)| (s, w / 100.0)).collect())
    }

    /// Mole fraction of a component (0.0 if not present).
    pub fn mole_fraction(&self, id: &str) -> f64 {
        self.items
            .iter()
            .find(|(s, _)| s.id() == id)
            .map(|(_, z)| *z)
            .unwrap_or(0.0)
    }

    /// Index-aligned mole fractions.
    pub fn fractions(&self) -> Vec<f64> {
        self.items.iter().map(|(_, z)| *z).collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|(s, _)| s.id().to_string()).collect()
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentSpec> + '_ {
        self.items.iter().map(|(s, _)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentSpec, f64)> + '_ {
        self.items.iter().map(|(s, z)| (s, *z))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Same components with new mole fractions (validated).
    pub fn with_fractions(&self, fractions: &[f64]) -> ThermoResult<Self> {
        if fractions.len() != self.items.len() {
            return Err(ThermoError::invalid(format!(
                "{} fractions supplied for {} components",
                fractions.len(),
                self.items.len()
            )));
        }
        Self::new(
            self.items
                .iter()
                .zip(fractions)
                .map(|((s, _), z)| (s.clone(), *z))
                .collect(),
        )
    }

    /// Mass fractions of this feed; every component needs a molar mass.
    pub fn to_weight_fractions(&self) -> ThermoResult<Vec<f64>> {
        let specs: Vec<ComponentSpec> = self.components().cloned().collect();
        mole_to_weight_fractions(&specs, &self.fractions())
    }

    /// Mixture molar mass [g/mol], `Σ z_i M_i`.
    pub fn molar_mass(&self) -> ThermoResult<f64> {
        self.items
            .iter()
            .map(|(s, z)| -> ThermoResult<f64> { Ok(required_molar_mass(s)? * z) })
            .sum()
    }
}

fn required_molar_mass(spec: &ComponentSpec) -> ThermoResult<f64> {
    spec.molar_mass().ok_or_else(|| {
        ThermoError::invalid(format!("molar mass required for {}", spec.id()))
    })
}

/// Convert mass fractions to mole fractions: `x_i = (w_i / M_i) / Σ (w_j / M_j)`.
pub fn weight_to_mole_fractions(specs: &[ComponentSpec], weights: &[f64]) -> ThermoResult<Vec<f64>> {
    rescale(specs, weights, |w, mw| w / mw, "weight")
}

/// Convert mole fractions to mass fractions: `w_i = x_i M_i / Σ x_j M_j`.
pub fn mole_to_weight_fractions(specs: &[ComponentSpec], moles: &[f64]) -> ThermoResult<Vec<f64>> {
    rescale(specs, moles, |x, mw| x * mw, "mole")
}

fn rescale(
    specs: &[ComponentSpec],
    fractions: &[f64],
    basis: impl Fn(f64, f64) -> f64,
    label: &str,
) -> ThermoResult<Vec<f64>> {
    if specs.len() != fractions.len() || specs.is_empty() {
        return Err(ThermoError::invalid(format!(
            "{} {label} fractions supplied for {} components",
            fractions.len(),
            specs.len()
        )));
    }

    let mut sum = 0.0;
    for (spec, f) in specs.iter().zip(fractions) {
        if !f.is_finite() || *f < 0.0 {
            return Err(ThermoError::invalid(format!(
                "{label} fraction of {} must be non-negative, got {f}",
                spec.id()
            )));
        }
        sum += f;
    }
    if (sum - 1.0).abs() > FRACTION_SUM_EPS {
        return Err(ThermoError::invalid(format!(
            "{label} fractions sum to {sum}, expected 1"
        )));
    }

    let scaled = specs
        .iter()
        .zip(fractions)
        .map(|(spec, f)| -> ThermoResult<f64> { Ok(basis(*f, required_molar_mass(spec)?)) })
        .collect::<ThermoResult<Vec<f64>>>()?;
    let total: f64 = scaled.iter().sum();
    Ok(scaled.into_iter().map(|v| v / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_table, lookup};
    use crate::component::AntoineConstants;

    fn bt() -> (ComponentSpec, ComponentSpec) {
        (lookup("benzene").unwrap(), lookup("toluene").unwrap())
    }

    #[test]
    fn accepts_closed_feed() {
        let (b, t) = bt();
        let feed = FeedComposition::new(vec![(b, 0.4), (t, 0.6)]).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.mole_fraction("toluene"), 0.6);
        assert_eq!(feed.mole_fraction("propane"), 0.0);
        assert_eq!(feed.ids(), vec!["benzene", "toluene"]);
    }

    #[test]
    fn accepts_sum_within_epsilon() {
        let (b, t) = bt();
        assert!(FeedComposition::new(vec![(b, 0.4 + 5e-7), (t, 0.6)]).is_ok());
    }

    #[test]
    fn rejects_open_feed() {
        let (b, t) = bt();
        let err = FeedComposition::new(vec![(b, 0.4), (t, 0.5)]).unwrap_err();
        assert!(matches!(err, ThermoError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_negative_fraction() {
        let (b, t) = bt();
        assert!(FeedComposition::new(vec![(b, -0.5), (t, 1.5)]).is_err());
    }

    #[test]
    fn rejects_non_finite_and_empty() {
        let (b, _) = bt();
        assert!(FeedComposition::new(vec![(b, f64::NAN)]).is_err());
        assert!(FeedComposition::new(vec![]).is_err());
    }

    #[test]
    fn rejects_duplicate_component() {
        let (b, _) = bt();
        assert!(FeedComposition::new(vec![(b.clone(), 0.5), (b, 0.5)]).is_err());
    }

    #[test]
    fn from_table_resolves_names() {
        let table = builtin_table().unwrap();
        let feed =
            FeedComposition::from_table(&table, &[("propane", 0.3), ("butane", 0.4), ("pentane", 0.3)])
                .unwrap();
        assert_eq!(feed.ids(), vec!["propane", "butane", "pentane"]);
        assert!(FeedComposition::from_table(&table, &[("hexane", 1.0)]).is_err());
    }

    #[test]
    fn equal_weights_favor_lighter_component() {
        let (b, t) = bt();
        let feed = FeedComposition::from_weight_percent(vec![(b, 50.0), (t, 50.0)]).unwrap();
        let zb = feed.mole_fraction("benzene");
        let zt = feed.mole_fraction("toluene");
        assert!((zb + zt - 1.0).abs() < 1e-12);
        assert!(zb > zt);
        // (50/78.11) / (50/78.11 + 50/92.14)
        assert!((zb - 0.5412).abs() < 1e-3, "z_benzene = {zb}");
    }

    #[test]
    fn pure_weight_extremes() {
        let (b, t) = bt();
        let feed =
            FeedComposition::from_weight_percent(vec![(b.clone(), 100.0), (t.clone(), 0.0)]).unwrap();
        assert!((feed.mole_fraction("benzene") - 1.0).abs() < 1e-12);
        let feed = FeedComposition::from_weight_percent(vec![(b, 0.0), (t, 100.0)]).unwrap();
        assert!(feed.mole_fraction("benzene").abs() < 1e-12);
    }

    #[test]
    fn weight_conversion_requires_molar_mass() {
        let bare = ComponentSpec::new("bare", AntoineConstants::new(7.0, 1200.0, 220.0));
        let (b, _) = bt();
        let err = FeedComposition::from_weight_fractions(vec![(b, 0.5), (bare, 0.5)]).unwrap_err();
        assert!(err.to_string().contains("molar mass"));
    }

    #[test]
    fn mole_weight_round_trip() {
        let (b, t) = bt();
        let feed = FeedComposition::new(vec![(b, 0.4), (t, 0.6)]).unwrap();
        let w = feed.to_weight_fractions().unwrap();
        // 0.4 * 78.11 / (0.4 * 78.11 + 0.6 * 92.14)
        assert!((w[0] - 0.3611).abs() < 1e-3, "w_benzene = {}", w[0]);
        let specs: Vec<ComponentSpec> = feed.components().cloned().collect();
        let z = weight_to_mole_fractions(&specs, &w).unwrap();
        assert!((z[0] - 0.4).abs() < 1e-12);
        assert!((z[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn mixture_molar_mass() {
        let (b, t) = bt();
        let feed = FeedComposition::new(vec![(b, 0.5), (t, 0.5)]).unwrap();
        assert!((feed.molar_mass().unwrap() - 85.125).abs() < 1e-9);
    }

    #[test]
    fn with_fractions_revalidates() {
        let (b, t) = bt();
        let feed = FeedComposition::new(vec![(b, 0.4), (t, 0.6)]).unwrap();
        assert!(feed.with_fractions(&[0.7, 0.3]).is_ok());
        assert!(feed.with_fractions(&[0.7, 0.7]).is_err());
        assert!(feed.with_fractions(&[1.0]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::builtin_table;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn weight_to_mole_closes(raw in prop::collection::vec(0.01_f64..1.0_f64, 5)) {
            let total: f64 = raw.iter().sum();
            let weights: Vec<f64> = raw.iter().map(|w| w / total).collect();
            let specs: Vec<ComponentSpec> = builtin_table().unwrap().iter().cloned().collect();

            let z = weight_to_mole_fractions(&specs, &weights).unwrap();
            let sum: f64 = z.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-12);
            prop_assert!(z.iter().all(|v| *v > 0.0));
            prop_assert!(FeedComposition::new(specs.into_iter().zip(z).collect()).is_ok());
        }
    }
}
