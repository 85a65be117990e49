//! Benzene/toluene reference scenarios and end-to-end flash properties.

use proptest::prelude::*;
use vf_core::units::{atm, degc, mmhg};
use vf_solver::{
    ErrorKind, FlashOptions, PhaseRegime, RootMethod, flash, flash_with_k_values,
};
use vf_thermo::{
    AntoineConstants, ComponentSpec, FeedComposition, FeedState, KValueSet, catalog::lookup,
    vapor_pressure,
};

fn benzene() -> ComponentSpec {
    ComponentSpec::new("benzene", AntoineConstants::new(6.90565, 1211.033, 220.79))
}

fn toluene() -> ComponentSpec {
    ComponentSpec::new("toluene", AntoineConstants::new(6.95464, 1344.8, 219.482))
}

fn feed(zb: f64, t_c: f64) -> FeedState {
    let composition = FeedComposition::new(vec![(benzene(), zb), (toluene(), 1.0 - zb)]).unwrap();
    FeedState::new(composition, degc(t_c), mmhg(760.0)).unwrap()
}

#[test]
fn scenario_a_benzene_toluene_at_100c() {
    assert!((vapor_pressure(&benzene(), degc(100.0)).unwrap() - 1350.0).abs() < 2.0);
    assert!((vapor_pressure(&toluene(), degc(100.0)).unwrap() - 556.0).abs() < 2.0);

    let result = flash(&feed(0.4, 100.0), &FlashOptions::default()).unwrap();
    let k = result.k_values();
    assert!((k.get("benzene").unwrap() - 1.78).abs() < 0.01);
    assert!((k.get("toluene").unwrap() - 0.73).abs() < 0.01);

    // The reference split for these constants is ψ = 0.7203, x_B = 0.2565,
    // y_B = 0.4557.
    assert_eq!(result.regime(), PhaseRegime::TwoPhase);
    assert!((result.psi() - 0.7203).abs() < 1e-3, "psi = {}", result.psi());
    assert!((result.liquid_mole_fraction("benzene").unwrap() - 0.2565).abs() < 1e-3);
    assert!((result.vapor_mole_fraction("benzene").unwrap() - 0.4557).abs() < 1e-3);
    assert!(result.balance().is_within(1e-6 * result.feed_flow()));
}

#[test]
fn scenario_b_room_temperature_is_liquid() {
    let composition = FeedComposition::new(vec![(benzene(), 0.5), (toluene(), 0.5)]).unwrap();
    let state = FeedState::new(composition, degc(25.0), atm(1.0)).unwrap();
    let result = flash(&state, &FlashOptions::default()).unwrap();

    assert!(result.k_values().values().iter().all(|k| *k < 1.0));
    assert_eq!(result.psi(), 0.0);
    assert_eq!(result.regime(), PhaseRegime::SubcooledLiquid);
    assert_eq!(result.vapor_flow(), 0.0);
    assert!((result.liquid()[0] - 0.5).abs() < 1e-12);
}

#[test]
fn scenario_c_hot_feed_is_vapor_favored() {
    let result = flash(&feed(0.5, 150.0), &FlashOptions::default()).unwrap();
    assert!(result.psi() > 0.5);
    // Both K > 1 at 150 °C and 1 atm, so the feed is fully vaporized.
    assert_eq!(result.psi(), 1.0);
    assert_eq!(result.regime(), PhaseRegime::SuperheatedVapor);
}

#[test]
fn scenario_d_extreme_k_spread() {
    let k = KValueSet::from_values(vec!["light".into(), "heavy".into()], vec![5.0, 0.01]).unwrap();
    for method in [RootMethod::Newton, RootMethod::Bisection] {
        let options = FlashOptions::default().with_method(method);
        let result = flash_with_k_values(&[0.01, 0.99], &k, 100.0, &options).unwrap();
        assert!((0.0..=1.0).contains(&result.psi()));
    }
}

#[test]
fn repeated_calls_are_identical() {
    let state = feed(0.4, 100.0);
    let a = flash(&state, &FlashOptions::default()).unwrap();
    let b = flash(&state, &FlashOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn three_component_light_hydrocarbons() {
    let composition = FeedComposition::new(vec![
        (lookup("propane").unwrap(), 0.3),
        (lookup("butane").unwrap(), 0.3),
        (lookup("pentane").unwrap(), 0.4),
    ])
    .unwrap();
    let state = FeedState::new(composition, degc(20.0), atm(2.0)).unwrap();
    let result = flash(&state, &FlashOptions::default()).unwrap();

    assert_eq!(result.regime(), PhaseRegime::TwoPhase);
    assert!(result.vapor_mole_fraction("propane").unwrap() > 0.3);
    assert!(result.liquid_mole_fraction("pentane").unwrap() > 0.4);
    assert!(result.balance().is_within(1e-6 * result.feed_flow()));
}

#[test]
fn non_positive_flow_is_invalid_input() {
    let k = KValueSet::from_values(vec!["a".into(), "b".into()], vec![2.0, 0.5]).unwrap();
    let err = flash_with_k_values(&[0.5, 0.5], &k, 0.0, &FlashOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn unclosed_composition_is_invalid_input() {
    let k = KValueSet::from_values(vec!["a".into(), "b".into()], vec![2.0, 0.5]).unwrap();
    let err = flash_with_k_values(&[0.5, 0.6], &k, 100.0, &FlashOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

fn feed_and_k() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..6)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(0.01_f64..1.0, n),
                prop::collection::vec(0.05_f64..20.0, n),
            )
        })
        .prop_map(|(raw, k)| {
            let total: f64 = raw.iter().sum();
            let z: Vec<f64> = raw.iter().map(|v| v / total).collect();
            (z, k)
        })
}

proptest! {
    #[test]
    fn converged_flash_reproduces_feed((z, k) in feed_and_k()) {
        let ids = (0..k.len()).map(|i| format!("c{i}")).collect();
        let set = KValueSet::from_values(ids, k).unwrap();
        let result = flash_with_k_values(&z, &set, 1.0, &FlashOptions::default()).unwrap();

        let psi = result.psi();
        prop_assert!((0.0..=1.0).contains(&psi));
        prop_assert!((result.vapor().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for i in 0..z.len() {
            let recombined = psi * result.vapor()[i] + (1.0 - psi) * result.liquid()[i];
            prop_assert!((recombined - z[i]).abs() < 1e-6);
        }
        prop_assert!(result.balance().is_within(1e-6));
    }
}
