//! Case file loading, persistence and sweeps over the demo cases.

use proptest::prelude::*;
use std::path::PathBuf;
use vf_app::{
    AppError, FlashCase, PressureUnit, SweepDefinition, SweepParameter, SweepSpacing,
    VaporPressureModelDef, load, load_json, load_yaml, rescale_fractions, run_sweep, save_json,
    save_yaml,
};
use vf_solver::{PhaseRegime, RootMethod};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vf-app-{}-{name}", std::process::id()))
}

#[test]
fn demo_cases_load_and_run() {
    let case = load_yaml(&demo("benzene_toluene.yaml")).unwrap();
    assert_eq!(case, FlashCase::benzene_toluene_demo());
    let result = case.run().unwrap();
    assert!((result.psi() - 0.7203).abs() < 1e-3);

    let weight = load(&demo("benzene_toluene_weight.yaml")).unwrap();
    let result = weight.run().unwrap();
    assert_eq!(result.regime(), PhaseRegime::SubcooledLiquid);
    assert_eq!(result.psi(), 0.0);

    let light = load(&demo("light_hydrocarbons.yaml")).unwrap();
    assert_eq!(light.model, VaporPressureModelDef::PressureCorrected);
    assert_eq!(light.solver.method, RootMethod::Bisection);
    assert_eq!(light.conditions.pressure_unit, PressureUnit::Atm);
    let result = light.run().unwrap();
    assert!(result.is_two_phase());
    assert_eq!(result.ids()[1], "butane");
    assert!((result.feed_flow() - 250.0).abs() < 1e-12);
}

#[test]
fn yaml_and_json_round_trip() {
    let case = load_yaml(&demo("light_hydrocarbons.yaml")).unwrap();

    let yaml_path = scratch("case.yaml");
    save_yaml(&yaml_path, &case).unwrap();
    assert_eq!(load_yaml(&yaml_path).unwrap(), case);

    let json_path = scratch("case.json");
    save_json(&json_path, &case).unwrap();
    assert_eq!(load_json(&json_path).unwrap(), case);
    assert_eq!(load(&json_path).unwrap(), case);

    let _ = std::fs::remove_file(yaml_path);
    let _ = std::fs::remove_file(json_path);
}

#[test]
fn missing_file_reports_path() {
    let err = load_yaml(&demo("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::CaseFileRead { .. }));
    assert!(err.to_string().contains("does_not_exist.yaml"));
}

#[test]
fn temperature_sweep_vaporizes_monotonically() {
    let case = FlashCase::benzene_toluene_demo();
    let def =
        SweepDefinition::new(SweepParameter::Temperature, 80.0, 120.0, 9, SweepSpacing::Linear)
            .unwrap();
    let sweep = run_sweep(&case, &def).unwrap();

    assert_eq!(sweep.num_successful(), 9);
    assert_eq!(sweep.lead_component, "benzene");
    let psi: Vec<f64> = sweep.successful_rows().map(|r| r.psi).collect();
    assert!(psi.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(psi[0], 0.0);
    assert_eq!(psi[8], 1.0);
}

#[test]
fn pressure_sweep_condenses_monotonically() {
    let case = FlashCase::benzene_toluene_demo();
    let def = SweepDefinition::new(
        SweepParameter::Pressure,
        500.0,
        1000.0,
        6,
        SweepSpacing::Logarithmic,
    )
    .unwrap();
    let sweep = run_sweep(&case, &def).unwrap();
    let psi: Vec<f64> = sweep.successful_rows().map(|r| r.psi).collect();
    assert_eq!(psi.len(), 6);
    assert!(psi.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn composition_sweep_tracks_lead_component() {
    let case = FlashCase::benzene_toluene_demo();
    let def = SweepDefinition::new(
        SweepParameter::MoleFraction { index: 1 },
        0.2,
        0.8,
        4,
        SweepSpacing::Linear,
    )
    .unwrap();
    let sweep = run_sweep(&case, &def).unwrap();
    assert_eq!(sweep.lead_component, "toluene");
    for row in sweep.successful_rows() {
        // Toluene is the heavy key, so it never enriches the vapor.
        assert!(row.lead_vapor <= row.lead_liquid + 1e-12);
        assert!(row.separation_factor < 1.0);
    }
}

#[test]
fn failed_points_are_recorded_not_fatal() {
    let case = FlashCase::benzene_toluene_demo();
    // -260 °C drives T + C below zero for both components.
    let def =
        SweepDefinition::new(SweepParameter::Temperature, -260.0, 100.0, 5, SweepSpacing::Linear)
            .unwrap();
    let sweep = run_sweep(&case, &def).unwrap();
    assert_eq!(sweep.num_failed(), 1);
    assert_eq!(sweep.failures[0].index, 0);
    assert!(sweep.failures[0].error.contains("Domain"));
    assert!(sweep.rows[0].is_none());
    assert_eq!(sweep.num_successful(), 4);
}

#[test]
fn out_of_range_fraction_index_is_rejected() {
    let case = FlashCase::benzene_toluene_demo();
    let def = SweepDefinition::new(
        SweepParameter::MoleFraction { index: 5 },
        0.1,
        0.9,
        3,
        SweepSpacing::Linear,
    )
    .unwrap();
    assert!(matches!(run_sweep(&case, &def), Err(AppError::InvalidSweep(_))));
}

proptest! {
    #[test]
    fn rescaled_feed_stays_closed(
        raw in prop::collection::vec(0.01_f64..1.0, 2..6),
        value in 0.0_f64..=1.0,
        pick in 0usize..6,
    ) {
        let total: f64 = raw.iter().sum();
        let z: Vec<f64> = raw.iter().map(|v| v / total).collect();
        let index = pick % z.len();
        let rescaled = rescale_fractions(&z, index, value);
        prop_assert_eq!(rescaled[index], value);
        prop_assert!((rescaled.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        prop_assert!(rescaled.iter().all(|v| *v >= 0.0));
    }
}
