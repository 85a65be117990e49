//! Fixed-width text tables for flash results and sweeps.

use crate::sweep::SweepResult;
use std::fmt;
use vf_solver::{FlashResult, PhaseRegime};

/// Displays a [`FlashResult`] as a multi-section text report.
pub struct FlashReport<'a>(pub &'a FlashResult);

/// Displays a [`SweepResult`] as one row per point.
pub struct SweepTable<'a>(pub &'a SweepResult);

fn regime_label(regime: PhaseRegime) -> &'static str {
    match regime {
        PhaseRegime::TwoPhase => "two-phase",
        PhaseRegime::SubcooledLiquid => "all liquid",
        PhaseRegime::SuperheatedVapor => "all vapor",
    }
}

impl fmt::Display for FlashReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;

        if let Some(c) = r.conditions() {
            writeln!(
                f,
                "Conditions: T = {:.2} °C, P = {:.2} mmHg ({:.4} atm)",
                c.temperature_c,
                c.pressure_mmhg,
                c.pressure_mmhg / vf_core::units::MMHG_PER_ATM
            )?;
        }
        writeln!(
            f,
            "Vapor fraction ψ = {:.6} ({}), liquid fraction = {:.6}",
            r.psi(),
            regime_label(r.regime()),
            r.liquid_fraction()
        )?;
        writeln!(
            f,
            "Flows: feed = {:.4}, vapor = {:.4}, liquid = {:.4}",
            r.feed_flow(),
            r.vapor_flow(),
            r.liquid_flow()
        )?;
        writeln!(f)?;

        let p_sat = r.k_values().vapor_pressures_mmhg();
        writeln!(
            f,
            "{:<12} {:>12} {:>10} {:>10} {:>10} {:>10}",
            "component", "P_sat[mmHg]", "K", "z", "x", "y"
        )?;
        for (i, id) in r.ids().iter().enumerate() {
            let p = p_sat.map_or_else(|| "-".to_string(), |p| format!("{:.2}", p[i]));
            writeln!(
                f,
                "{:<12} {:>12} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                id,
                p,
                r.k_values().values()[i],
                r.feed()[i],
                r.liquid()[i],
                r.vapor()[i]
            )?;
        }
        writeln!(f)?;

        let balance = r.balance();
        writeln!(
            f,
            "Material balance: overall error = {:.3e}, max component error = {:.3e}",
            balance.overall_error,
            balance.max_component_error()
        )?;
        if r.ids().len() >= 2 {
            writeln!(
                f,
                "Separation factor ({}/{}) = {:.4}",
                r.ids()[0],
                r.ids()[1],
                r.separation_factor(0, 1)
            )?;
        }
        write!(f, "Solver iterations: {}", r.iterations())
    }
}

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let lead = &s.lead_component;
        writeln!(
            f,
            "{:>12} {:>10} {:>12} {:>12} {:>12} {:>10}",
            s.definition.parameter.to_string(),
            "psi",
            format!("x_{lead}"),
            format!("y_{lead}"),
            "alpha",
            "regime"
        )?;
        for (row, value) in s.rows.iter().zip(s.definition.generate_points()) {
            match row {
                Some(row) => writeln!(
                    f,
                    "{:>12.4} {:>10.6} {:>12.6} {:>12.6} {:>12.4} {:>10}",
                    row.value,
                    row.psi,
                    row.lead_liquid,
                    row.lead_vapor,
                    row.separation_factor,
                    regime_label(row.regime)
                )?,
                None => writeln!(f, "{value:>12.4} {:>10}", "failed")?,
            }
        }
        write!(
            f,
            "{} points, {} failed",
            s.rows.len(),
            s.num_failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::FlashCase;
    use crate::sweep::{SweepDefinition, SweepParameter, SweepSpacing, run_sweep};

    #[test]
    fn flash_report_lists_every_component() {
        let result = FlashCase::benzene_toluene_demo().run().unwrap();
        let text = FlashReport(&result).to_string();
        assert!(text.contains("benzene"));
        assert!(text.contains("toluene"));
        assert!(text.contains("two-phase"));
        assert!(text.contains("Separation factor (benzene/toluene)"));
    }

    #[test]
    fn sweep_table_has_one_line_per_point() {
        let def = SweepDefinition::new(
            SweepParameter::Temperature,
            80.0,
            120.0,
            4,
            SweepSpacing::Linear,
        )
        .unwrap();
        let sweep = run_sweep(&FlashCase::benzene_toluene_demo(), &def).unwrap();
        let text = SweepTable(&sweep).to_string();
        // header + 4 rows + summary
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("x_benzene"));
    }
}
