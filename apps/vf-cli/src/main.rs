use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vf_app::{
    AppResult, FlashCase, FlashReport, SweepDefinition, SweepParameter, SweepSpacing, SweepTable,
    load, run_sweep,
};
use vf_core::units::{degc, mmhg};
use vf_thermo::{filter_catalog, vapor_pressure};

#[derive(Parser)]
#[command(name = "vleflash")]
#[command(about = "vleflash - isothermal vapor-liquid flash calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash a case file once
    Flash {
        /// Path to the case file (YAML, or JSON by extension)
        case_path: PathBuf,
        /// Print the result as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Sweep one parameter around the conditions of a case file
    Sweep {
        /// Path to the case file
        case_path: PathBuf,
        /// Parameter to vary
        #[arg(long, value_enum)]
        parameter: ParameterArg,
        /// Component index for mole-fraction sweeps
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// First value (°C, mmHg or mole fraction)
        #[arg(long)]
        start: f64,
        /// Last value
        #[arg(long)]
        end: f64,
        /// Number of points
        #[arg(long, default_value_t = 20)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Print the sweep as JSON
        #[arg(long)]
        json: bool,
    },
    /// Benzene/toluene at 100 °C and 1 atm
    Demo,
    /// List built-in components
    Components {
        /// Filter by id, name or alias
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParameterArg {
    Temperature,
    Pressure,
    MoleFraction,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { case_path, json } => cmd_flash(&case_path, json),
        Commands::Sweep {
            case_path,
            parameter,
            index,
            start,
            end,
            points,
            log,
            json,
        } => {
            let parameter = match parameter {
                ParameterArg::Temperature => SweepParameter::Temperature,
                ParameterArg::Pressure => SweepParameter::Pressure,
                ParameterArg::MoleFraction => SweepParameter::MoleFraction { index },
            };
            let spacing = if log {
                SweepSpacing::Logarithmic
            } else {
                SweepSpacing::Linear
            };
            let definition = SweepDefinition::new(parameter, start, end, points, spacing)?;
            cmd_sweep(&case_path, &definition, json)
        }
        Commands::Demo => cmd_demo(),
        Commands::Components { query } => cmd_components(query.as_deref().unwrap_or("")),
    }
}

fn cmd_flash(case_path: &Path, json: bool) -> AppResult<()> {
    let case = load(case_path)?;
    let result = case.run()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Case: {}", case.name);
        println!("{}", FlashReport(&result));
    }
    Ok(())
}

fn cmd_sweep(case_path: &Path, definition: &SweepDefinition, json: bool) -> AppResult<()> {
    let case = load(case_path)?;
    let sweep = run_sweep(&case, definition)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&sweep)?);
    } else {
        println!("Case: {} ({} points)", case.name, definition.num_points);
        println!("{}", SweepTable(&sweep));
    }
    for failure in &sweep.failures {
        eprintln!(
            "  point {} ({}) failed: {}",
            failure.index, failure.value, failure.error
        );
    }
    Ok(())
}

fn cmd_demo() -> AppResult<()> {
    let case = FlashCase::benzene_toluene_demo();
    let feed = case.to_feed_state()?;
    println!(
        "Benzene/toluene flash at {:.1} °C, {:.1} mmHg",
        feed.temperature_c(),
        feed.pressure_mmhg()
    );
    for component in feed.composition().components() {
        let p_sat = vapor_pressure(component, feed.temperature())?;
        println!(
            "  P_sat({}) = {:.1} mmHg, K = {:.3}",
            component.id(),
            p_sat,
            p_sat / feed.pressure_mmhg()
        );
    }
    println!();
    println!("{}", FlashReport(&case.run()?));

    // Same feed below its bubble point.
    let cold = feed.at_conditions(degc(25.0), mmhg(760.0))?;
    let cold_result = vf_solver::flash(&cold, case.options())?;
    println!();
    println!(
        "At 25 °C the feed stays liquid: psi = {:.1}",
        cold_result.psi()
    );
    Ok(())
}

fn cmd_components(query: &str) -> AppResult<()> {
    let entries = filter_catalog(query);
    if entries.is_empty() {
        println!("No components match '{query}'");
        return Ok(());
    }
    println!(
        "{:<10} {:<12} {:>9} {:>10} {:>9} {:>9} {:>6}",
        "id", "name", "A", "B", "C", "M", "omega"
    );
    for entry in entries {
        println!(
            "{:<10} {:<12} {:>9.5} {:>10.3} {:>9.3} {:>9.2} {:>6.3}",
            entry.canonical_id,
            entry.display_name,
            entry.antoine.a,
            entry.antoine.b,
            entry.antoine.c,
            entry.molar_mass,
            entry.acentric_factor
        );
    }
    Ok(())
}
