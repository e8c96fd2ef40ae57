//! # Hydronic CLI Application
//!
//! Command-line front-end for the hydronic pump-head engine. Loads a project
//! JSON document, recalculates its systems and prints a report (or the raw
//! result JSON), and exposes the fluid, pipe and fitting catalogs.
//!
//! ```text
//! hydronic_cli calc project.json [--system HHW-1] [--settings design.json] [--json]
//! hydronic_cli fluid propylene_glycol 180 --concentration 30
//! hydronic_cli sizes copper_type_l
//! hydronic_cli fittings
//! hydronic_cli demo [--json]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use hydronic_core::calculations::SystemResult;
use hydronic_core::fittings::{fitting_catalog, ResistanceMethod};
use hydronic_core::fluids::{properties, FluidType};
use hydronic_core::model::{FittingInput, HydronicSystem, LoopType, PipeSection};
use hydronic_core::pipes::{available_sizes, PipeMaterial};
use hydronic_core::project::Project;
use hydronic_core::settings::DesignSettings;
use hydronic_core::warnings::Severity;
use hydronic_core::CalcError;

#[derive(Parser)]
#[command(name = "hydronic_cli")]
#[command(about = "Hydronic CLI - pipe pressure drop and pump head calculator", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate pump head for the systems in a project
    Calc {
        /// Path to the project JSON file
        project_path: PathBuf,
        /// System id or label (defaults to every system)
        #[arg(short, long)]
        system: Option<String>,
        /// Design settings JSON overriding the project's own
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Print results as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Show fluid properties at a temperature
    Fluid {
        /// water, propylene_glycol or ethylene_glycol
        fluid: String,
        /// Fluid temperature (°F)
        temp_f: f64,
        /// Glycol concentration (% by volume)
        #[arg(short, long, default_value_t = 0.0)]
        concentration: f64,
    },
    /// List catalogued pipe sizes
    Sizes {
        /// Material code (defaults to every material)
        material: Option<String>,
    },
    /// List the fitting catalog
    Fittings,
    /// Run a built-in example project
    Demo {
        /// Print the example project JSON instead of calculating it
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No system matches '{0}'")]
    UnknownSystem(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Calc {
            project_path,
            system,
            settings,
            json,
        } => cmd_calc(&project_path, system.as_deref(), settings.as_deref(), json),
        Commands::Fluid {
            fluid,
            temp_f,
            concentration,
        } => cmd_fluid(&fluid, temp_f, concentration),
        Commands::Sizes { material } => cmd_sizes(material.as_deref()),
        Commands::Fittings => {
            cmd_fittings();
            Ok(())
        }
        Commands::Demo { json } => cmd_demo(json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let CliError::Calc(calc) = &e {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn cmd_calc(project_path: &Path, system: Option<&str>, settings_path: Option<&Path>, json: bool) -> CliResult<()> {
    let mut project: Project = read_json(project_path)?;
    info!(
        path = %project_path.display(),
        systems = project.systems.len(),
        sections = project.sections.len(),
        "loaded project"
    );

    if let Some(path) = settings_path {
        let settings: DesignSettings = read_json(path)?;
        settings.validate()?;
        debug!(?settings, "using design settings override");
        project.settings = settings;
    }

    let ids: Vec<Uuid> = match system {
        Some(key) => vec![find_system(&project, key)?],
        None => project.systems_sorted().iter().map(|s| s.id).collect(),
    };

    let results = ids
        .iter()
        .map(|id| project.calculate_system(id))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No systems found in project");
    } else {
        for result in &results {
            print_report(result);
        }
    }
    Ok(())
}

/// Match a system by UUID first, then by label (case-insensitive).
fn find_system(project: &Project, key: &str) -> CliResult<Uuid> {
    if let Ok(id) = Uuid::parse_str(key) {
        if project.systems.contains_key(&id) {
            return Ok(id);
        }
    }
    project
        .systems_sorted()
        .into_iter()
        .find(|s| s.label.eq_ignore_ascii_case(key))
        .map(|s| s.id)
        .ok_or_else(|| CliError::UnknownSystem(key.to_string()))
}

fn cmd_fluid(fluid: &str, temp_f: f64, concentration: f64) -> CliResult<()> {
    let fluid_type = FluidType::from_str_flexible(fluid)?;
    let props = properties(fluid_type, concentration, temp_f)?;

    println!("{} at {:.1}°F", fluid_type, temp_f);
    if fluid_type.is_glycol() {
        println!("  Concentration: {:.0}%", concentration);
    }
    println!("  Density:       {:.2} lb/ft³", props.density_lb_ft3);
    println!("  Viscosity:     {:.3} cP", props.viscosity_cp);
    println!("  Spec. gravity: {:.3}", props.specific_gravity);
    println!("  Spec. heat:    {:.3} Btu/lb·°F", props.specific_heat_btu_lb_f);
    Ok(())
}

fn cmd_sizes(material: Option<&str>) -> CliResult<()> {
    let materials = match material {
        Some(code) => vec![PipeMaterial::from_str_flexible(code)?],
        None => PipeMaterial::ALL.to_vec(),
    };
    for material in materials {
        println!("{} ({})", material.display_name(), material.code());
        println!("  {}", available_sizes(material).join(", "));
    }
    Ok(())
}

fn cmd_fittings() {
    println!("{:<22} {:<28} Method", "Id", "Name");
    for spec in fitting_catalog() {
        let method = match &spec.method {
            ResistanceMethod::LengthRatio { ratio } => format!("L/D = {ratio:.0}"),
            ResistanceMethod::FlowCoefficient(rating) => match rating.lookup("2") {
                Some(cv) => format!("Cv (2\": {cv:.1})"),
                None => "Cv (user supplied)".to_string(),
            },
            ResistanceMethod::ManualDrop => "Manual drop".to_string(),
        };
        println!("{:<22} {:<28} {}", spec.id, spec.name, method);
    }
}

fn cmd_demo(json: bool) -> CliResult<()> {
    let project = demo_project()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }
    for system in project.systems_sorted() {
        print_report(&project.calculate_system(&system.id)?);
    }
    Ok(())
}

fn demo_project() -> CliResult<Project> {
    let mut project = Project::new("Demo Engineer", "25-001", "Demo Client");

    let mut hhw = HydronicSystem::new("HHW-1", 180.0);
    hhw.safety_factor = 0.10;
    let hhw_id = project.add_system(hhw);

    project.add_section(
        PipeSection::new(hhw_id, "Boiler supply", 60.0, PipeMaterial::SteelSch40, "2", 80.0)
            .with_fitting(FittingInput::new("boiler", 1).with_manual_drop(4.5))
            .with_fitting(FittingInput::new("elbow_90_standard", 4))
            .with_fitting(FittingInput::new("air_separator", 1))
            .with_fitting(FittingInput::new("gate_valve", 2)),
    )?;
    project.add_section(
        PipeSection::new(hhw_id, "Main to AHU-1", 60.0, PipeMaterial::SteelSch40, "2", 220.0)
            .with_fitting(FittingInput::new("elbow_90_standard", 8))
            .with_fitting(FittingInput::new("tee_run", 3))
            .with_sort_order(1),
    )?;
    project.add_section(
        PipeSection::new(hhw_id, "AHU-1 coil", 60.0, PipeMaterial::SteelSch40, "2", 15.0)
            .with_fitting(FittingInput::new("coil", 1).with_manual_drop(9.0))
            .with_fitting(FittingInput::new("control_valve", 1).with_cv(46.0))
            .with_fitting(FittingInput::new("balancing_valve", 1))
            .with_sort_order(2),
    )?;

    let mut cw = HydronicSystem::new("CW-1", 85.0);
    cw.loop_type = LoopType::Open;
    cw.static_head_ft = 12.0;
    cw.safety_factor = 0.15;
    let cw_id = project.add_system(cw);

    project.add_section(
        PipeSection::new(cw_id, "Tower to chiller", 300.0, PipeMaterial::SteelSch40, "5", 180.0)
            .with_fitting(FittingInput::new("elbow_90_long_radius", 6))
            .with_fitting(FittingInput::new("strainer_y", 1))
            .with_fitting(FittingInput::new("chiller", 1)),
    )?;

    Ok(project)
}

fn print_report(result: &SystemResult) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  {} ({})", result.label, result.loop_type);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("Fluid:");
    if result.fluid_type.is_glycol() {
        println!(
            "  {} {:.0}% at {:.1}°F",
            result.fluid_type, result.glycol_concentration_pct, result.fluid_temp_f
        );
    } else {
        println!("  {} at {:.1}°F", result.fluid_type, result.fluid_temp_f);
    }
    println!(
        "  ρ = {:.2} lb/ft³, μ = {:.3} cP, SG = {:.3}",
        result.fluid.density_lb_ft3, result.fluid.viscosity_cp, result.fluid.specific_gravity
    );
    println!();
    println!(
        "{:<20} {:>7} {:>7} {:>6} {:>9} {:>8} {:>8} {:>8}",
        "Section", "GPM", "Size", "ft/s", "Re", "Pipe ft", "Fit. ft", "Total"
    );
    for s in &result.sections {
        println!(
            "{:<20} {:>7.1} {:>7} {:>6.2} {:>9.0} {:>8.2} {:>8.2} {:>8.2}",
            truncate(&s.label, 20),
            s.flow_gpm,
            s.nominal_size,
            s.velocity_fps,
            s.reynolds,
            s.pipe_friction_ft,
            s.fittings_loss_ft,
            s.total_loss_ft
        );
    }
    println!();
    println!("Head:");
    println!("  Pipe friction:   {:>8.2} ft", result.total_pipe_friction_ft);
    println!("  Fittings:        {:>8.2} ft", result.total_fittings_loss_ft);
    println!("  Static:          {:>8.2} ft", result.static_head_ft);
    println!("  Calculated:      {:>8.2} ft", result.calculated_head_ft);
    println!(
        "  Safety ({:>3.0}%):   {:>8.2} ft",
        result.safety_factor * 100.0,
        result.safety_factor_ft
    );
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  PUMP: {:.1} GPM @ {:.1} ft ({:.1} psi), {:.2} BHP at {:.0}% eff.",
        result.max_flow_gpm,
        result.total_pump_head_ft,
        result.pump_head_psi,
        result.pump_bhp,
        result.pump_efficiency * 100.0
    );
    println!(
        "  Volume: {:.1} gal, friction rate {:.2} ft/100 ft",
        result.total_system_volume_gal, result.friction_rate_ft_per_100ft
    );
    println!("═══════════════════════════════════════════════════════════════");

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &result.warnings {
            let icon = match w.severity {
                Severity::Info => "ℹ",
                Severity::Warning => "⚠",
            };
            println!("  {} {}", icon, w.message);
        }
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
