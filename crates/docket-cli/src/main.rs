//! # docket CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docket_cli::case::{run_case, CaseArgs};
use docket_cli::config::{DocketConfig, Overrides, Settings};
use docket_cli::deliverables::{run_deliverables, DeliverablesArgs};
use docket_cli::forecast::{run_forecast, ForecastArgs};
use docket_cli::progress::{run_progress, ProgressArgs};
use docket_cli::strategy::{run_glossary, run_overview, run_phases, run_tree, GlossaryArgs, TreeArgs};
use docket_cli::validate::{run_validate, ValidateArgs};
use docket_core::Attorney;

/// Litigation strategy tracker for EDPA 24-376.
///
/// Case summary, interactive strategy tree, per-attorney progress board,
/// and cost forecasting from bundled fixtures.
#[derive(Parser, Debug)]
#[command(name = "docket", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./docket.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the fixture documents (case.json, nodes.json, ...).
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Directory for saved progress.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Attorney identity: cooper or rush.
    #[arg(long, global = true)]
    attorney: Option<Attorney>,

    /// Measure day counts from this date instead of today (YYYY-MM-DD).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Case header, countdowns, and current phase.
    Case(CaseArgs),

    /// Strategy tree for one phase.
    Tree(TreeArgs),

    /// All core phases with their moves.
    Phases,

    /// Motion and counter counts per core phase.
    Overview,

    /// Motions glossary.
    Glossary(GlossaryArgs),

    /// Per-attorney progress board.
    Progress(ProgressArgs),

    /// Cost and probability forecast.
    Forecast(ForecastArgs),

    /// Client deliverables checklist.
    Deliverables(DeliverablesArgs),

    /// Check fixture integrity.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("docket CLI starting");

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match DocketConfig::discover(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let settings = Settings::resolve(
        config,
        Overrides {
            fixtures_dir: cli.fixtures,
            state_dir: cli.state_dir,
            attorney: cli.attorney,
            today: cli.today,
            json: cli.json,
        },
    );

    tracing::debug!(
        attorney = %settings.attorney,
        state_dir = %settings.state_dir.display(),
        today = %settings.today,
        "resolved settings"
    );

    let result = match &cli.command {
        Commands::Case(args) => run_case(args, &settings),
        Commands::Tree(args) => run_tree(args, &settings),
        Commands::Phases => run_phases(&settings),
        Commands::Overview => run_overview(&settings),
        Commands::Glossary(args) => run_glossary(args, &settings),
        Commands::Progress(args) => run_progress(args, &settings),
        Commands::Forecast(args) => run_forecast(args, &settings),
        Commands::Deliverables(args) => run_deliverables(args, &settings),
        Commands::Validate(args) => run_validate(args, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
