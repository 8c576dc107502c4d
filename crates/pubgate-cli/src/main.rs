//! # pubgate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pubgate_cli::check::{run_check, CheckArgs};
use pubgate_cli::permissions::{run_permissions, PermissionsArgs};
use pubgate_cli::simulate::{run_simulate, SimulateArgs};
use pubgate_cli::validate::{run_validate, ValidateArgs};
use pubgate_cli::{LogFormat, Settings};

/// pubgate: workflow transition guard and publication effect tooling.
///
/// Validates workflow definitions, lists the transition permissions they
/// imply, evaluates guard decisions, and simulates transitions.
#[derive(Parser, Debug)]
#[command(name = "pubgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate workflow definitions.
    Validate(ValidateArgs),

    /// List the transition permissions defined by the workflows.
    Permissions(PermissionsArgs),

    /// Check whether a set of grants allows a transition.
    Check(CheckArgs),

    /// Apply a transition to an in-memory entity and print the result.
    Simulate(SimulateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref());
    let log_format = settings
        .as_ref()
        .map(|s| s.log_format)
        .unwrap_or_default();
    init_tracing(cli.verbose, log_format);

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!("pubgate CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &settings),
        Commands::Permissions(args) => run_permissions(&args, &settings),
        Commands::Check(args) => run_check(&args, &settings),
        Commands::Simulate(args) => run_simulate(&args, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// command output.
fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
