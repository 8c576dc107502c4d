//! # Simulate Subcommand
//!
//! Runs one transition through the workflow engine on an in-memory entity
//! and prints the outcome together with the resulting entity.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use pubgate_core::{StateId, WorkflowSet};
use pubgate_guard::{ContentEntity, Principal};
use pubgate_state::{TransitionOutcome, TransitionReport, WorkflowEngine};

use crate::settings::Settings;
use crate::OutputFormat;

/// Arguments for the `pubgate simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Workflow definition files or directories.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Workflow key.
    #[arg(long)]
    pub workflow: String,

    /// Current state of the simulated entity.
    #[arg(long)]
    pub state: String,

    /// Transition key.
    #[arg(long)]
    pub transition: String,

    /// Permission held by the principal. Repeatable.
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Start with the entity's published flag set.
    #[arg(long, conflicts_with = "no_publication")]
    pub published: bool,

    /// Simulate an entity type without publication semantics.
    #[arg(long)]
    pub no_publication: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Simulation result as printed in JSON and YAML output.
#[derive(Debug, Serialize)]
pub struct Simulation {
    pub report: TransitionReport,
    pub entity: ContentEntity,
}

/// Execute the simulate subcommand.
///
/// Returns exit code: 0 when the transition was applied, 1 when rejected.
pub fn run_simulate(args: &SimulateArgs, settings: &Settings) -> Result<u8> {
    let set = crate::load_workflows(&args.paths, settings)?;
    let simulation = simulate(set, args)?;
    print!("{}", render_simulation(&simulation, args.format)?);
    Ok(if simulation.report.outcome.is_applied() { 0 } else { 1 })
}

/// Run the transition described by `args` against `set`.
pub fn simulate(set: WorkflowSet, args: &SimulateArgs) -> Result<Simulation> {
    let state = StateId::new(args.state.as_str()).context("invalid --state")?;
    let mut entity = if args.no_publication {
        ContentEntity::without_publication("simulated", state)
    } else {
        ContentEntity::new("simulated", state).published(args.published)
    };
    let principal = args
        .grants
        .iter()
        .fold(Principal::new("cli"), |principal, grant| principal.with_permission(grant.as_str()));

    let engine = WorkflowEngine::new(Arc::new(set));
    let report = engine
        .execute(&principal, &mut entity, &args.workflow, &args.transition)
        .with_context(|| format!("cannot simulate transition {}", args.transition))?;
    Ok(Simulation { report, entity })
}

/// Format a simulation result.
pub fn render_simulation(simulation: &Simulation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(simulation)
                .context("failed to serialize simulation as JSON")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(simulation).context("failed to serialize simulation as YAML")
        }
        OutputFormat::Text => {
            let mut out = String::new();
            match &simulation.report.outcome {
                TransitionOutcome::Rejected { permission } => {
                    let _ = writeln!(out, "outcome: rejected (missing permission \"{permission}\")");
                }
                TransitionOutcome::Applied { from, to, effect } => {
                    let _ = writeln!(out, "outcome: applied ({from} -> {to}, effect: {effect})");
                }
            }
            let phases: Vec<&str> = simulation
                .report
                .run
                .phases()
                .iter()
                .map(|phase| phase.as_str())
                .collect();
            let _ = writeln!(out, "phases: {}", phases.join(" -> "));
            let published = match simulation.entity.is_published() {
                Some(flag) => flag.to_string(),
                None => "n/a".to_string(),
            };
            let _ = writeln!(
                out,
                "entity: state={} published={}",
                simulation.entity.state, published
            );
            Ok(out)
        }
    }
}
