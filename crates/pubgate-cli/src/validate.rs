//! # Validate Subcommand
//!
//! Loads every given definition file and directory and reports either a
//! per-workflow summary or the first error found.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pubgate_config::{WorkflowDefinitionProvider, YamlFileProvider};
use pubgate_core::WorkflowSet;

use crate::settings::Settings;

/// Arguments for the `pubgate validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Workflow definition files or directories.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when all definitions are valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<u8> {
    let paths = crate::definition_paths(&args.paths, settings)?;
    match YamlFileProvider::new(paths).load() {
        Ok(set) => {
            print!("{}", render_summary(&set));
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}

/// One line per workflow, then a total.
pub fn render_summary(set: &WorkflowSet) -> String {
    let mut out = String::new();
    for workflow in set.iter() {
        let _ = writeln!(
            out,
            "  {} ({}): {} states, {} transitions",
            workflow.id(),
            workflow.label(),
            workflow.states().count(),
            workflow.transition_count()
        );
    }
    let _ = writeln!(out, "OK: {} workflow(s) valid", set.len());
    out
}
