//! # Check Subcommand
//!
//! Evaluates the transition guard for a principal holding the given
//! `--grant` permissions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pubgate_core::WorkflowSet;
use pubgate_guard::{ContentEntity, GuardDecision, Principal, TransitionGuard};

use crate::settings::Settings;

/// Arguments for the `pubgate check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Workflow definition files or directories.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Workflow key.
    #[arg(long)]
    pub workflow: String,

    /// Transition key.
    #[arg(long)]
    pub transition: String,

    /// Permission held by the principal. Repeatable.
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when allowed, 1 when denied.
pub fn run_check(args: &CheckArgs, settings: &Settings) -> Result<u8> {
    let set = crate::load_workflows(&args.paths, settings)?;
    let decision = evaluate(&set, args)?;
    if decision.allowed {
        println!("allowed: {}", decision.permission);
        Ok(0)
    } else {
        println!("denied: missing permission \"{}\"", decision.permission);
        Ok(1)
    }
}

/// Guard decision for `args` against `set`.
pub fn evaluate(set: &WorkflowSet, args: &CheckArgs) -> Result<GuardDecision> {
    let workflow = set.workflow(&args.workflow)?;
    let transition = workflow
        .transition(&args.transition)
        .with_context(|| format!("cannot check transition {}", args.transition))?;
    let principal = args
        .grants
        .iter()
        .fold(Principal::new("cli"), |principal, grant| principal.with_permission(grant.as_str()));
    // The guard ignores entity state; any declared state will do.
    let entity = ContentEntity::new("cli", transition.to.clone());
    Ok(TransitionGuard::new().check(&principal, transition, workflow, &entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{write_definitions, CONTENT_YAML};

    fn args(path: PathBuf, transition: &str, grants: &[&str]) -> CheckArgs {
        CheckArgs {
            paths: vec![path],
            workflow: "content".to_string(),
            transition: transition.to_string(),
            grants: grants.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn allowed_with_matching_grant() {
        let (_dir, path) = write_definitions(CONTENT_YAML);
        let args = args(path, "publish", &["use publish transition in content"]);
        assert_eq!(run_check(&args, &Settings::default()).unwrap(), 0);
    }

    #[test]
    fn denied_without_grant() {
        let (_dir, path) = write_definitions(CONTENT_YAML);
        let args = args(path, "unpublish", &["use publish transition in content"]);
        assert_eq!(run_check(&args, &Settings::default()).unwrap(), 1);
    }

    #[test]
    fn decision_names_permission() {
        let (_dir, path) = write_definitions(CONTENT_YAML);
        let set = crate::load_workflows(&[path.clone()], &Settings::default()).unwrap();
        let decision = evaluate(&set, &args(path, "submit", &[])).unwrap();
        assert_eq!(decision.permission.as_str(), "use submit transition in content");
        assert!(!decision.allowed);
    }

    #[test]
    fn unknown_transition_is_error() {
        let (_dir, path) = write_definitions(CONTENT_YAML);
        let args = args(path, "archive", &[]);
        assert!(run_check(&args, &Settings::default()).is_err());
    }
}
