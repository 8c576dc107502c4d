//! # pubgate-cli: Command-Line Interface for pubgate
//!
//! ## Subcommands
//!
//! - `pubgate validate`: Load and validate workflow definitions.
//! - `pubgate permissions`: Print the transition permission surface.
//! - `pubgate check`: Evaluate the transition guard for a set of grants.
//! - `pubgate simulate`: Run one transition on an in-memory entity.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to the library crates and only format output.
//! - Handlers return the process exit code: 0 success, 1 a negative answer
//!   (invalid definitions, denied, rejected). Operational errors surface as
//!   `Err` and exit with 2.

pub mod check;
pub mod permissions;
pub mod settings;
pub mod simulate;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use pubgate_config::{WorkflowDefinitionProvider, YamlFileProvider};
use pubgate_core::WorkflowSet;

pub use settings::{LogFormat, Settings};

/// Output format for structured command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Resolve a path that may be relative to `base`.
///
/// Absolute paths are returned as-is.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Definition paths to load: the command line wins over settings.
pub fn definition_paths(cli_paths: &[PathBuf], settings: &Settings) -> Result<Vec<PathBuf>> {
    let paths = if cli_paths.is_empty() {
        settings.workflows.clone()
    } else {
        cli_paths.to_vec()
    };
    if paths.is_empty() {
        bail!("no workflow definitions given: pass PATH arguments or set `workflows` in --config");
    }
    Ok(paths)
}

/// Load and validate the workflow set from `cli_paths` or settings.
pub fn load_workflows(cli_paths: &[PathBuf], settings: &Settings) -> Result<WorkflowSet> {
    let paths = definition_paths(cli_paths, settings)?;
    YamlFileProvider::new(paths)
        .load()
        .context("failed to load workflow definitions")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    pub const CONTENT_YAML: &str = "\
content:
  label: Content
  group: node
  states:
    draft:
      label: Draft
    review:
      label: Review
    published:
      label: Published
      published: true
      default_revision: true
  transitions:
    submit:
      label: Submit for review
      from: [draft]
      to: review
    publish:
      label: Publish
      from: [draft, review]
      to: published
    unpublish:
      label: Unpublish
      from: [published]
      to: draft
";

    /// Write `content` to a fresh temp dir and return (dir guard, file path).
    pub fn write_definitions(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.yaml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_keeps_absolute() {
        assert_eq!(
            resolve_path(Path::new("/abs/x.yaml"), Path::new("/base")),
            PathBuf::from("/abs/x.yaml")
        );
        assert_eq!(
            resolve_path(Path::new("x.yaml"), Path::new("/base")),
            PathBuf::from("/base/x.yaml")
        );
    }

    #[test]
    fn command_line_paths_win() {
        let settings = Settings {
            workflows: vec![PathBuf::from("from-settings")],
            ..Settings::default()
        };
        assert_eq!(
            definition_paths(&[PathBuf::from("cli")], &settings).unwrap(),
            vec![PathBuf::from("cli")]
        );
        assert_eq!(
            definition_paths(&[], &settings).unwrap(),
            vec![PathBuf::from("from-settings")]
        );
    }

    #[test]
    fn no_paths_anywhere_is_error() {
        assert!(definition_paths(&[], &Settings::default()).is_err());
    }

    #[test]
    fn load_workflows_reads_yaml() {
        let (_dir, path) = testing::write_definitions(testing::CONTENT_YAML);
        let set = load_workflows(&[path], &Settings::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.workflow("content").unwrap().transition_count(), 3);
    }
}
