//! # CLI Settings
//!
//! Optional YAML settings file passed with `--config`:
//!
//! ```yaml
//! workflows:
//!   - workflows/
//!   - extra/article.yaml
//! log_format: json
//! ```
//!
//! Relative `workflows` entries are resolved against the settings file's
//! directory. Without `--config`, defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings loaded from the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Definition files and directories used when none are given on the
    /// command line.
    #[serde(default)]
    pub workflows: Vec<PathBuf>,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from `path`, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let mut settings: Settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        };
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        settings.workflows = settings
            .workflows
            .into_iter()
            .map(|p| crate::resolve_path(&p, base))
            .collect();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert!(settings.workflows.is_empty());
        assert_eq!(settings.log_format, LogFormat::Text);
    }

    #[test]
    fn relative_workflow_paths_follow_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pubgate.yaml");
        std::fs::write(
            &path,
            "workflows:\n  - defs\n  - /etc/pubgate/extra.yaml\nlog_format: json\n",
        )
        .unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(
            settings.workflows,
            vec![dir.path().join("defs"), PathBuf::from("/etc/pubgate/extra.yaml")]
        );
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pubgate.yaml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(Settings::load(Some(&path)).unwrap(), Settings::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pubgate.yaml");
        std::fs::write(&path, "workflow: [defs]\n").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid settings file"));
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.yaml"))).is_err());
    }
}
