//! # Workflow Definition Providers
//!
//! A [`WorkflowDefinitionProvider`] produces a complete, validated
//! [`WorkflowSet`]. The registry calls it on startup and again on reload.
//!
//! - [`YamlFileProvider`] reads definition files and directories.
//! - [`StaticProvider`] serves a set built in code (tests, embedding).

use std::path::{Path, PathBuf};

use pubgate_core::WorkflowSet;

use crate::error::{ConfigError, ConfigResult};
use crate::parser::load_workflow_file;

/// Supplies the workflow definitions the guard and effect applier read.
pub trait WorkflowDefinitionProvider {
    /// Load a fresh, validated workflow set.
    fn load(&self) -> ConfigResult<WorkflowSet>;
}

/// Serves a fixed, in-memory workflow set.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    set: WorkflowSet,
}

impl StaticProvider {
    /// Wrap an already built set.
    pub fn new(set: WorkflowSet) -> Self {
        Self { set }
    }
}

impl WorkflowDefinitionProvider for StaticProvider {
    fn load(&self) -> ConfigResult<WorkflowSet> {
        Ok(self.set.clone())
    }
}

/// Loads definitions from YAML files.
///
/// Each configured path is either a file, read as-is, or a directory, whose
/// `*.yml` and `*.yaml` entries are read in file-name order (not
/// recursively). All definitions merge into one set; defining a workflow key
/// twice is an error.
#[derive(Debug, Clone)]
pub struct YamlFileProvider {
    paths: Vec<PathBuf>,
}

impl YamlFileProvider {
    /// Create a provider over the given files and directories.
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Expand directories into their definition files.
    fn definition_files(&self) -> ConfigResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                files.extend(yaml_files_in(path)?);
            } else if path.exists() {
                files.push(path.clone());
            } else {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
        }
        Ok(files)
    }
}

impl WorkflowDefinitionProvider for YamlFileProvider {
    fn load(&self) -> ConfigResult<WorkflowSet> {
        let files = self.definition_files()?;
        if files.is_empty() {
            return Err(ConfigError::NoDefinitions {
                paths: self.paths.clone(),
            });
        }

        let mut set = WorkflowSet::new();
        for file in &files {
            for definition in load_workflow_file(file)? {
                let workflow = definition.id().to_string();
                set.insert(definition)
                    .map_err(|_| ConfigError::DuplicateWorkflow {
                        workflow,
                        path: file.clone(),
                    })?;
            }
        }

        tracing::info!(
            files = files.len(),
            workflows = set.len(),
            "loaded workflow definitions"
        );
        Ok(set)
    }
}

fn yaml_files_in(dir: &Path) -> ConfigResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if is_yaml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
