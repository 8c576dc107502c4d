//! Configuration loading errors.
//!
//! Every variant that comes from a file carries its path, so a broken
//! definition set can be traced to the file that broke it.

use std::path::PathBuf;

use pubgate_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading workflow definitions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A definition in the file failed validation.
    #[error("invalid workflow definition in {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },

    /// The same workflow key was defined in two places.
    #[error("workflow \"{workflow}\" in {path} is already defined by an earlier file")]
    DuplicateWorkflow { workflow: String, path: PathBuf },

    /// No definition files were found under the configured paths.
    #[error("no workflow definition files found under {paths:?}")]
    NoDefinitions { paths: Vec<PathBuf> },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
