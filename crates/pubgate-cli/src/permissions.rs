//! # Permissions Subcommand
//!
//! Prints the grantable transition permissions of the loaded workflows.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pubgate_guard::{list_permissions, PermissionMap};

use crate::settings::Settings;
use crate::OutputFormat;

/// Arguments for the `pubgate permissions` subcommand.
#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Workflow definition files or directories.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the permissions subcommand.
pub fn run_permissions(args: &PermissionsArgs, settings: &Settings) -> Result<u8> {
    let set = crate::load_workflows(&args.paths, settings)?;
    let permissions = list_permissions(&set);
    tracing::info!(count = permissions.len(), "listed transition permissions");
    print!("{}", render_permissions(&permissions, args.format)?);
    Ok(0)
}

/// Format a permission map.
pub fn render_permissions(permissions: &PermissionMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(permissions)
                .context("failed to serialize permissions as JSON")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(permissions).context("failed to serialize permissions as YAML")
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, descriptor) in permissions {
                let _ = writeln!(out, "{key}");
                let _ = writeln!(out, "    {}", descriptor.title);
                let _ = writeln!(out, "    {}", descriptor.description);
            }
            Ok(out)
        }
    }
}
