//! # pubgate-config: Workflow Definition Loading
//!
//! Turns YAML definition files into the immutable [`WorkflowSet`] that the
//! guard and the effect applier read, and keeps the current set in a
//! swappable [`WorkflowRegistry`].
//!
//! - **Parser** (`parser.rs`): YAML to validated [`WorkflowDefinition`]s,
//!   with path-aware errors and unknown-field rejection.
//! - **Provider** (`provider.rs`): the [`WorkflowDefinitionProvider`] seam,
//!   with file/directory and static implementations.
//! - **Registry** (`registry.rs`): load-and-swap snapshot holder.
//!
//! ## Crate Policy
//!
//! - Depends only on `pubgate-core` internally.
//! - A definition set is either fully valid or rejected; nothing is loaded
//!   partially.
//!
//! [`WorkflowSet`]: pubgate_core::WorkflowSet
//! [`WorkflowDefinition`]: pubgate_core::WorkflowDefinition

pub mod error;
pub mod parser;
pub mod provider;
pub mod registry;

pub use error::{ConfigError, ConfigResult};
pub use parser::{load_workflow_file, parse_workflows};
pub use provider::{StaticProvider, WorkflowDefinitionProvider, YamlFileProvider};
pub use registry::WorkflowRegistry;
