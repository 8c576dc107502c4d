//! # Transition Permission Keys
//!
//! Every (workflow, transition) pair in configuration has exactly one
//! permission string, `use <transition> transition in <workflow>`. The
//! guard checks it, the permission surface lists it, and administrators
//! grant it.
//!
//! Keys never contain whitespace (see [`crate::identity`]), so distinct
//! pairs always yield distinct permission strings.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::identity::{TransitionId, WorkflowId};

const PREFIX: &str = "use ";
const INFIX: &str = " transition in ";

/// The permission string that grants one transition in one workflow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionKey(String);

impl PermissionKey {
    /// Derive the permission key for `transition` in `workflow`.
    pub fn for_transition(workflow: &WorkflowId, transition: &TransitionId) -> Self {
        Self(format!("{PREFIX}{transition}{INFIX}{workflow}"))
    }

    /// Access the permission string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the permission string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PermissionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PermissionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
