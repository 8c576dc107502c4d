//! # Workflow Identifiers
//!
//! Newtypes for the three configuration keys of a workflow definition:
//! the workflow itself, its states, and its transitions. You cannot pass a
//! [`StateId`] where a [`TransitionId`] is expected.
//!
//! ## Validation
//!
//! Every key must be non-empty and must not contain whitespace. Permission
//! keys are built as `use <transition> transition in <workflow>`; with
//! whitespace-free keys no two (workflow, transition) pairs can produce the
//! same permission string.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn validate_key(kind: &'static str, value: String) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyKey { kind });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::WhitespaceInKey { kind, value });
    }
    Ok(value)
}

/// Stable key of a workflow (e.g. `content`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Create a workflow key, rejecting empty or whitespace-bearing input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyKey`] or
    /// [`ValidationError::WhitespaceInKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        validate_key("workflow", value.into()).map(Self)
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key of a state, unique within its workflow (e.g. `draft`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateId(String);

impl StateId {
    /// Create a state key, rejecting empty or whitespace-bearing input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyKey`] or
    /// [`ValidationError::WhitespaceInKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        validate_key("state", value.into()).map(Self)
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key of a transition, unique within its workflow (e.g. `publish`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransitionId(String);

impl TransitionId {
    /// Create a transition key, rejecting empty or whitespace-bearing input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyKey`] or
    /// [`ValidationError::WhitespaceInKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        validate_key("transition", value.into()).map(Self)
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkflowId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for StateId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for TransitionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkflowId> for String {
    fn from(id: WorkflowId) -> Self {
        id.0
    }
}

impl From<StateId> for String {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl From<TransitionId> for String {
    fn from(id: TransitionId) -> Self {
        id.0
    }
}

// Keys borrow as `str` so maps keyed by them can be queried with `&str`.
impl Borrow<str> for WorkflowId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for TransitionId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_keys() {
        assert_eq!(WorkflowId::new("content").unwrap().as_str(), "content");
        assert_eq!(StateId::new("needs_review").unwrap().as_str(), "needs_review");
        assert_eq!(TransitionId::new("publish").unwrap().to_string(), "publish");
    }

    #[test]
    fn rejects_empty_keys() {
        let err = WorkflowId::new("").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyKey { kind: "workflow" }));
        assert!(StateId::new(String::new()).is_err());
        assert!(TransitionId::new("").is_err());
    }

    #[test]
    fn rejects_whitespace_keys() {
        assert!(WorkflowId::new("my workflow").is_err());
        assert!(StateId::new(" draft").is_err());
        assert!(TransitionId::new("publish\t").is_err());
        let err = TransitionId::new("a b").unwrap_err();
        assert!(format!("{err}").contains("a b"));
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: StateId = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(ok.as_str(), "draft");
        let bad: Result<StateId, _> = serde_json::from_str("\"two words\"");
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = WorkflowId::new("content").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"content\"");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = WorkflowId::new("article").unwrap();
        let b = WorkflowId::new("content").unwrap();
        assert!(a < b);
    }
}
