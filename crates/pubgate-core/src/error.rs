//! # Error Hierarchy
//!
//! Structured error types shared by every pubgate crate, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Authorization denial is deliberately absent: the guard answers `false`,
//! it never raises. Likewise an entity without publication semantics is a
//! no-op, not an error. What remains are configuration faults, which must
//! abort the operation instead of being papered over with a default.

use thiserror::Error;

/// A configuration key that does not exist in the loaded workflow set.
///
/// This is a programmer or configuration error. Callers must fail fast: a
/// guessed `is_published_state` could publish content by accident.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No workflow with this key is loaded.
    #[error("unknown workflow \"{workflow}\"")]
    UnknownWorkflow {
        /// The requested workflow key.
        workflow: String,
    },

    /// The workflow has no state with this key.
    #[error("unknown state \"{state}\" in workflow \"{workflow}\"")]
    UnknownState {
        /// The workflow that was searched.
        workflow: String,
        /// The requested state key.
        state: String,
    },

    /// The workflow has no transition with this key.
    #[error("unknown transition \"{transition}\" in workflow \"{workflow}\"")]
    UnknownTransition {
        /// The workflow that was searched.
        workflow: String,
        /// The requested transition key.
        transition: String,
    },
}

/// Validation errors for identifiers and workflow definitions.
///
/// Each variant names the offending workflow and key so that a broken
/// definition file can be fixed without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier was empty.
    #[error("{kind} key must be non-empty")]
    EmptyKey {
        /// Which kind of key (workflow, state, transition).
        kind: &'static str,
    },

    /// An identifier contained whitespace.
    #[error("{kind} key \"{value}\" must not contain whitespace")]
    WhitespaceInKey {
        /// Which kind of key (workflow, state, transition).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A workflow declares no states.
    #[error("workflow \"{workflow}\" declares no states")]
    NoStates {
        /// The workflow key.
        workflow: String,
    },

    /// A state key appears twice in one workflow.
    #[error("workflow \"{workflow}\" declares state \"{state}\" more than once")]
    DuplicateState {
        /// The workflow key.
        workflow: String,
        /// The repeated state key.
        state: String,
    },

    /// A transition key appears twice in one workflow.
    #[error("workflow \"{workflow}\" declares transition \"{transition}\" more than once")]
    DuplicateTransition {
        /// The workflow key.
        workflow: String,
        /// The repeated transition key.
        transition: String,
    },

    /// A transition has an empty source state set.
    #[error("transition \"{transition}\" in workflow \"{workflow}\" has no source states")]
    EmptySourceStates {
        /// The workflow key.
        workflow: String,
        /// The transition key.
        transition: String,
    },

    /// A transition references a state the workflow does not declare.
    #[error("transition \"{transition}\" in workflow \"{workflow}\" references undeclared state \"{state}\"")]
    UndeclaredState {
        /// The workflow key.
        workflow: String,
        /// The transition key.
        transition: String,
        /// The undeclared state key.
        state: String,
    },

    /// A workflow key appears twice in one workflow set.
    #[error("workflow \"{workflow}\" is defined more than once")]
    DuplicateWorkflow {
        /// The repeated workflow key.
        workflow: String,
    },
}
