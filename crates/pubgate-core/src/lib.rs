#![deny(missing_docs)]

//! # pubgate-core: Foundational Types for pubgate
//!
//! This crate defines the types that every other pubgate crate depends on.
//! It has no internal crate dependencies; only `serde`, `indexmap`, and
//! `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for configuration keys.** [`WorkflowId`],
//!    [`StateId`], and [`TransitionId`] are distinct, validated types.
//!
//! 2. **Configuration is immutable.** A [`WorkflowDefinition`] is only
//!    produced by its validating builder and never mutated afterwards. A
//!    [`WorkflowSet`] is the snapshot every evaluation reads; reloads swap
//!    the snapshot, they do not edit it.
//!
//! 3. **One permission per transition.** [`PermissionKey::for_transition`]
//!    is the only place the `use <transition> transition in <workflow>`
//!    format is spelled out.
//!
//! 4. **Lookup misses fail fast.** [`LookupError`] is returned for unknown
//!    keys; nothing guesses a default state or flag.

pub mod error;
pub mod identity;
pub mod permission;
pub mod workflow;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{LookupError, ValidationError};
pub use identity::{StateId, TransitionId, WorkflowId};
pub use permission::PermissionKey;
pub use workflow::{
    StateDefinition, TransitionDefinition, WorkflowDefinition, WorkflowDefinitionBuilder,
    WorkflowSet,
};
