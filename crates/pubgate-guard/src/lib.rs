//! # pubgate-guard: Transition Guard and Publication Effects
//!
//! The two decision points around a content state transition, plus the
//! permission surface they imply.
//!
//! - **Guard** (`guard.rs`): before a transition, the acting principal must
//!   hold `use <transition> transition in <workflow>`. Explicit `bool`.
//!
//! - **Effect** (`effect.rs`): after a committed transition, the entity's
//!   published flag follows the destination state's configuration. Entity
//!   types without a published flag are skipped.
//!
//! - **Permission surface** (`permissions.rs`): one grantable permission per
//!   configured transition, with a human-readable title and description.
//!
//! - **Revision primitives** (`revision.rs`): state flag lookups and a
//!   default-revision check, exposed for callers.
//!
//! - **Subjects** (`subject.rs`): the principal and entity traits the above
//!   consume, with in-memory implementations.
//!
//! Everything here is synchronous and stateless. Configuration arrives as
//! explicit `&WorkflowDefinition` / `&WorkflowSet` arguments.

pub mod effect;
pub mod guard;
pub mod permissions;
pub mod revision;
pub mod subject;

// ─── Decision points ────────────────────────────────────────────────

pub use effect::{EffectApplier, EffectOutcome, TransitionEvent};
pub use guard::{GuardDecision, TransitionGuard};

// ─── Permission surface ─────────────────────────────────────────────

pub use permissions::{list_permissions, list_workflow_permissions, PermissionDescriptor, PermissionMap};

// ─── Revision primitives ────────────────────────────────────────────

pub use revision::{has_published_default_revision, is_default_revision_state, is_published_state};

// ─── Subjects ───────────────────────────────────────────────────────

pub use subject::{
    ContentEntity, DefaultRevisionLoader, PermissionProvider, Principal, Publication, Publishable,
    WorkflowEntity,
};
