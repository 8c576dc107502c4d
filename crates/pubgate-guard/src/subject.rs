//! # Principals and Entities
//!
//! The collaborator seams this crate consumes. Callers plug their own user
//! and content types in by implementing these traits; [`Principal`] and
//! [`ContentEntity`] are ready-made in-memory implementations.
//!
//! Publication is a capability, not a requirement: an entity type that has
//! no published flag returns `None` from [`WorkflowEntity::publication_mut`]
//! and the effect applier leaves it alone.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pubgate_core::StateId;

// ─── Principal ───────────────────────────────────────────────────────

/// Answers whether the acting user holds a named permission.
pub trait PermissionProvider {
    /// Whether `permission` is granted. Unknown permissions are not granted.
    fn has_permission(&self, permission: &str) -> bool;
}

impl<T: PermissionProvider + ?Sized> PermissionProvider for &T {
    fn has_permission(&self, permission: &str) -> bool {
        (**self).has_permission(permission)
    }
}

/// An acting user with an explicit set of granted permission strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier, used for diagnostics only.
    pub id: String,
    permissions: BTreeSet<String>,
}

impl Principal {
    /// A principal with no permissions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Builder-style grant.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.grant(permission);
        self
    }

    /// Grant a permission. Returns `false` if it was already held.
    pub fn grant(&mut self, permission: impl Into<String>) -> bool {
        self.permissions.insert(permission.into())
    }

    /// Revoke a permission. Returns `false` if it was not held.
    pub fn revoke(&mut self, permission: &str) -> bool {
        self.permissions.remove(permission)
    }

    /// Granted permissions in sorted order.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }
}

impl PermissionProvider for Principal {
    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

// ─── Entity ──────────────────────────────────────────────────────────

/// Publication semantics of an entity: a single published flag.
pub trait Publishable {
    /// Current value of the published flag.
    fn is_published(&self) -> bool;
    /// Set the published flag.
    fn set_published(&mut self);
    /// Clear the published flag.
    fn set_unpublished(&mut self);
}

/// A content entity moving through a workflow.
pub trait WorkflowEntity {
    /// Stable key for log and error context.
    fn entity_key(&self) -> String;

    /// The entity's current workflow state.
    fn current_state(&self) -> &StateId;

    /// Record a new workflow state. Only the orchestrating engine calls this.
    fn set_current_state(&mut self, state: StateId);

    /// Whether the entity has never been stored.
    fn is_new(&self) -> bool {
        false
    }

    /// Read access to publication semantics, if the type supports them.
    fn publication(&self) -> Option<&dyn Publishable> {
        None
    }

    /// Write access to publication semantics, if the type supports them.
    fn publication_mut(&mut self) -> Option<&mut dyn Publishable> {
        None
    }
}

/// Loads the stored default revision of an entity.
pub trait DefaultRevisionLoader<E> {
    /// The stored default revision, or `None` if there is none (for
    /// example a never-saved entity).
    fn load_default_revision(&self, entity: &E) -> Option<E>;
}

// ─── In-memory entity ────────────────────────────────────────────────

/// Published flag of an entity type that supports publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub published: bool,
}

impl Publishable for Publication {
    fn is_published(&self) -> bool {
        self.published
    }

    fn set_published(&mut self) {
        self.published = true;
    }

    fn set_unpublished(&mut self) {
        self.published = false;
    }
}

/// Plain in-memory content entity.
///
/// `publication` is `None` for content types without publication semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub key: String,
    pub state: StateId,
    pub publication: Option<Publication>,
    pub is_new: bool,
}

impl ContentEntity {
    /// A stored, unpublished entity with publication semantics.
    pub fn new(key: impl Into<String>, state: StateId) -> Self {
        Self {
            key: key.into(),
            state,
            publication: Some(Publication::default()),
            is_new: false,
        }
    }

    /// A stored entity whose type has no published flag.
    pub fn without_publication(key: impl Into<String>, state: StateId) -> Self {
        Self {
            publication: None,
            ..Self::new(key, state)
        }
    }

    /// Builder-style published flag.
    pub fn published(mut self, published: bool) -> Self {
        self.publication = Some(Publication { published });
        self
    }

    /// Mark the entity as never stored.
    pub fn unsaved(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// The published flag, or `None` without publication semantics.
    pub fn is_published(&self) -> Option<bool> {
        self.publication.map(|p| p.published)
    }
}

impl WorkflowEntity for ContentEntity {
    fn entity_key(&self) -> String {
        self.key.clone()
    }

    fn current_state(&self) -> &StateId {
        &self.state
    }

    fn set_current_state(&mut self, state: StateId) {
        self.state = state;
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn publication(&self) -> Option<&dyn Publishable> {
        self.publication.as_ref().map(|p| p as &dyn Publishable)
    }

    fn publication_mut(&mut self) -> Option<&mut dyn Publishable> {
        self.publication.as_mut().map(|p| p as &mut dyn Publishable)
    }
}
