//! # Transition Guard
//!
//! Pre-transition authorization. A principal may execute a transition iff
//! it holds that transition's permission key, exactly as derived by
//! [`PermissionKey::for_transition`]. There is no role hierarchy, no
//! wildcard, and no implicit grant: an empty permission set denies every
//! transition.
//!
//! The decision is an explicit `bool`. Denial is an answer, not an error;
//! the orchestrating engine stops the transition and reports it.

use pubgate_core::{LookupError, PermissionKey, TransitionDefinition, WorkflowDefinition};

use crate::subject::{PermissionProvider, WorkflowEntity};

/// Outcome of a guard evaluation, with the permission that was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    /// The permission key the principal needed.
    pub permission: PermissionKey,
    /// Whether the principal holds it.
    pub allowed: bool,
}

/// Decides whether a principal may execute a transition.
///
/// Stateless and side-effect free; one instance can serve every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionGuard;

impl TransitionGuard {
    pub fn new() -> Self {
        Self
    }

    /// Whether `principal` may execute `transition` of `workflow` on `entity`.
    ///
    /// `transition` must belong to `workflow`. The entity does not influence
    /// the decision; it is part of the contract so that callers pass the
    /// full transition context.
    pub fn allowed<P, E>(
        &self,
        principal: &P,
        transition: &TransitionDefinition,
        workflow: &WorkflowDefinition,
        entity: &E,
    ) -> bool
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        self.check(principal, transition, workflow, entity).allowed
    }

    /// Like [`allowed`](Self::allowed), returning the checked permission too.
    pub fn check<P, E>(
        &self,
        principal: &P,
        transition: &TransitionDefinition,
        workflow: &WorkflowDefinition,
        entity: &E,
    ) -> GuardDecision
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        debug_assert!(
            workflow.transition(transition.id.as_str()) == Ok(transition),
            "transition {} does not belong to workflow {}",
            transition.id,
            workflow.id()
        );

        let permission = PermissionKey::for_transition(workflow.id(), &transition.id);
        let allowed = principal.has_permission(permission.as_str());
        if !allowed {
            tracing::debug!(
                workflow = %workflow.id(),
                transition = %transition.id,
                entity = %entity.entity_key(),
                permission = %permission,
                "transition denied: permission not granted"
            );
        }
        GuardDecision {
            permission,
            allowed,
        }
    }

    /// Guard decision for a transition named by key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownTransition`] if `workflow` has no such
    /// transition.
    pub fn check_key<P, E>(
        &self,
        principal: &P,
        transition: &str,
        workflow: &WorkflowDefinition,
        entity: &E,
    ) -> Result<GuardDecision, LookupError>
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        let transition = workflow.transition(transition)?;
        Ok(self.check(principal, transition, workflow, entity))
    }
}
