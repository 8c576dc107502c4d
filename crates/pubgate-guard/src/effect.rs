//! # Transition Effect Applier
//!
//! Post-transition side effect: after the engine has committed a
//! transition, the entity's published flag is set to the destination
//! state's `is_published_state`.
//!
//! - The flag comes from configuration only, never from entity data.
//! - The prior flag is irrelevant, so applying the same transition twice
//!   gives the same result.
//! - Entities without publication semantics are left untouched
//!   ([`EffectOutcome::Unsupported`]).
//! - An unknown state aborts before any mutation.
//!
//! Persisting the flag is the caller's job.

use serde::{Deserialize, Serialize};

use pubgate_core::{LookupError, StateId, TransitionDefinition, WorkflowDefinition};

use crate::subject::WorkflowEntity;

/// What the effect applier did to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOutcome {
    /// The published flag was set.
    Published,
    /// The published flag was cleared.
    Unpublished,
    /// The entity type has no published flag; nothing changed.
    Unsupported,
}

impl EffectOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Unpublished => "unpublished",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for EffectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed transition, as observed by the effect applier.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEvent<'a> {
    pub workflow: &'a WorkflowDefinition,
    pub transition: &'a TransitionDefinition,
    pub from: &'a StateId,
    pub to: &'a StateId,
}

/// Applies the publication effect of committed transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectApplier;

impl EffectApplier {
    pub fn new() -> Self {
        Self
    }

    /// Apply the effect of a transition from `from_state` to `to_state`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownState`] if either state is not declared
    /// by `workflow`. The entity is not modified in that case.
    pub fn on_transitioned<E>(
        &self,
        entity: &mut E,
        from_state: &StateId,
        to_state: &StateId,
        workflow: &WorkflowDefinition,
    ) -> Result<EffectOutcome, LookupError>
    where
        E: WorkflowEntity + ?Sized,
    {
        workflow.state(from_state.as_str())?;
        let is_published_state = workflow.state(to_state.as_str())?.is_published_state;

        let outcome = match entity.publication_mut() {
            Some(publication) if is_published_state => {
                publication.set_published();
                EffectOutcome::Published
            }
            Some(publication) => {
                publication.set_unpublished();
                EffectOutcome::Unpublished
            }
            None => EffectOutcome::Unsupported,
        };

        tracing::debug!(
            workflow = %workflow.id(),
            entity = %entity.entity_key(),
            from = %from_state,
            to = %to_state,
            outcome = %outcome,
            "applied transition effect"
        );
        Ok(outcome)
    }

    /// Apply the effect of a committed transition event.
    ///
    /// The event's transition must belong to its workflow.
    ///
    /// # Errors
    ///
    /// See [`on_transitioned`](Self::on_transitioned).
    pub fn handle<E>(&self, event: &TransitionEvent<'_>, entity: &mut E) -> Result<EffectOutcome, LookupError>
    where
        E: WorkflowEntity + ?Sized,
    {
        let _span = tracing::debug_span!("effect", transition = %event.transition.id).entered();
        self.on_transitioned(entity, event.from, event.to, event.workflow)
    }
}
