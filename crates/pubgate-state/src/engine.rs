//! # Workflow Engine
//!
//! Reference orchestrator for a single transition request:
//!
//! 1. Resolve the workflow and transition. A miss fails fast.
//! 2. Require the entity's current state to be a source of the transition.
//! 3. Ask the [`TransitionGuard`]. A denial ends the run as rejected, with
//!    the entity untouched.
//! 4. Commit the destination state on the entity.
//! 5. Run the [`EffectApplier`] exactly once.
//!
//! The engine reads one immutable [`WorkflowSet`] snapshot for its whole
//! lifetime. Persisting the entity afterwards is the caller's job, as is
//! serializing concurrent requests for the same entity.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use pubgate_config::WorkflowRegistry;
use pubgate_core::{
    LookupError, PermissionKey, StateId, TransitionDefinition, TransitionId, WorkflowId,
    WorkflowSet,
};
use pubgate_guard::{
    EffectApplier, EffectOutcome, PermissionProvider, TransitionEvent, TransitionGuard,
    WorkflowEntity,
};

use crate::lifecycle::{LifecycleError, TransitionPhase, TransitionRun};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that abort a transition request.
///
/// A guard denial is not an error; see [`TransitionOutcome::Rejected`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A workflow, state, or transition key is not configured.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The entity's current state is not a source of the transition.
    #[error("transition {transition} of workflow {workflow} is not available from state {state}")]
    NotAvailable {
        /// Workflow key.
        workflow: WorkflowId,
        /// Requested transition.
        transition: TransitionId,
        /// The entity's current state.
        state: StateId,
    },

    /// The run was driven through an invalid phase change.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// ─── Outcomes ────────────────────────────────────────────────────────

/// How a transition request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// The guard denied the transition. Nothing changed.
    Rejected {
        /// The permission the principal lacked.
        permission: PermissionKey,
    },
    /// The transition was committed and its effect applied.
    Applied {
        /// State before the transition.
        from: StateId,
        /// State after the transition.
        to: StateId,
        /// What the effect applier did.
        effect: EffectOutcome,
    },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// A finished run together with its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReport {
    pub run: TransitionRun,
    pub outcome: TransitionOutcome,
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Applies configured transitions to entities.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    workflows: Arc<WorkflowSet>,
    guard: TransitionGuard,
    effects: EffectApplier,
}

impl WorkflowEngine {
    pub fn new(workflows: Arc<WorkflowSet>) -> Self {
        Self {
            workflows,
            guard: TransitionGuard::new(),
            effects: EffectApplier::new(),
        }
    }

    /// An engine bound to the registry's current snapshot.
    ///
    /// Later swaps on the registry do not affect this engine.
    pub fn from_registry(registry: &WorkflowRegistry) -> Self {
        Self::new(registry.snapshot())
    }

    /// The configuration snapshot this engine evaluates against.
    pub fn workflows(&self) -> &Arc<WorkflowSet> {
        &self.workflows
    }

    /// Execute `transition_id` of `workflow_id` on `entity` as `principal`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] for unknown keys (including an entity state the
    /// workflow does not declare) and [`EngineError::NotAvailable`] when the
    /// entity's state is not a source of the transition. The entity is not
    /// modified on any error.
    pub fn apply<P, E>(
        &self,
        principal: &P,
        entity: &mut E,
        workflow_id: &str,
        transition_id: &str,
    ) -> EngineResult<TransitionOutcome>
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        self.execute(principal, entity, workflow_id, transition_id)
            .map(|report| report.outcome)
    }

    /// Like [`apply`](Self::apply), also returning the run's phase log.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn execute<P, E>(
        &self,
        principal: &P,
        entity: &mut E,
        workflow_id: &str,
        transition_id: &str,
    ) -> EngineResult<TransitionReport>
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        let mut run = TransitionRun::new();
        let span = tracing::info_span!(
            "transition",
            run_id = %run.id(),
            workflow = workflow_id,
            transition = transition_id,
            entity = %entity.entity_key()
        );
        let _entered = span.enter();

        let workflow = self.workflows.workflow(workflow_id)?;
        let transition = workflow.transition(transition_id)?;
        let from = entity.current_state().clone();
        workflow.state(from.as_str())?;
        if !transition.is_available_from(from.as_str()) {
            return Err(EngineError::NotAvailable {
                workflow: workflow.id().clone(),
                transition: transition.id.clone(),
                state: from,
            });
        }

        let decision = self.guard.check(principal, transition, workflow, &*entity);
        if !decision.allowed {
            run.advance(TransitionPhase::Rejected)?;
            run.advance(TransitionPhase::Done)?;
            tracing::info!(permission = %decision.permission, "transition rejected");
            return Ok(TransitionReport {
                run,
                outcome: TransitionOutcome::Rejected {
                    permission: decision.permission,
                },
            });
        }

        run.advance(TransitionPhase::Accepted)?;
        let to = transition.to.clone();
        entity.set_current_state(to.clone());

        let event = TransitionEvent {
            workflow,
            transition,
            from: &from,
            to: &to,
        };
        let effect = self.effects.handle(&event, entity)?;
        run.advance(TransitionPhase::EffectApplied)?;
        run.advance(TransitionPhase::Done)?;
        tracing::info!(from = %from, to = %to, effect = %effect, "transition applied");

        Ok(TransitionReport {
            run,
            outcome: TransitionOutcome::Applied { from, to, effect },
        })
    }

    /// Transitions available from the entity's current state that the guard
    /// accepts for `principal`, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownWorkflow`] for an unknown workflow and
    /// [`LookupError::UnknownState`] when the entity's current state is not
    /// declared by it.
    pub fn allowed_transitions<'a, P, E>(
        &'a self,
        principal: &P,
        entity: &E,
        workflow_id: &str,
    ) -> Result<Vec<&'a TransitionDefinition>, LookupError>
    where
        P: PermissionProvider + ?Sized,
        E: WorkflowEntity + ?Sized,
    {
        let workflow = self.workflows.workflow(workflow_id)?;
        let current = workflow.state(entity.current_state().as_str())?;
        Ok(workflow
            .transitions_from(current.id.as_str())
            .filter(|transition| self.guard.allowed(principal, *transition, workflow, entity))
            .collect())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
