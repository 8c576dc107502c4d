//! # Workflow Definition Model
//!
//! Immutable, validated configuration: a [`WorkflowDefinition`] owns its
//! ordered states and transitions, and a [`WorkflowSet`] is the snapshot of
//! every loaded workflow that all evaluations share.
//!
//! Definitions are only constructed through [`WorkflowDefinitionBuilder`],
//! which enforces the structural invariants (unique keys, declared states,
//! non-empty source sets). Once built, nothing mutates them; a reload
//! produces a new [`WorkflowSet`].
//!
//! Lookups return [`LookupError`] on a miss. There is no fallback state and
//! no default flag.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{LookupError, ValidationError};
use crate::identity::{StateId, TransitionId, WorkflowId};

// ─── States and transitions ──────────────────────────────────────────

/// A configured workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDefinition {
    /// Key, unique within the workflow.
    pub id: StateId,
    /// Human-readable label.
    pub label: String,
    /// Entities entering this state become published.
    pub is_published_state: bool,
    /// Revisions saved in this state become the default revision.
    pub is_default_revision_state: bool,
}

/// A configured transition: a named edge from a set of source states to a
/// single destination state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionDefinition {
    /// Key, unique within the workflow.
    pub id: TransitionId,
    /// Human-readable label, used in permission titles.
    pub label: String,
    /// States from which this transition may be taken.
    pub from: Vec<StateId>,
    /// Destination state.
    pub to: StateId,
}

impl TransitionDefinition {
    /// Whether the transition may be taken from `state`.
    pub fn is_available_from(&self, state: &str) -> bool {
        self.from.iter().any(|s| s.as_str() == state)
    }
}

// ─── Workflow ────────────────────────────────────────────────────────

/// A validated workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowDefinition {
    id: WorkflowId,
    label: String,
    group: Option<String>,
    states: IndexMap<StateId, StateDefinition>,
    transitions: IndexMap<TransitionId, TransitionDefinition>,
}

impl WorkflowDefinition {
    /// Start building a workflow definition.
    pub fn builder(id: WorkflowId, label: impl Into<String>) -> WorkflowDefinitionBuilder {
        WorkflowDefinitionBuilder {
            id,
            label: label.into(),
            group: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Workflow key.
    pub fn id(&self) -> &WorkflowId {
        &self.id
    }

    /// Human-readable label, used in permission descriptions.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Entity group this workflow applies to, if configured.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// States in configuration order.
    pub fn states(&self) -> impl Iterator<Item = &StateDefinition> {
        self.states.values()
    }

    /// Transitions in configuration order.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionDefinition> {
        self.transitions.values()
    }

    /// Number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Look up a state by key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownState`] if the workflow has no such state.
    pub fn state(&self, id: &str) -> Result<&StateDefinition, LookupError> {
        self.states.get(id).ok_or_else(|| LookupError::UnknownState {
            workflow: self.id.to_string(),
            state: id.to_string(),
        })
    }

    /// Look up a transition by key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownTransition`] if the workflow has no such
    /// transition.
    pub fn transition(&self, id: &str) -> Result<&TransitionDefinition, LookupError> {
        self.transitions
            .get(id)
            .ok_or_else(|| LookupError::UnknownTransition {
                workflow: self.id.to_string(),
                transition: id.to_string(),
            })
    }

    /// Transitions that may be taken from `state`, in configuration order.
    pub fn transitions_from<'a, 's>(
        &'a self,
        state: &'s str,
    ) -> impl Iterator<Item = &'a TransitionDefinition> + 's
    where
        'a: 's,
    {
        self.transitions
            .values()
            .filter(move |t| t.is_available_from(state))
    }
}

/// Builder for [`WorkflowDefinition`]. Validation happens in [`build`].
///
/// [`build`]: WorkflowDefinitionBuilder::build
#[derive(Debug)]
pub struct WorkflowDefinitionBuilder {
    id: WorkflowId,
    label: String,
    group: Option<String>,
    states: Vec<StateDefinition>,
    transitions: Vec<TransitionDefinition>,
}

impl WorkflowDefinitionBuilder {
    /// Set the entity group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Append a state.
    pub fn state(mut self, state: StateDefinition) -> Self {
        self.states.push(state);
        self
    }

    /// Append a transition.
    pub fn transition(mut self, transition: TransitionDefinition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Validate and freeze the definition.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NoStates`] if no state was added.
    /// - [`ValidationError::DuplicateState`] / [`ValidationError::DuplicateTransition`]
    ///   on repeated keys.
    /// - [`ValidationError::EmptySourceStates`] if a transition has no `from`.
    /// - [`ValidationError::UndeclaredState`] if a transition names a state
    ///   the workflow does not declare.
    pub fn build(self) -> Result<WorkflowDefinition, ValidationError> {
        let workflow = self.id.to_string();
        if self.states.is_empty() {
            return Err(ValidationError::NoStates { workflow });
        }

        let mut states: IndexMap<StateId, StateDefinition> =
            IndexMap::with_capacity(self.states.len());
        for state in self.states {
            if states.contains_key(&state.id) {
                return Err(ValidationError::DuplicateState {
                    workflow,
                    state: state.id.to_string(),
                });
            }
            states.insert(state.id.clone(), state);
        }

        let mut transitions: IndexMap<TransitionId, TransitionDefinition> =
            IndexMap::with_capacity(self.transitions.len());
        for transition in self.transitions {
            if transitions.contains_key(&transition.id) {
                return Err(ValidationError::DuplicateTransition {
                    workflow,
                    transition: transition.id.to_string(),
                });
            }
            if transition.from.is_empty() {
                return Err(ValidationError::EmptySourceStates {
                    workflow,
                    transition: transition.id.to_string(),
                });
            }
            let undeclared = transition
                .from
                .iter()
                .chain(std::iter::once(&transition.to))
                .find(|s| !states.contains_key(*s));
            if let Some(state) = undeclared {
                return Err(ValidationError::UndeclaredState {
                    workflow,
                    transition: transition.id.to_string(),
                    state: state.to_string(),
                });
            }
            transitions.insert(transition.id.clone(), transition);
        }

        Ok(WorkflowDefinition {
            id: self.id,
            label: self.label,
            group: self.group,
            states,
            transitions,
        })
    }
}

// ─── Workflow set ────────────────────────────────────────────────────

/// Every loaded workflow, keyed by workflow key.
///
/// A `WorkflowSet` is a read-only snapshot. Share it behind an `Arc`; to
/// reload, build a new one and swap the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowSet {
    workflows: BTreeMap<WorkflowId, WorkflowDefinition>,
}

impl WorkflowSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateWorkflow`] if two definitions
    /// share a key.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = WorkflowDefinition>,
    ) -> Result<Self, ValidationError> {
        let mut set = Self::new();
        for definition in definitions {
            set.insert(definition)?;
        }
        Ok(set)
    }

    /// Add a definition to a set under construction.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateWorkflow`] if the key is taken.
    pub fn insert(&mut self, definition: WorkflowDefinition) -> Result<(), ValidationError> {
        if self.workflows.contains_key(definition.id()) {
            return Err(ValidationError::DuplicateWorkflow {
                workflow: definition.id().to_string(),
            });
        }
        self.workflows.insert(definition.id().clone(), definition);
        Ok(())
    }

    /// Look up a workflow by key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownWorkflow`] on a miss.
    pub fn workflow(&self, id: &str) -> Result<&WorkflowDefinition, LookupError> {
        self.workflows
            .get(id)
            .ok_or_else(|| LookupError::UnknownWorkflow {
                workflow: id.to_string(),
            })
    }

    /// Workflows sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = &WorkflowDefinition> {
        self.workflows.values()
    }

    /// Number of workflows.
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}
