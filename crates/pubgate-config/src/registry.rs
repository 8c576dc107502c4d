//! # Workflow Registry
//!
//! Holds the process-wide [`WorkflowSet`] snapshot.
//!
//! Readers call [`WorkflowRegistry::snapshot`] and keep the returned `Arc`
//! for the whole evaluation. A reload builds a complete new set and swaps
//! the reference; a set that is already handed out is never edited, so an
//! in-flight guard check and effect application always see one consistent
//! configuration.
//!
//! The lock is `parking_lot::RwLock` and is held only for the pointer
//! clone or the pointer swap, never while loading.

use std::sync::Arc;

use parking_lot::RwLock;
use pubgate_core::WorkflowSet;

use crate::error::ConfigResult;
use crate::provider::WorkflowDefinitionProvider;

/// Cloneable handle to the current configuration snapshot.
#[derive(Debug, Clone)]
pub struct WorkflowRegistry {
    current: Arc<RwLock<Arc<WorkflowSet>>>,
}

impl WorkflowRegistry {
    /// Create a registry serving `set`.
    pub fn new(set: WorkflowSet) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(set))),
        }
    }

    /// Create a registry from a provider's first load.
    pub fn from_provider(provider: &dyn WorkflowDefinitionProvider) -> ConfigResult<Self> {
        Ok(Self::new(provider.load()?))
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<WorkflowSet> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot, returning the previous one.
    pub fn swap(&self, set: WorkflowSet) -> Arc<WorkflowSet> {
        self.install(Arc::new(set))
    }

    fn install(&self, next: Arc<WorkflowSet>) -> Arc<WorkflowSet> {
        let workflows = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!(workflows, "swapped workflow configuration snapshot");
        previous
    }

    /// Load a new set from `provider` and swap it in.
    ///
    /// Returns the set this call loaded, even if another thread has swapped
    /// in a newer one since. On error the current snapshot stays in place.
    pub fn reload(&self, provider: &dyn WorkflowDefinitionProvider) -> ConfigResult<Arc<WorkflowSet>> {
        let set = match provider.load() {
            Ok(set) => Arc::new(set),
            Err(e) => {
                tracing::warn!(error = %e, "workflow reload failed; keeping current snapshot");
                return Err(e);
            }
        };
        self.install(Arc::clone(&set));
        Ok(set)
    }
}
