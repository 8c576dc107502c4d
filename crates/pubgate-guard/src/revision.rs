//! # State Flag and Default-Revision Primitives
//!
//! Configuration lookups and a revision check that callers can build
//! revision handling on. The effect applier reads `is_published_state`
//! itself; nothing in this crate consumes `is_default_revision_state` or
//! [`has_published_default_revision`]. Promoting or demoting default
//! revisions is left to the calling system.

use pubgate_core::{LookupError, StateId, WorkflowDefinition};

use crate::subject::{DefaultRevisionLoader, WorkflowEntity};

/// Whether `state` is configured as a published state in `workflow`.
///
/// # Errors
///
/// Returns [`LookupError::UnknownState`] on a miss.
pub fn is_published_state(workflow: &WorkflowDefinition, state: &StateId) -> Result<bool, LookupError> {
    Ok(workflow.state(state.as_str())?.is_published_state)
}

/// Whether `state` is configured as a default-revision state in `workflow`.
///
/// # Errors
///
/// Returns [`LookupError::UnknownState`] on a miss.
pub fn is_default_revision_state(
    workflow: &WorkflowDefinition,
    state: &StateId,
) -> Result<bool, LookupError> {
    Ok(workflow.state(state.as_str())?.is_default_revision_state)
}

/// Whether the stored default revision of `entity` is published.
///
/// `false` for never-stored entities, when the loader finds no default
/// revision, and when the revision has no publication semantics.
pub fn has_published_default_revision<E, L>(entity: &E, loader: &L) -> bool
where
    E: WorkflowEntity,
    L: DefaultRevisionLoader<E> + ?Sized,
{
    if entity.is_new() {
        return false;
    }
    let Some(revision) = loader.load_default_revision(entity) else {
        return false;
    };
    revision
        .publication()
        .is_some_and(|publication| publication.is_published())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::subject::ContentEntity;
    use pubgate_core::{StateDefinition, WorkflowId};

    fn sid(s: &str) -> StateId {
        StateId::new(s).unwrap()
    }

    fn workflow() -> WorkflowDefinition {
        WorkflowDefinition::builder(WorkflowId::new("content").unwrap(), "Content")
            .state(StateDefinition {
                id: sid("draft"),
                label: "Draft".to_string(),
                is_published_state: false,
                is_default_revision_state: false,
            })
            .state(StateDefinition {
                id: sid("published"),
                label: "Published".to_string(),
                is_published_state: true,
                is_default_revision_state: true,
            })
            .state(StateDefinition {
                id: sid("archived"),
                label: "Archived".to_string(),
                is_published_state: false,
                is_default_revision_state: true,
            })
            .build()
            .unwrap()
    }

    /// Serves a fixed default revision and counts calls.
    struct Stored {
        revision: Option<ContentEntity>,
        calls: Cell<usize>,
    }

    impl Stored {
        fn new(revision: Option<ContentEntity>) -> Self {
            Self {
                revision,
                calls: Cell::new(0),
            }
        }
    }

    impl DefaultRevisionLoader<ContentEntity> for Stored {
        fn load_default_revision(&self, _entity: &ContentEntity) -> Option<ContentEntity> {
            self.calls.set(self.calls.get() + 1);
            self.revision.clone()
        }
    }

    #[test]
    fn state_flags_come_from_configuration() {
        let wf = workflow();
        assert!(is_published_state(&wf, &sid("published")).unwrap());
        assert!(!is_published_state(&wf, &sid("archived")).unwrap());
        assert!(is_default_revision_state(&wf, &sid("archived")).unwrap());
        assert!(!is_default_revision_state(&wf, &sid("draft")).unwrap());
    }

    #[test]
    fn unknown_state_is_lookup_error() {
        let wf = workflow();
        assert!(is_published_state(&wf, &sid("gone")).is_err());
        assert!(is_default_revision_state(&wf, &sid("gone")).is_err());
    }

    #[test]
    fn new_entity_never_consults_loader() {
        let entity = ContentEntity::new("node/1", sid("draft")).unsaved();
        let loader = Stored::new(Some(ContentEntity::new("node/1", sid("published")).published(true)));
        assert!(!has_published_default_revision(&entity, &loader));
        assert_eq!(loader.calls.get(), 0);
    }

    #[test]
    fn missing_default_revision_is_unpublished() {
        let entity = ContentEntity::new("node/1", sid("draft"));
        assert!(!has_published_default_revision(&entity, &Stored::new(None)));
    }

    #[test]
    fn revision_without_publication_is_unpublished() {
        let entity = ContentEntity::new("block/1", sid("draft"));
        let loader = Stored::new(Some(ContentEntity::without_publication("block/1", sid("published"))));
        assert!(!has_published_default_revision(&entity, &loader));
    }

    #[test]
    fn reports_stored_revision_flag() {
        let entity = ContentEntity::new("node/1", sid("draft"));
        let published = Stored::new(Some(ContentEntity::new("node/1", sid("published")).published(true)));
        let unpublished = Stored::new(Some(ContentEntity::new("node/1", sid("draft"))));
        assert!(has_published_default_revision(&entity, &published));
        assert!(!has_published_default_revision(&entity, &unpublished));
        assert_eq!(published.calls.get(), 1);
    }
}
