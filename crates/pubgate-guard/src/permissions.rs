//! # Permission Surface
//!
//! Enumerates every transition permission derivable from configuration,
//! for an access-control administration layer to present and grant.
//!
//! One entry per (workflow, transition):
//!
//! - key: `use <transition> transition in <workflow>`
//! - title: `Use the <transition label> transition`
//! - description: `Workflow group <workflow label>`
//!
//! Output is a `BTreeMap`, so iteration order is stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pubgate_core::{PermissionKey, WorkflowDefinition, WorkflowSet};

/// Human-readable description of one transition permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    pub title: String,
    pub description: String,
}

/// Permission key to descriptor, sorted by key.
pub type PermissionMap = BTreeMap<PermissionKey, PermissionDescriptor>;

/// Every transition permission of every workflow in `workflows`.
pub fn list_permissions(workflows: &WorkflowSet) -> PermissionMap {
    let mut permissions = PermissionMap::new();
    for workflow in workflows.iter() {
        permissions.extend(list_workflow_permissions(workflow));
    }
    permissions
}

/// Every transition permission of one workflow.
pub fn list_workflow_permissions(workflow: &WorkflowDefinition) -> PermissionMap {
    workflow
        .transitions()
        .map(|transition| {
            (
                PermissionKey::for_transition(workflow.id(), &transition.id),
                PermissionDescriptor {
                    title: format!("Use the {} transition", transition.label),
                    description: format!("Workflow group {}", workflow.label()),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubgate_core::{StateDefinition, StateId, TransitionDefinition, TransitionId, WorkflowId};

    fn workflow(key: &str, label: &str, transitions: &[(&str, &str)]) -> WorkflowDefinition {
        let mut builder = WorkflowDefinition::builder(WorkflowId::new(key).unwrap(), label).state(
            StateDefinition {
                id: StateId::new("draft").unwrap(),
                label: "Draft".to_string(),
                is_published_state: false,
                is_default_revision_state: false,
            },
        );
        for (id, label) in transitions {
            builder = builder.transition(TransitionDefinition {
                id: TransitionId::new(*id).unwrap(),
                label: label.to_string(),
                from: vec![StateId::new("draft").unwrap()],
                to: StateId::new("draft").unwrap(),
            });
        }
        builder.build().unwrap()
    }

    #[test]
    fn single_transition_entry() {
        let set = WorkflowSet::from_definitions([workflow("content", "Content", &[("publish", "Publish")])])
            .unwrap();
        let permissions = list_permissions(&set);
        assert_eq!(permissions.len(), 1);
        let entry = permissions.get("use publish transition in content").unwrap();
        assert_eq!(entry.title, "Use the Publish transition");
        assert_eq!(entry.description, "Workflow group Content");
    }

    #[test]
    fn one_entry_per_transition_across_workflows() {
        let set = WorkflowSet::from_definitions([
            workflow("content", "Content", &[("publish", "Publish"), ("unpublish", "Unpublish")]),
            workflow("article", "Article", &[("publish", "Publish")]),
            workflow("page", "Page", &[]),
        ])
        .unwrap();
        let permissions = list_permissions(&set);
        assert_eq!(permissions.len(), 3);
        assert!(permissions.contains_key("use publish transition in article"));
        assert!(permissions.contains_key("use publish transition in content"));
        assert!(permissions.contains_key("use unpublish transition in content"));
    }

    #[test]
    fn empty_set_has_no_permissions() {
        assert!(list_permissions(&WorkflowSet::new()).is_empty());
    }

    #[test]
    fn serializes_as_key_map() {
        let wf = workflow("content", "Content", &[("publish", "Publish")]);
        let json = serde_json::to_value(list_workflow_permissions(&wf)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "use publish transition in content": {
                    "title": "Use the Publish transition",
                    "description": "Workflow group Content"
                }
            })
        );
    }
}
