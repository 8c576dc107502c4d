//! YAML parsing of workflow definition files.
//!
//! A definition file is a mapping from workflow key to workflow body. Order
//! inside the file is preserved: states and transitions keep the order in
//! which they are written.
//!
//! ```yaml
//! content:
//!   label: Content
//!   group: node
//!   states:
//!     draft:
//!       label: Draft
//!     published:
//!       label: Published
//!       published: true
//!       default_revision: true
//!   transitions:
//!     publish:
//!       label: Publish
//!       from: [draft]
//!       to: published
//! ```
//!
//! `published` and `default_revision` default to `false`. A state without a
//! `label` uses its key. Unknown fields are rejected so that a misspelt
//! `publshed: true` cannot silently leave content unpublished. A repeated
//! workflow, state, or transition key is rejected too: YAML mappings keep
//! the last entry, which would quietly replace an earlier `published: true`.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use pubgate_core::{
    StateDefinition, StateId, TransitionDefinition, TransitionId, ValidationError,
    WorkflowDefinition, WorkflowId,
};

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkflow {
    label: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(deserialize_with = "unique_keys")]
    states: IndexMap<String, RawState>,
    #[serde(default, deserialize_with = "unique_keys")]
    transitions: IndexMap<String, RawTransition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawState {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    default_revision: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTransition {
    label: String,
    from: Vec<String>,
    to: String,
}

// ─── Duplicate-key detection ─────────────────────────────────────────

/// Deserialize a string-keyed mapping, failing on the first repeated key.
fn unique_keys<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(UniqueKeyVisitor(PhantomData))
}

struct UniqueKeyVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for UniqueKeyVisitor<V>
where
    V: Deserialize<'de>,
{
    type Value = IndexMap<String, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping with unique keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(de::Error::custom(format!("duplicate key `{}`", entry.key())));
                }
                Entry::Vacant(entry) => {
                    entry.insert(access.next_value()?);
                }
            }
        }
        Ok(map)
    }
}

/// Parse the contents of one definition file.
///
/// `origin` is only used for error context.
pub fn parse_workflows(content: &str, origin: &Path) -> ConfigResult<Vec<WorkflowDefinition>> {
    // An empty file deserializes to unit, not to an empty mapping.
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: IndexMap<String, RawWorkflow> = unique_keys(serde_yaml::Deserializer::from_str(content))
        .map_err(|e| ConfigError::YamlParse {
            path: origin.to_path_buf(),
            source: e,
        })?;

    raw.into_iter()
        .map(|(key, workflow)| {
            convert_workflow(key, workflow).map_err(|e| ConfigError::Invalid {
                path: origin.to_path_buf(),
                source: e,
            })
        })
        .collect()
}

/// Read and parse one definition file.
pub fn load_workflow_file(path: &Path) -> ConfigResult<Vec<WorkflowDefinition>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(e)
        }
    })?;
    let definitions = parse_workflows(&content, path)?;
    tracing::debug!(
        path = %path.display(),
        workflows = definitions.len(),
        "parsed workflow definition file"
    );
    Ok(definitions)
}

fn convert_workflow(key: String, raw: RawWorkflow) -> Result<WorkflowDefinition, ValidationError> {
    let mut builder = WorkflowDefinition::builder(WorkflowId::new(key)?, raw.label);
    if let Some(group) = raw.group {
        builder = builder.group(group);
    }
    for (key, state) in raw.states {
        let id = StateId::new(key)?;
        builder = builder.state(StateDefinition {
            label: state.label.unwrap_or_else(|| id.to_string()),
            id,
            is_published_state: state.published,
            is_default_revision_state: state.default_revision,
        });
    }
    for (key, transition) in raw.transitions {
        let from = transition
            .from
            .into_iter()
            .map(StateId::new)
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.transition(TransitionDefinition {
            id: TransitionId::new(key)?,
            label: transition.label,
            from,
            to: StateId::new(transition.to)?,
        });
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"
content:
  label: Content
  group: node
  states:
    draft:
      label: Draft
    published:
      label: Published
      published: true
      default_revision: true
  transitions:
    publish:
      label: Publish
      from: [draft]
      to: published
    unpublish:
      label: Unpublish
      from: [published]
      to: draft
"#;

    fn origin() -> &'static Path {
        Path::new("test.yml")
    }

    #[test]
    fn parses_content_workflow() {
        let defs = parse_workflows(CONTENT, origin()).unwrap();
        assert_eq!(defs.len(), 1);
        let wf = &defs[0];
        assert_eq!(wf.id().as_str(), "content");
        assert_eq!(wf.label(), "Content");
        assert_eq!(wf.group(), Some("node"));

        let published = wf.state("published").unwrap();
        assert!(published.is_published_state);
        assert!(published.is_default_revision_state);

        let draft = wf.state("draft").unwrap();
        assert!(!draft.is_published_state);
        assert!(!draft.is_default_revision_state);

        let publish = wf.transition("publish").unwrap();
        assert_eq!(publish.label, "Publish");
        assert_eq!(publish.to.as_str(), "published");
        assert!(publish.is_available_from("draft"));
    }

    #[test]
    fn state_label_defaults_to_key() {
        let yaml = "w:\n  label: W\n  states:\n    only: {}\n";
        let defs = parse_workflows(yaml, origin()).unwrap();
        assert_eq!(defs[0].state("only").unwrap().label, "only");
        assert_eq!(defs[0].transition_count(), 0);
    }

    #[test]
    fn empty_file_has_no_workflows() {
        assert!(parse_workflows("  \n", origin()).unwrap().is_empty());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let yaml = "w:\n  label: W\n  states:\n    live:\n      publshed: true\n";
        let err = parse_workflows(yaml, origin()).unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }));
        assert!(format!("{err}").contains("test.yml"));
    }

    #[test]
    fn missing_label_is_rejected() {
        let yaml = "w:\n  states:\n    draft: {}\n";
        assert!(matches!(
            parse_workflows(yaml, origin()),
            Err(ConfigError::YamlParse { .. })
        ));
    }

    #[test]
    fn whitespace_key_is_invalid() {
        let yaml = "w:\n  label: W\n  states:\n    \"in review\": {}\n";
        let err = parse_workflows(yaml, origin()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: ValidationError::WhitespaceInKey { kind: "state", .. },
                ..
            }
        ));
    }

    #[test]
    fn undeclared_state_is_invalid() {
        let yaml = r#"
w:
  label: W
  states:
    draft: {}
  transitions:
    publish:
      label: Publish
      from: [draft]
      to: published
"#;
        let err = parse_workflows(yaml, origin()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: ValidationError::UndeclaredState { .. },
                ..
            }
        ));
    }

    fn assert_duplicate_key(yaml: &str, key: &str) {
        let err = parse_workflows(yaml, origin()).unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }), "{err:?}");
        let msg = format!("{err}");
        assert!(msg.contains(&format!("duplicate key `{key}`")), "{msg}");
    }

    #[test]
    fn duplicate_state_key_is_rejected() {
        let yaml = r#"
w:
  label: W
  states:
    live:
      published: true
    draft: {}
    live: {}
"#;
        assert_duplicate_key(yaml, "live");
    }

    #[test]
    fn duplicate_transition_key_is_rejected() {
        let yaml = r#"
w:
  label: W
  states:
    draft: {}
    live:
      published: true
  transitions:
    publish:
      label: Publish
      from: [draft]
      to: live
    publish:
      label: Publish again
      from: [live]
      to: draft
"#;
        assert_duplicate_key(yaml, "publish");
    }

    #[test]
    fn duplicate_workflow_key_is_rejected() {
        let yaml = r#"
w:
  label: A
  states:
    draft: {}
w:
  label: B
  states:
    draft: {}
"#;
        assert_duplicate_key(yaml, "w");
    }

    #[test]
    fn same_key_in_different_mappings_is_fine() {
        let yaml = r#"
a:
  label: A
  states:
    draft: {}
b:
  label: B
  states:
    draft: {}
"#;
        assert_eq!(parse_workflows(yaml, origin()).unwrap().len(), 2);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_workflow_file(Path::new("/nonexistent/workflows.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.workflows.yml");
        std::fs::write(&path, CONTENT).unwrap();
        let defs = load_workflow_file(&path).unwrap();
        assert_eq!(defs[0].transition_count(), 2);
    }
}
