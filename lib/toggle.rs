//! Activation and deactivation of catalog servers against a config store.
//!
//! Each operation loads the registry, computes the next one, and saves it.
//! The registry returned to callers is only the new one if the save
//! committed. Concurrent toggles of the same name are last-write-wins;
//! callers serialize them.

use crate::catalog::{self, CatalogEntry};
use crate::definition::ServerDefinition;
use crate::error::{ToggleError, ToggleResult};
use crate::prompt::InputCollector;
use crate::registry::Registry;
use crate::resolve::{ResolveOptions, UserInputBag, resolve_with};
use crate::store::{ConfigStore, load_or_recover};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The server was added with this materialized definition.
    Activated {
        name: String,
        definition: ServerDefinition,
    },
    /// The server was removed.
    Deactivated { name: String },
    /// The server was not active; nothing changed.
    Unchanged { name: String },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Look up a catalog entry or fail with [`ToggleError::UnknownServer`].
pub fn catalog_entry(name: &str) -> ToggleResult<&'static CatalogEntry> {
    catalog::get(name).ok_or_else(|| ToggleError::UnknownServer(name.to_string()))
}

/// Resolve `entry` with `input` and store it in the registry.
///
/// Fails with [`ToggleError::MissingInput`] before anything is written.
pub fn activate(
    store: &impl ConfigStore,
    entry: &CatalogEntry,
    input: &UserInputBag,
    options: ResolveOptions,
) -> ToggleResult<ToggleOutcome> {
    let registry = load_or_recover(store)?;
    activate_in(store, &registry, entry, input, options).map(|(_, outcome)| outcome)
}

/// Remove `name` from the registry. Absent names leave the file untouched.
pub fn deactivate(store: &impl ConfigStore, name: &str) -> ToggleResult<ToggleOutcome> {
    let registry = load_or_recover(store)?;
    deactivate_in(store, &registry, name).map(|(_, outcome)| outcome)
}

/// Flip the state of a catalog server, collecting input when activating.
pub fn toggle(
    store: &impl ConfigStore,
    entry: &CatalogEntry,
    collector: &mut impl InputCollector,
    options: ResolveOptions,
) -> ToggleResult<ToggleOutcome> {
    let registry = load_or_recover(store)?;

    if registry.is_active(entry.name) {
        return deactivate_in(store, &registry, entry.name).map(|(_, outcome)| outcome);
    }

    let template = entry.definition();
    let input = collector.collect(entry.name, &template)?;
    activate_in(store, &registry, entry, &input, options).map(|(_, outcome)| outcome)
}

/// Activate against an already-loaded registry, returning the committed one.
pub fn activate_in(
    store: &impl ConfigStore,
    registry: &Registry,
    entry: &CatalogEntry,
    input: &UserInputBag,
    options: ResolveOptions,
) -> ToggleResult<(Registry, ToggleOutcome)> {
    let definition = resolve_with(&entry.definition(), input, options)?;
    let next = registry.activate(entry.name, definition.clone());

    commit(store, &next)?;
    tracing::debug!(server = entry.name, "activated");

    Ok((
        next,
        ToggleOutcome::Activated {
            name: entry.name.to_string(),
            definition,
        },
    ))
}

/// Deactivate against an already-loaded registry, returning the committed one.
pub fn deactivate_in(
    store: &impl ConfigStore,
    registry: &Registry,
    name: &str,
) -> ToggleResult<(Registry, ToggleOutcome)> {
    if !registry.is_active(name) {
        return Ok((
            registry.clone(),
            ToggleOutcome::Unchanged {
                name: name.to_string(),
            },
        ));
    }

    let next = registry.deactivate(name);
    commit(store, &next)?;
    tracing::debug!(server = name, "deactivated");

    Ok((
        next,
        ToggleOutcome::Deactivated {
            name: name.to_string(),
        },
    ))
}

fn commit(store: &impl ConfigStore, registry: &Registry) -> ToggleResult<()> {
    store.backup()?;
    store.save(registry)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputKind, MissingInput};
    use crate::placeholder::PathTarget;
    use crate::prompt::{PathPicker, PrefilledInput, PromptCollector};
    use crate::store::{JsonConfigStore, MemoryStore};
    use std::fs;
    use tempfile::TempDir;

    struct DismissedPicker;

    impl PathPicker for DismissedPicker {
        fn pick_path(&mut self, _label: &str, _target: PathTarget) -> ToggleResult<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_activate_git_with_path() {
        let store = MemoryStore::default();
        let input = UserInputBag::new().with_path("/home/u/proj");

        let outcome = activate(&store, catalog_entry("git").unwrap(), &input, ResolveOptions::default())
            .unwrap();

        let expected = ServerDefinition::new("uvx", ["mcp-server-git", "--repository", "/home/u/proj"]);
        assert_eq!(
            outcome,
            ToggleOutcome::Activated {
                name: "git".into(),
                definition: expected.clone(),
            }
        );
        assert_eq!(store.snapshot().unwrap().get("git"), Some(&expected));
    }

    #[test]
    fn test_missing_input_leaves_store_untouched() {
        let store = MemoryStore::default();
        let err = activate(
            &store,
            catalog_entry("slack").unwrap(),
            &UserInputBag::new().with_env("SLACK_TEAM_ID", "T1"),
            ResolveOptions::default(),
        )
        .unwrap_err();

        match err {
            ToggleError::MissingInput(MissingInput { kind, missing_keys }) => {
                assert_eq!(kind, InputKind::Env);
                assert_eq!(missing_keys, vec!["SLACK_BOT_TOKEN"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_failed_save_keeps_previous_registry() {
        let store = MemoryStore::with_registry(Registry::new());
        store.fail_writes(true);

        let err = activate(
            &store,
            catalog_entry("fetch").unwrap(),
            &UserInputBag::new(),
            ResolveOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ToggleError::PersistenceFailure { .. }));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let store = MemoryStore::default();
        activate(
            &store,
            catalog_entry("memory").unwrap(),
            &UserInputBag::new(),
            ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(
            deactivate(&store, "memory").unwrap(),
            ToggleOutcome::Deactivated {
                name: "memory".into()
            }
        );
        let after_first = store.snapshot();
        assert_eq!(
            deactivate(&store, "memory").unwrap(),
            ToggleOutcome::Unchanged {
                name: "memory".into()
            }
        );
        assert_eq!(store.snapshot(), after_first);
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_toggle_flips_state() {
        let store = MemoryStore::default();
        let entry = catalog_entry("gitlab").unwrap();
        let mut input = PrefilledInput(
            UserInputBag::new().with_env("GITLAB_PERSONAL_ACCESS_TOKEN", "glpat-123"),
        );

        let outcome = toggle(&store, entry, &mut input, ResolveOptions::default()).unwrap();
        let ToggleOutcome::Activated { definition, .. } = outcome else {
            panic!("expected activation");
        };
        let env = definition.env.unwrap();
        assert_eq!(
            env.get("GITLAB_API_URL").map(String::as_str),
            Some("https://gitlab.com/api/v4")
        );
        assert_eq!(
            env.get("GITLAB_PERSONAL_ACCESS_TOKEN").map(String::as_str),
            Some("glpat-123")
        );

        let outcome = toggle(&store, entry, &mut input, ResolveOptions::default()).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Deactivated {
                name: "gitlab".into()
            }
        );
        assert!(!store.snapshot().unwrap().is_active("gitlab"));
    }

    #[test]
    fn test_dismissed_path_picker_fails_without_writing() {
        let store = MemoryStore::default();
        let mut collector =
            PromptCollector::new(UserInputBag::new(), DismissedPicker, ResolveOptions::default());

        let err = toggle(
            &store,
            catalog_entry("git").unwrap(),
            &mut collector,
            ResolveOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ToggleError::MissingInput(MissingInput { kind: InputKind::Path, .. })
        ));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_activate_overwrites_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude_desktop_config.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonConfigStore::new(&path).with_backups(dir.path().join("backups"));

        activate(
            &store,
            catalog_entry("fetch").unwrap(),
            &UserInputBag::new(),
            ResolveOptions::default(),
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "mcpServers": {
                    "fetch": { "command": "uvx", "args": ["mcp-server-fetch"] }
                }
            })
        );

        let backed_up: Vec<_> = fs::read_dir(dir.path().join("backups"))
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| fs::read_to_string(e.path()).unwrap())
            .collect();
        assert!(backed_up.iter().any(|content| content == "{ not json"));
    }

    #[test]
    fn test_unknown_server() {
        assert!(matches!(
            catalog_entry("nope"),
            Err(ToggleError::UnknownServer(name)) if name == "nope"
        ));
    }
}
