//! Registry of activated server definitions.
//!
//! Mirrors the Claude Desktop config file: activated definitions live under
//! `mcpServers`, and every other top-level key is carried through untouched.
//! Transitions are pure and return a new registry; persisting it is up to a
//! [`ConfigStore`](crate::store::ConfigStore).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::definition::ServerDefinition;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Top-level key holding the server entries.
pub const SERVERS_KEY: &str = "mcpServers";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Activated server definitions by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "mcpServers", default)]
    servers: IndexMap<String, ServerDefinition>,

    /// Other keys of the config file, preserved as-is.
    #[serde(flatten)]
    other: Map<String, Value>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a server is activated.
    pub fn is_active(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Get an activated definition.
    pub fn get(&self, name: &str) -> Option<&ServerDefinition> {
        self.servers.get(name)
    }

    /// Activated definitions in file order.
    pub fn servers(&self) -> impl Iterator<Item = (&String, &ServerDefinition)> {
        self.servers.iter()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Return a registry with `def` stored under `name`.
    ///
    /// An existing entry with the same name is replaced in place.
    pub fn activate(&self, name: &str, def: ServerDefinition) -> Self {
        let mut next = self.clone();
        next.servers.insert(name.to_string(), def);
        next
    }

    /// Return a registry without `name`. Removing an absent name is a no-op.
    pub fn deactivate(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.servers.shift_remove(name);
        next
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetch() -> ServerDefinition {
        ServerDefinition::new("uvx", ["mcp-server-fetch"])
    }

    #[test]
    fn test_activate_and_deactivate() {
        let registry = Registry::new().activate("fetch", fetch());
        assert!(registry.is_active("fetch"));
        assert_eq!(registry.get("fetch"), Some(&fetch()));

        let registry = registry.deactivate("fetch");
        assert!(!registry.is_active("fetch"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deactivate_twice_is_noop() {
        let registry = Registry::new()
            .activate("fetch", fetch())
            .activate("memory", ServerDefinition::new("npx", ["-y", "server-memory"]));

        let once = registry.deactivate("fetch");
        let twice = once.deactivate("fetch");
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_deactivate_keeps_original() {
        let registry = Registry::new().activate("fetch", fetch());
        let _ = registry.deactivate("fetch");
        assert!(registry.is_active("fetch"));
    }

    #[test]
    fn test_activate_replaces_existing() {
        let registry = Registry::new()
            .activate("git", ServerDefinition::new("uvx", ["a"]))
            .activate("git", ServerDefinition::new("uvx", ["b"]));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("git").unwrap().args, vec!["b"]);
    }

    #[test]
    fn test_round_trip_preserves_other_keys() {
        let value = json!({
            "globalShortcut": "Ctrl+Space",
            "mcpServers": {
                "fetch": { "command": "uvx", "args": ["mcp-server-fetch"] }
            }
        });
        let registry: Registry = serde_json::from_value(value.clone()).unwrap();
        assert!(registry.is_active("fetch"));
        assert_eq!(serde_json::to_value(&registry).unwrap(), value);
    }

    #[test]
    fn test_missing_servers_key_is_empty() {
        let registry: Registry = serde_json::from_str("{}").unwrap();
        assert!(registry.is_empty());
        assert_eq!(
            serde_json::to_value(&registry).unwrap(),
            json!({ SERVERS_KEY: {} })
        );
    }
}
