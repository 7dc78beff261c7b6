//! Output types for CLI commands.
//!
//! JSON output is object-keyed by server name, in catalog order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::definition::ServerDefinition;
use crate::registry::Registry;
use crate::requirements::{ResolutionRequirement, is_secret_key, requirements_of};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Entry for `mcp-toggle list --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ServerStatusOutput {
    pub enabled: bool,
    pub needs: NeedsOutput,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub env_defaults: IndexMap<String, String>,
    /// Command line of the enabled entry, secrets excluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Inputs a server needs before it can be enabled.
#[derive(Debug, Clone, Serialize)]
pub struct NeedsOutput {
    pub path: bool,
    pub text: bool,
    pub env: Vec<EnvFieldOutput>,
}

/// An env key the user has to fill in.
#[derive(Debug, Clone, Serialize)]
pub struct EnvFieldOutput {
    pub key: String,
    pub secret: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ServerStatusOutput {
    pub fn new(entry: &CatalogEntry, registry: &Registry) -> Self {
        let requirement = requirements_of(&entry.definition());
        Self {
            enabled: registry.is_active(entry.name),
            needs: NeedsOutput::from(&requirement),
            env_defaults: requirement.env_defaults,
            command: registry.get(entry.name).map(ServerDefinition::command_line),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<&ResolutionRequirement> for NeedsOutput {
    fn from(requirement: &ResolutionRequirement) -> Self {
        Self {
            path: requirement.has_path_variable,
            text: requirement.has_text_variable,
            env: requirement
                .env_input_fields
                .iter()
                .map(|f| EnvFieldOutput {
                    key: f.key.clone(),
                    secret: f.is_secret,
                })
                .collect(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build `list --json` output for every catalog entry.
pub fn list_output(catalog: &[CatalogEntry], registry: &Registry) -> IndexMap<String, ServerStatusOutput> {
    catalog
        .iter()
        .map(|entry| (entry.name.to_string(), ServerStatusOutput::new(entry, registry)))
        .collect()
}

/// Display form of an env value, masking secrets.
pub fn display_env_value(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        mask(value)
    } else {
        value.to_string()
    }
}

/// Keep the first four characters of long values, mask the rest.
fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 8 {
        "*".repeat(count)
    } else {
        let head: String = value.chars().take(4).collect();
        format!("{}{}", head, "*".repeat(count - 4))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
