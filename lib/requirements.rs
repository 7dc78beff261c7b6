//! Input requirements of a server definition.
//!
//! Answers which inputs a template needs before it can be activated: a path,
//! free text, and which env keys have to be filled in. Everything here is
//! pure and total.

use indexmap::IndexMap;

use crate::definition::ServerDefinition;
use crate::placeholder::{
    default_label, has_path_placeholder, has_text_placeholder, path_label, text_label,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Key fragments that mark an env variable as secret.
pub const SECRET_KEY_MARKERS: &[&str] = &["_TOKEN", "_KEY"];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An env variable the user has to supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvInputField {
    pub key: String,
    /// Whether the value should be masked when prompted or displayed.
    pub is_secret: bool,
}

/// What a definition needs before it can be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequirement {
    pub has_path_variable: bool,
    pub has_text_variable: bool,
    /// First path/dir label of each matching argument, in argument order.
    pub path_labels: Vec<String>,
    /// First text label of each matching argument, in argument order.
    pub text_labels: Vec<String>,
    /// Env keys carrying a `${default:..}`, mapped to the default value.
    pub env_defaults: IndexMap<String, String>,
    /// Env keys without a default.
    pub env_input_fields: Vec<EnvInputField>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ResolutionRequirement {
    /// Check whether any input is needed at all.
    pub fn needs_input(&self) -> bool {
        self.has_path_variable || self.has_text_variable || self.needs_env_input()
    }

    /// Check whether any env value has to be supplied.
    pub fn needs_env_input(&self) -> bool {
        !self.env_input_fields.is_empty()
    }

    /// Short description of the first input the definition needs.
    pub fn summary(&self) -> &'static str {
        if self.has_path_variable {
            "needs a path"
        } else if self.has_text_variable {
            "needs text input"
        } else if self.needs_env_input() {
            "needs environment variables"
        } else {
            "no configuration needed"
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Default secret heuristic: the key contains `_TOKEN` or `_KEY`.
pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Check if any argument carries a path or dir placeholder.
pub fn has_path_variable(def: &ServerDefinition) -> bool {
    def.args.iter().any(|a| has_path_placeholder(a))
}

/// Check if any argument carries a text placeholder.
pub fn has_text_variable(def: &ServerDefinition) -> bool {
    def.args.iter().any(|a| has_text_placeholder(a))
}

/// Env keys whose value is a `${default:..}` placeholder, mapped to the default.
pub fn env_defaults(def: &ServerDefinition) -> IndexMap<String, String> {
    def.env_iter()
        .filter_map(|(key, value)| default_label(value).map(|d| (key.clone(), d.to_string())))
        .collect()
}

/// Env keys that need user input, with the default secret heuristic.
pub fn env_input_fields(def: &ServerDefinition) -> Vec<EnvInputField> {
    env_input_fields_with(def, is_secret_key)
}

/// Env keys that need user input, classifying secrets with `is_secret`.
pub fn env_input_fields_with<F>(def: &ServerDefinition, is_secret: F) -> Vec<EnvInputField>
where
    F: Fn(&str) -> bool,
{
    def.env_iter()
        .filter(|(_, value)| default_label(value).is_none())
        .map(|(key, _)| EnvInputField {
            key: key.clone(),
            is_secret: is_secret(key),
        })
        .collect()
}

/// Compute the requirements of a definition with the default secret heuristic.
pub fn requirements_of(def: &ServerDefinition) -> ResolutionRequirement {
    requirements_of_with(def, is_secret_key)
}

/// Compute the requirements of a definition, classifying secrets with `is_secret`.
pub fn requirements_of_with<F>(def: &ServerDefinition, is_secret: F) -> ResolutionRequirement
where
    F: Fn(&str) -> bool,
{
    let path_labels: Vec<String> = def
        .args
        .iter()
        .filter_map(|a| path_label(a))
        .map(str::to_string)
        .collect();
    let text_labels: Vec<String> = def
        .args
        .iter()
        .filter_map(|a| text_label(a))
        .map(str::to_string)
        .collect();

    ResolutionRequirement {
        has_path_variable: !path_labels.is_empty(),
        has_text_variable: !text_labels.is_empty(),
        path_labels,
        text_labels,
        env_defaults: env_defaults(def),
        env_input_fields: env_input_fields_with(def, is_secret),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
