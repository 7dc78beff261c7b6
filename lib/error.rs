//! Error types for mcp-toggle.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for mcp-toggle operations.
pub type ToggleResult<T> = Result<T, ToggleError>;

/// Error type for mcp-toggle operations.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// A server definition could not be resolved because user input is missing.
    #[error(transparent)]
    MissingInput(#[from] MissingInput),

    /// The config store could not commit a write.
    #[error("Failed to persist config at {}: {message}", .path.display())]
    PersistenceFailure { path: PathBuf, message: String },

    /// The stored config file exists but is not a valid registry.
    #[error("Malformed config at {}: {message}", .path.display())]
    MalformedStoredConfig { path: PathBuf, message: String },

    /// Name is not in the server catalog.
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User cancelled operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

/// Which category of user input a resolution is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Path,
    Text,
    Env,
}

/// Resolution failed because the input bag lacks a required value.
///
/// `missing_keys` is only populated for [`InputKind::Env`] and lists the env
/// keys in the order the definition declares them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing {kind} input{}", format_missing_keys(.missing_keys))]
pub struct MissingInput {
    pub kind: InputKind,
    pub missing_keys: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl MissingInput {
    /// Missing directory or file path.
    pub fn path() -> Self {
        Self {
            kind: InputKind::Path,
            missing_keys: Vec::new(),
        }
    }

    /// Missing free text.
    pub fn text() -> Self {
        Self {
            kind: InputKind::Text,
            missing_keys: Vec::new(),
        }
    }

    /// Missing values for the given env keys.
    pub fn env(missing_keys: Vec<String>) -> Self {
        Self {
            kind: InputKind::Env,
            missing_keys,
        }
    }
}

impl InputKind {
    /// Lowercase name used in messages and concise output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Text => "text",
            Self::Env => "env",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<anyhow::Error> for ToggleError {
    fn from(err: anyhow::Error) -> Self {
        ToggleError::Generic(format!("{:#}", err))
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn format_missing_keys(keys: &[String]) -> String {
    if keys.is_empty() {
        String::new()
    } else {
        format!(": {}", keys.join(", "))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_messages() {
        assert_eq!(MissingInput::path().to_string(), "Missing path input");
        assert_eq!(MissingInput::text().to_string(), "Missing text input");
        assert_eq!(
            MissingInput::env(vec!["A".into(), "B".into()]).to_string(),
            "Missing env input: A, B"
        );
    }

    #[test]
    fn test_missing_input_converts_to_toggle_error() {
        let err: ToggleError = MissingInput::text().into();
        assert!(matches!(
            err,
            ToggleError::MissingInput(MissingInput {
                kind: InputKind::Text,
                ..
            })
        ));
        assert_eq!(err.to_string(), "Missing text input");
    }

    #[test]
    fn test_anyhow_context_is_kept() {
        let err: ToggleError = anyhow::anyhow!("permission denied")
            .context("Failed to back up config.json")
            .into();
        assert_eq!(
            err.to_string(),
            "Failed to back up config.json: permission denied"
        );
    }
}
