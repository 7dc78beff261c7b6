//! Server definitions as stored under `mcpServers`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::placeholder::has_any_placeholder;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Environment variables of a server definition, in declaration order.
pub type EnvMap = IndexMap<String, String>;

/// How to launch an MCP server: command, arguments and environment.
///
/// Templates from the catalog may carry placeholders; definitions in the
/// registry are fully materialized. Both use the same shape on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDefinition {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvMap>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ServerDefinition {
    /// Create a definition without env.
    pub fn new<C, I, A>(command: C, args: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: None,
        }
    }

    /// Return a copy with the given env entries.
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(env.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Iterate env entries; empty when the definition has no env.
    pub fn env_iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.env.iter().flat_map(|env| env.iter())
    }

    /// Check whether any argument or env value still carries a placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.args.iter().any(|a| has_any_placeholder(a))
            || self.env_iter().any(|(_, v)| has_any_placeholder(v))
    }

    /// Command line as shown to the user.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_without_env() {
        let def = ServerDefinition::new("uvx", ["mcp-server-fetch"]);
        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(json, r#"{"command":"uvx","args":["mcp-server-fetch"]}"#);
    }

    #[test]
    fn test_env_keeps_declaration_order() {
        let def = ServerDefinition::new("npx", ["-y"]).with_env([("Z", "1"), ("A", "2")]);
        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(
            json,
            r#"{"command":"npx","args":["-y"],"env":{"Z":"1","A":"2"}}"#
        );
    }

    #[test]
    fn test_missing_args_defaults_to_empty() {
        let def: ServerDefinition = serde_json::from_str(r#"{"command":"server"}"#).unwrap();
        assert!(def.args.is_empty());
        assert!(def.env.is_none());
    }

    #[test]
    fn test_has_placeholders() {
        let def = ServerDefinition::new("uvx", ["--repository", "${path:repo}"]);
        assert!(def.has_placeholders());

        let def = ServerDefinition::new("npx", ["-y"]).with_env([("URL", "${default:x}")]);
        assert!(def.has_placeholders());

        let def = ServerDefinition::new("npx", ["-y"]).with_env([("TOKEN", "<YOUR_TOKEN>")]);
        assert!(!def.has_placeholders());
    }

    #[test]
    fn test_command_line() {
        let def = ServerDefinition::new("uvx", ["mcp-server-git", "--repository", "/p"]);
        assert_eq!(def.command_line(), "uvx mcp-server-git --repository /p");
        assert_eq!(
            ServerDefinition::new("server", Vec::<String>::new()).command_line(),
            "server"
        );
    }
}
