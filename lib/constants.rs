//! Constants for mcp-toggle.
//!
//! Path and configuration constants.

use std::path::PathBuf;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MCP_TOGGLE_CONFIG";

/// File name of the Claude Desktop config.
pub const CONFIG_FILE_NAME: &str = "claude_desktop_config.json";

/// Number of config backups kept.
pub const MAX_BACKUPS: usize = 5;

/// Default home directory for mcp-toggle state.
pub static DEFAULT_HOME_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    dirs::home_dir()
        .map(|h| h.join(".mcp-toggle"))
        .unwrap_or_else(|| PathBuf::from(".mcp-toggle"))
});

/// Default path for config backups.
pub static DEFAULT_BACKUPS_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| DEFAULT_HOME_PATH.join("backups"));
