//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::styles::styles;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const LIST_EXAMPLES: &str = "\
Examples:
  mcp-toggle list                   List catalog servers and their state
  mcp-toggle list -c                Concise output for scripts
  mcp-toggle list --json            JSON output for parsing";

const SHOW_EXAMPLES: &str = "\
Examples:
  mcp-toggle show gitlab            Show inputs gitlab needs
  mcp-toggle show git -c            Concise output";

const ENABLE_EXAMPLES: &str = "\
Examples:
  mcp-toggle enable fetch                          Enable a server without inputs
  mcp-toggle enable git --path ~/code/repo         Supply the repository path
  mcp-toggle enable postgres --text postgresql://localhost/db
  mcp-toggle enable github -e GITHUB_PERSONAL_ACCESS_TOKEN=ghp_xxx -y
  mcp-toggle enable filesystem                     Prompt for anything missing
  mcp-toggle enable sqlite --path /data --splice   Keep text around placeholders";

const DISABLE_EXAMPLES: &str = "\
Examples:
  mcp-toggle disable git            Remove git from the config";

const TOGGLE_EXAMPLES: &str = "\
Examples:
  mcp-toggle toggle memory          Enable memory, or disable it if enabled
  mcp-toggle toggle slack -e SLACK_BOT_TOKEN=xoxb-1 -e SLACK_TEAM_ID=T1 -y";

const PATH_EXAMPLES: &str = "\
Examples:
  mcp-toggle path                   Print the config file location
  MCP_TOGGLE_CONFIG=./c.json mcp-toggle path";

const CLI_EXAMPLES: &str = "\
Examples:
  mcp-toggle list                   See what is available
  mcp-toggle enable git             Enable a server (prompts for inputs)
  mcp-toggle toggle fetch           Flip a server on or off
  mcp-toggle --config ./c.json list Use another config file";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// mcp-toggle - Enable and disable MCP servers.
#[derive(Debug, Parser)]
#[command(name = "mcp-toggle", author, version, styles = styles())]
#[command(
    about = "Enable and disable MCP servers in the Claude Desktop config",
    after_help = CLI_EXAMPLES
)]
pub struct Cli {
    /// Config file to edit (defaults to $MCP_TOGGLE_CONFIG or the Claude Desktop config).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Concise output (minimal formatting, machine-parseable).
    #[arg(short, long, global = true)]
    pub concise: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog servers and whether they are enabled.
    #[command(after_help = LIST_EXAMPLES)]
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show what a server needs and how it is configured.
    #[command(after_help = SHOW_EXAMPLES)]
    Show {
        /// Catalog server name.
        name: String,
    },

    /// Enable a server, replacing any existing entry.
    #[command(after_help = ENABLE_EXAMPLES)]
    Enable {
        /// Catalog server name.
        name: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Disable a server. Disabling a server that is not enabled does nothing.
    #[command(after_help = DISABLE_EXAMPLES)]
    Disable {
        /// Catalog server name.
        name: String,
    },

    /// Enable a server if disabled, disable it if enabled.
    #[command(after_help = TOGGLE_EXAMPLES)]
    Toggle {
        /// Catalog server name.
        name: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the config file location.
    #[command(after_help = PATH_EXAMPLES)]
    Path,
}

/// Input for servers with placeholders.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Path for `${path:..}` and `${dir:..}` arguments.
    #[arg(long)]
    pub path: Option<String>,

    /// Text for `${text:..}` arguments.
    #[arg(long)]
    pub text: Option<String>,

    /// Environment variables as KEY=VALUE (repeatable).
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Replace only the placeholder inside an argument instead of the whole argument.
    #[arg(long)]
    pub splice: bool,

    /// Skip interactive prompts, use provided values only.
    #[arg(short, long)]
    pub yes: bool,
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enable() {
        let cli = Cli::try_parse_from([
            "mcp-toggle",
            "enable",
            "github",
            "-e",
            "GITHUB_PERSONAL_ACCESS_TOKEN=ghp",
            "-y",
            "--config",
            "/tmp/c.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        match cli.command {
            Command::Enable { name, input } => {
                assert_eq!(name, "github");
                assert_eq!(input.env, vec!["GITHUB_PERSONAL_ACCESS_TOKEN=ghp"]);
                assert!(input.yes);
                assert!(!input.splice);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_concise() {
        let cli = Cli::try_parse_from(["mcp-toggle", "-c", "list", "--json"]).unwrap();
        assert!(cli.concise);
        assert!(matches!(cli.command, Command::List { json: true }));
    }
}
