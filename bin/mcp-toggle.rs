//! `mcp-toggle` is the primary CLI binary.

use clap::Parser;
use colored::Colorize;
use mcp_toggle::handlers;
use mcp_toggle::{Cli, Command, InputKind, MissingInput, ToggleError, ToggleResult};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run() -> ToggleResult<()> {
    let cli = Cli::parse();
    let store = handlers::open_store(cli.config)?;

    match cli.command {
        Command::List { json } => handlers::list_servers(&store, json, cli.concise),
        Command::Show { name } => handlers::show_server(&store, &name, cli.concise),
        Command::Enable { name, input } => {
            handlers::enable_server(&store, &name, &input, cli.concise)
        }
        Command::Disable { name } => handlers::disable_server(&store, &name, cli.concise),
        Command::Toggle { name, input } => {
            handlers::toggle_server(&store, &name, &input, cli.concise)
        }
        Command::Path => handlers::config_path(store.path()),
    }
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &ToggleError) {
    println!();
    match e {
        ToggleError::MissingInput(MissingInput { kind, missing_keys }) => {
            println!("  {} Missing {} input", "error".bright_red().bold(), kind);
            println!();
            match kind {
                InputKind::Path => println!(
                    "    {}: Pass {} or run without {}",
                    "hint".bright_blue().bold(),
                    "--path <DIR>".bright_white(),
                    "--yes".bright_white()
                ),
                InputKind::Text => println!(
                    "    {}: Pass {} or run without {}",
                    "hint".bright_blue().bold(),
                    "--text <TEXT>".bright_white(),
                    "--yes".bright_white()
                ),
                InputKind::Env => {
                    for key in missing_keys {
                        println!("    {} {}", "·".dimmed(), key);
                    }
                    println!();
                    println!(
                        "    {}: Pass {} for each key",
                        "hint".bright_blue().bold(),
                        "-e KEY=VALUE".bright_white()
                    );
                }
            }
        }
        ToggleError::UnknownServer(name) => {
            println!(
                "  {} Unknown server: {}",
                "error".bright_red().bold(),
                name.bright_white()
            );
            println!();
            println!(
                "    {}: Run {} to see available servers",
                "hint".bright_blue().bold(),
                "mcp-toggle list".bright_white()
            );
        }
        ToggleError::PersistenceFailure { path, message } => {
            println!("  {} Config not saved", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "Path".dimmed(), path.display());
            println!("    {}", message);
        }
        ToggleError::MalformedStoredConfig { path, message } => {
            println!("  {} Config is not valid", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "Path".dimmed(), path.display());
            println!("    {}", message);
        }
        ToggleError::Cancelled => {
            println!("  {} Operation cancelled", "✗".bright_red());
        }
        _ => {
            println!("  {} {}", "error".bright_red().bold(), e);
        }
    }
    println!();
}
