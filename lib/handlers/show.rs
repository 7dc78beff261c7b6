//! `show` and `path` commands.

use std::path::Path;

use colored::Colorize;

use crate::error::ToggleResult;
use crate::output::display_env_value;
use crate::requirements::requirements_of;
use crate::store::{ConfigStore, load_or_recover};
use crate::toggle::catalog_entry;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Show a server's template, its inputs and its current entry.
pub fn show_server(store: &impl ConfigStore, name: &str, concise: bool) -> ToggleResult<()> {
    let entry = catalog_entry(name)?;
    let template = entry.definition();
    let requirement = requirements_of(&template);
    let registry = load_or_recover(store)?;
    let active = registry.get(entry.name);

    if concise {
        println!("#field\tvalue");
        println!("name\t{}", entry.name);
        println!("enabled\t{}", active.is_some());
        println!("template\t{}", template.command_line());
        for label in &requirement.path_labels {
            println!("path\t{}", label);
        }
        for label in &requirement.text_labels {
            println!("text\t{}", label);
        }
        for field in &requirement.env_input_fields {
            let kind = if field.is_secret { "secret" } else { "env" };
            println!("{}\t{}", kind, field.key);
        }
        for (key, value) in &requirement.env_defaults {
            println!("default\t{}={}", key, value);
        }
        if let Some(def) = active {
            println!("command\t{}", def.command_line());
        }
        return Ok(());
    }

    println!();
    let state = if active.is_some() {
        "enabled".bright_green()
    } else {
        "disabled".dimmed()
    };
    println!("  {} {}", entry.name.bold(), state);
    println!();
    println!("    {}: {}", "Template".dimmed(), template.command_line());

    if requirement.needs_input() || !requirement.env_defaults.is_empty() {
        println!();
        println!("    {}", "Inputs".bold());
        for label in &requirement.path_labels {
            println!("      {} {}", "path".cyan(), label.dimmed());
        }
        for label in &requirement.text_labels {
            println!("      {} {}", "text".cyan(), label.dimmed());
        }
        for field in &requirement.env_input_fields {
            let marker = if field.is_secret { " (secret)" } else { "" };
            println!("      {} {}{}", "env".cyan(), field.key, marker.dimmed());
        }
        for (key, value) in &requirement.env_defaults {
            println!(
                "      {} {} = {}",
                "default".cyan(),
                key,
                value.dimmed()
            );
        }
    }

    if let Some(def) = active {
        println!();
        println!("    {}", "Configured".bold());
        println!("      {}", def.command_line());
        for (key, value) in def.env_iter() {
            println!("      {}={}", key, display_env_value(key, value).dimmed());
        }
    }
    println!();

    Ok(())
}

/// Print the config file location.
pub fn config_path(path: &Path) -> ToggleResult<()> {
    println!("{}", path.display());
    Ok(())
}
