//! `list` command.

use colored::Colorize;

use crate::catalog::CATALOG;
use crate::error::ToggleResult;
use crate::output::list_output;
use crate::requirements::requirements_of;
use crate::store::{ConfigStore, load_or_recover};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List catalog servers with their state and what they need.
pub fn list_servers(store: &impl ConfigStore, json: bool, concise: bool) -> ToggleResult<()> {
    let registry = load_or_recover(store)?;

    if json {
        let output = list_output(CATALOG, &registry);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if concise {
        println!("#name\tstate\tneeds");
        for entry in CATALOG {
            let requirement = requirements_of(&entry.definition());
            let mut needs = Vec::new();
            if requirement.has_path_variable {
                needs.push("path".to_string());
            }
            if requirement.has_text_variable {
                needs.push("text".to_string());
            }
            needs.extend(requirement.env_input_fields.iter().map(|f| format!("env:{}", f.key)));
            let state = if registry.is_active(entry.name) {
                "enabled"
            } else {
                "disabled"
            };
            let needs = if needs.is_empty() {
                "-".to_string()
            } else {
                needs.join(",")
            };
            println!("{}\t{}\t{}", entry.name, state, needs);
        }
        return Ok(());
    }

    let width = CATALOG.iter().map(|e| e.name.len()).max().unwrap_or(0);
    println!();
    for entry in CATALOG {
        let requirement = requirements_of(&entry.definition());
        let name = format!("{:width$}", entry.name, width = width);

        match registry.get(entry.name) {
            Some(def) => println!(
                "  {} {}  {}",
                "●".bright_green(),
                name.bold(),
                def.command_line().dimmed()
            ),
            None => println!(
                "  {} {}  {}",
                "○".dimmed(),
                name,
                requirement.summary().dimmed()
            ),
        }

        for (key, value) in &requirement.env_defaults {
            println!("  {:width$}    {}: {}", "", key.dimmed(), value.dimmed(), width = width);
        }
    }

    let active = CATALOG.iter().filter(|e| registry.is_active(e.name)).count();
    println!(
        "\n  {} enabled of {} available\n",
        active.to_string().bold(),
        CATALOG.len()
    );
    Ok(())
}
