//! `enable`, `disable` and `toggle` commands.

use colored::Colorize;

use crate::commands::InputArgs;
use crate::error::ToggleResult;
use crate::prompt::{InputCollector, PrefilledInput, PromptCollector, PromptPathPicker};
use crate::store::{ConfigStore, load_or_recover};
use crate::toggle::{ToggleOutcome, activate_in, catalog_entry, deactivate_in, toggle};

use super::common::{input_bag, resolve_options};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Enable a server, prompting for missing input unless `--yes` is given.
pub fn enable_server(
    store: &impl ConfigStore,
    name: &str,
    args: &InputArgs,
    concise: bool,
) -> ToggleResult<()> {
    let entry = catalog_entry(name)?;
    let options = resolve_options(args);
    let registry = load_or_recover(store)?;

    let mut collector = collector_for(args)?;
    let input = collector.collect(entry.name, &entry.definition())?;

    let replaced = registry.is_active(entry.name);
    let (_, outcome) = activate_in(store, &registry, entry, &input, options)?;
    print_outcome(&outcome, replaced, concise);
    Ok(())
}

/// Disable a server.
pub fn disable_server(store: &impl ConfigStore, name: &str, concise: bool) -> ToggleResult<()> {
    let registry = load_or_recover(store)?;
    let (_, outcome) = deactivate_in(store, &registry, name)?;
    print_outcome(&outcome, false, concise);
    Ok(())
}

/// Flip a server between enabled and disabled.
pub fn toggle_server(
    store: &impl ConfigStore,
    name: &str,
    args: &InputArgs,
    concise: bool,
) -> ToggleResult<()> {
    let entry = catalog_entry(name)?;
    let mut collector = collector_for(args)?;
    let outcome = toggle(store, entry, &mut collector, resolve_options(args))?;
    print_outcome(&outcome, false, concise);
    Ok(())
}

/// Either a fixed bag (`--yes`) or terminal prompts for what is missing.
fn collector_for(args: &InputArgs) -> ToggleResult<Box<dyn InputCollector>> {
    let bag = input_bag(args)?;
    if args.yes {
        Ok(Box::new(PrefilledInput(bag)))
    } else {
        Ok(Box::new(PromptCollector::new(
            bag,
            PromptPathPicker,
            resolve_options(args),
        )))
    }
}

fn print_outcome(outcome: &ToggleOutcome, replaced: bool, concise: bool) {
    if concise {
        match outcome {
            ToggleOutcome::Activated { name, .. } => println!("enabled\t{}", name),
            ToggleOutcome::Deactivated { name } => println!("disabled\t{}", name),
            ToggleOutcome::Unchanged { name } => println!("unchanged\t{}", name),
        }
        return;
    }

    match outcome {
        ToggleOutcome::Activated { name, definition } => {
            let verb = if replaced { "Updated" } else { "Enabled" };
            println!("\n  {} {} {}", "✓".bright_green(), verb, name.bold());
            println!("    {}\n", definition.command_line().dimmed());
        }
        ToggleOutcome::Deactivated { name } => {
            println!("\n  {} Disabled {}\n", "✓".bright_green(), name.bold());
        }
        ToggleOutcome::Unchanged { name } => {
            println!("\n  {} {} is not enabled\n", "~".bright_yellow(), name.bold());
        }
    }
}
