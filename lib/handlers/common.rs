//! Helpers shared by command handlers.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::commands::InputArgs;
use crate::constants::DEFAULT_BACKUPS_PATH;
use crate::error::{ToggleError, ToggleResult};
use crate::resolve::{ResolveOptions, Substitution, UserInputBag};
use crate::store::JsonConfigStore;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Open the config store at `config`, or at the default location.
pub fn open_store(config: Option<PathBuf>) -> ToggleResult<JsonConfigStore> {
    match config {
        Some(path) => Ok(JsonConfigStore::new(path).with_backups(DEFAULT_BACKUPS_PATH.clone())),
        None => JsonConfigStore::open_default(),
    }
}

/// Parse env values from KEY=VALUE strings.
pub fn parse_env_values(values: &[String]) -> ToggleResult<IndexMap<String, String>> {
    let mut env = IndexMap::new();

    for value in values {
        match value.split_once('=') {
            Some((key, val)) if !key.is_empty() => {
                env.insert(key.to_string(), val.to_string());
            }
            _ => {
                return Err(ToggleError::Generic(format!(
                    "Invalid env format '{}'. Expected KEY=VALUE",
                    value
                )));
            }
        }
    }

    Ok(env)
}

/// Build the input bag from command-line flags.
pub fn input_bag(args: &InputArgs) -> ToggleResult<UserInputBag> {
    Ok(UserInputBag {
        path: args.path.clone(),
        text: args.text.clone(),
        env: parse_env_values(&args.env)?,
    })
}

pub fn resolve_options(args: &InputArgs) -> ResolveOptions {
    ResolveOptions {
        substitution: if args.splice {
            Substitution::Splice
        } else {
            Substitution::WholeArgument
        },
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
