//! Command handlers.

mod common;
mod list;
mod show;
mod switch;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use common::{input_bag, open_store, parse_env_values, resolve_options};
pub use list::list_servers;
pub use show::{config_path, show_server};
pub use switch::{disable_server, enable_server, toggle_server};
