//! `mcp-toggle` library.

pub mod catalog;
pub mod commands;
pub mod constants;
pub mod definition;
pub mod error;
pub mod handlers;
pub mod output;
pub mod placeholder;
pub mod prompt;
pub mod registry;
pub mod requirements;
pub mod resolve;
pub mod store;
pub mod styles;
pub mod toggle;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use catalog::{CATALOG, CatalogEntry};
pub use commands::*;
pub use constants::*;
pub use definition::*;
pub use error::*;
pub use placeholder::*;
pub use prompt::*;
pub use registry::*;
pub use requirements::*;
pub use resolve::*;
pub use store::*;
pub use toggle::*;
