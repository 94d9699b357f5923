//! CLI command handlers for Christmas Card.
//!
//! Headless, scriptable access to the card export and the catalogs, for
//! automation and testing.

pub mod catalog;
pub mod common;
pub mod config;
pub mod render;

// Re-export types used by main.rs and tests
pub use catalog::{ColorsArgs, TemplatesArgs};
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use render::RenderArgs;
