//! Input handler modules for different TUI contexts.

pub mod main;

// Re-export handler functions
pub use main::{handle_help_input, handle_main_input};
