//! Application orchestration layer
//!
//! High-level functions that wire configuration, logging and the TUI
//! together without containing detailed implementation logic.

/// Editor startup and shutdown
pub mod launch;

pub use launch::launch_editor;
