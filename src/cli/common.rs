//! Shared CLI error type and exit codes.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;

/// Process exit codes for headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Invalid input (empty or too long message, unknown names, ...)
    Validation = 1,
    /// Reading assets or writing the card failed
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Human-readable message
    pub message: String,
    /// Exit code to terminate with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Validation,
        }
    }

    /// Failure reading or writing files.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Io,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Config file to use: `explicit` if given, otherwise the platform default.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e:#}"))),
    }
}

/// Loads the configuration; a missing file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<Config> {
    let path = config_path(explicit)?;
    Config::load_from(&path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}
