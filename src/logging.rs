//! Tracing subscriber setup.
//!
//! The interactive editor owns the terminal, so it logs to a file in the
//! config directory. Headless commands log to stderr. `RUST_LOG` overrides
//! the default level in both cases.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::LOG_FILE_NAME;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, with colors
    Stderr,
    /// Appended to a file, without colors
    File(PathBuf),
}

/// Gets the log file used by the interactive editor.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join(LOG_FILE_NAME))
}

/// Default filter directive for the verbosity flag.
#[must_use]
pub const fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global tracing subscriber.
pub fn init(verbose: bool, target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to initialize logging")?,
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .context(format!("Failed to create log directory: {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context(format!("Failed to open log file: {}", path.display()))
}
