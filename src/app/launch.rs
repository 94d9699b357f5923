use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::tui;

/// Launches the interactive card editor and blocks until the user quits.
///
/// The terminal is restored even when the event loop fails.
pub fn launch_editor(config: Config) -> Result<()> {
    if let Err(e) = config.validate() {
        warn!(error = %format!("{e:#}"), "Configuration problem, exports may fail");
    }

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(config);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    // Check for errors
    result?;

    info!("Card editor closed");
    Ok(())
}
