//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the card widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod controls;
pub mod handlers;
pub mod help;
pub mod preview;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::export::{DirectoryDownloads, ExportFailure, ExportJob, RasterCapture};
use crate::models::CompositionState;
use crate::render::AssetStore;

pub use controls::{ControlField, ControlsPanel};
pub use help::HelpOverlay;
pub use preview::CardPreview;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Width of the control panel column.
const CONTROLS_WIDTH: u16 = 44;

/// Application state - single source of truth
///
/// All UI components read from this state. Only event handlers modify it.
#[derive(Debug)]
pub struct AppState {
    // Core data
    /// Current card composition
    pub composition: CompositionState,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Focused control
    pub focus: ControlField,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for status message
    pub status_color_override: Option<ratatui::style::Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // System resources
    /// Application configuration
    pub config: Config,
    /// Background images for the preview
    pub assets: AssetStore,

    // Export state
    /// Background export job
    pub export_job: ExportJob,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Create a new application state from the configuration.
    ///
    /// Exports rasterize with the configured font and save into the
    /// configured output directory.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let assets = AssetStore::new(&config.paths.assets_dir);
        let capture = RasterCapture::new(assets.clone(), config.paths.font.clone());
        let sink = DirectoryDownloads::new(&config.paths.output_dir);
        let job = ExportJob::new(Arc::new(capture), Arc::new(sink));
        Self::from_parts(config, assets, job)
    }

    /// Create a new application state with a specific export job.
    #[must_use]
    pub fn with_export_job(config: Config, export_job: ExportJob) -> Self {
        let assets = AssetStore::new(&config.paths.assets_dir);
        Self::from_parts(config, assets, export_job)
    }

    fn from_parts(config: Config, assets: AssetStore, export_job: ExportJob) -> Self {
        Self {
            composition: CompositionState::new(),
            theme: Theme::from_mode(config.ui.theme_mode),
            focus: ControlField::Template,
            show_help: false,
            status_message: String::new(),
            status_color_override: None,
            error_message: None,
            assets,
            config,
            export_job,
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set status message with custom foreground color
    pub fn set_status_with_style(
        &mut self,
        message: impl Into<String>,
        color: ratatui::style::Color,
    ) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = Some(color);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Starts an export of the current card if the Download control is enabled.
    pub fn start_export(&mut self) {
        if self.composition.export_in_progress() || self.export_job.is_running() {
            self.set_status_with_style("A download is already in progress", self.theme.warning);
            return;
        }
        if self.composition.message().is_empty() {
            self.set_status_with_style("Please enter a message first", self.theme.warning);
            return;
        }
        if self.export_job.start(&mut self.composition) {
            self.set_status("Downloading...");
        }
    }

    /// Checks the export job and reports its outcome.
    ///
    /// Returns true when an export finished during this call.
    pub fn poll_export(&mut self) -> bool {
        let Some(outcome) = self.export_job.poll(&mut self.composition) else {
            return false;
        };
        match outcome {
            Ok(path) => {
                self.set_status_with_style(
                    format!(
                        "✓ Saved {} - Share it with friends and family!",
                        path.display()
                    ),
                    self.theme.success,
                );
            }
            Err(e) => self.report_export_failure(&e),
        }
        true
    }

    fn report_export_failure(&mut self, failure: &ExportFailure) {
        self.status_message.clear();
        self.set_error(format!("Download failed. Please try again.\n\n{failure}"));
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    info!(
        assets = %state.assets.root().display(),
        output = %state.config.paths.output_dir.display(),
        "Starting card editor"
    );

    loop {
        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }

        // Poll export job for its outcome
        state.poll_export();

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    if state.export_job.is_running() {
        warn!("Quitting while a download is still in progress");
    }
    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(6), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if state.show_help {
        HelpOverlay::render(f, centered_rect(80, 80, f.area()), &state.theme);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            " Merry Christmas ",
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
        Span::styled(
            "- choose a card and write your message",
            Style::default().fg(state.theme.text_muted),
        ),
    ]);

    let title_widget = Paragraph::new(title)
        .style(Style::default().bg(state.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(Line::from(" Happy Holidays! ").alignment(Alignment::Right))
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render main content (preview and controls side by side)
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(CONTROLS_WIDTH)])
        .split(area);

    CardPreview::render(f, columns[0], state);
    ControlsPanel::render(f, columns[1], state);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 40, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("DOWNLOAD FAILED")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ])])
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
pub(crate) fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.show_help {
        return handlers::handle_help_input(state, key);
    }

    handlers::handle_main_input(state, key)
}
