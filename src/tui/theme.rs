//! Theme system for consistent UI colors across dark and light modes.
//!
//! The theme follows the configured `ThemeMode`; in `Auto` mode the OS
//! preference is detected with the `dark-light` crate.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and success messages
    pub success: Color,
    /// Error state color for errors and failure notices
    pub error: Color,
    /// Warning state color for warnings and cautions
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels
    pub text_secondary: Color,
    /// Muted text color for help text and disabled items
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
    /// Surface color for panels and the card frame
    pub surface: Color,

    // State indicators
    /// Active/focused element color
    pub active: Color,
    /// Inactive/disabled element color
    pub inactive: Color,
}

impl Theme {
    /// Detects the OS theme and returns the matching Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Creates a dark theme with festive red and gold chrome.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(196, 30, 58),
            accent: Color::Rgb(212, 165, 116),
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::Rgb(45, 90, 63),
            surface: Color::Rgb(30, 30, 30),

            active: Color::Rgb(212, 165, 116),
            inactive: Color::Gray,
        }
    }

    /// Creates a light theme with deep green and red chrome.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(45, 90, 63),
            accent: Color::Rgb(196, 30, 58),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(245, 240, 230),
            surface: Color::Rgb(245, 245, 245),

            active: Color::Rgb(196, 30, 58),
            inactive: Color::Rgb(180, 180, 180),
        }
    }

    /// Creates the theme selected by a configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
