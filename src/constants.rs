//! Application-wide constants.
//!
//! This module defines the application name and the fixed limits of the
//! card controls.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Christmas Card";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "christmas-card";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "ChristmasCard";

/// Maximum number of characters accepted by the message input.
pub const MESSAGE_MAX_CHARS: usize = 50;

/// Smallest font size offered by the font size slider (px).
pub const FONT_SIZE_MIN: u16 = 14;
/// Largest font size offered by the font size slider (px).
pub const FONT_SIZE_MAX: u16 = 28;
/// Font size of a fresh card (px).
pub const FONT_SIZE_DEFAULT: u16 = 18;

/// Highest message position offered by the position slider (% of card height).
pub const POSITION_MIN: u16 = 10;
/// Lowest message position offered by the position slider (% of card height).
pub const POSITION_MAX: u16 = 90;
/// Message position of a fresh card (% of card height).
pub const POSITION_DEFAULT: u16 = 50;

/// Oversampling factor applied when exporting.
pub const EXPORT_SCALE: u32 = 3;

/// Prefix of exported file names; the epoch milliseconds and `.png` follow.
pub const EXPORT_FILE_PREFIX: &str = "christmas-card-";

/// Log file written by the interactive editor, inside the config directory.
pub const LOG_FILE_NAME: &str = "christmas-card.log";
