//! Composition state: the single source of truth for the card being edited.
//!
//! Every control is bound to exactly one field. Setters replace the value and
//! never validate; the input controls own the bounds.

use crate::constants::{FONT_SIZE_DEFAULT, POSITION_DEFAULT};

use super::{CardTemplate, TextColor};

/// Current selections for the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionState {
    template: &'static CardTemplate,
    message: String,
    font_size: u16,
    text_color: &'static TextColor,
    position: u16,
    export_in_progress: bool,
}

impl CompositionState {
    /// Creates a card with the default selections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            template: CardTemplate::default_template(),
            message: String::new(),
            font_size: FONT_SIZE_DEFAULT,
            text_color: TextColor::default_color(),
            position: POSITION_DEFAULT,
            export_in_progress: false,
        }
    }

    /// Selected background template.
    #[must_use]
    pub const fn template(&self) -> &'static CardTemplate {
        self.template
    }

    /// Message text (may contain newlines).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Font size in px.
    #[must_use]
    pub const fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Selected text color swatch.
    #[must_use]
    pub const fn text_color(&self) -> &'static TextColor {
        self.text_color
    }

    /// Vertical position of the message, in percent of the card height.
    #[must_use]
    pub const fn position(&self) -> u16 {
        self.position
    }

    /// Whether an export job is running.
    #[must_use]
    pub const fn export_in_progress(&self) -> bool {
        self.export_in_progress
    }

    /// Selects a background template.
    pub fn set_template(&mut self, template: &'static CardTemplate) {
        self.template = template;
    }

    /// Replaces the message text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Replaces the font size.
    pub fn set_font_size(&mut self, font_size: u16) {
        self.font_size = font_size;
    }

    /// Selects a text color swatch.
    pub fn set_text_color(&mut self, color: &'static TextColor) {
        self.text_color = color;
    }

    /// Replaces the vertical position.
    pub fn set_position(&mut self, position: u16) {
        self.position = position;
    }

    /// Sets or clears the export-in-progress flag.
    pub fn set_export_in_progress(&mut self, in_progress: bool) {
        self.export_in_progress = in_progress;
    }

    /// Export is allowed only with a message and no export already running.
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.message.is_empty() && !self.export_in_progress
    }
}

impl Default for CompositionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TEMPLATES, TEXT_COLORS};

    #[test]
    fn test_defaults() {
        let state = CompositionState::new();
        assert_eq!(state.template().id, "snowman");
        assert_eq!(state.message(), "");
        assert_eq!(state.font_size(), 18);
        assert_eq!(state.text_color().name, "White");
        assert_eq!(state.position(), 50);
        assert!(!state.export_in_progress());
    }

    #[test]
    fn test_setters_replace_single_field() {
        let mut state = CompositionState::new();
        state.set_template(&TEMPLATES[4]);
        assert_eq!(state.template().id, "tree");
        assert_eq!(state.font_size(), 18);

        state.set_text_color(&TEXT_COLORS[2]);
        assert_eq!(state.text_color().name, "Gold");
        assert_eq!(state.template().id, "tree");

        state.set_message("Merry Christmas!");
        state.set_font_size(24);
        state.set_position(30);
        assert_eq!(state.message(), "Merry Christmas!");
        assert_eq!(state.font_size(), 24);
        assert_eq!(state.position(), 30);
    }

    #[test]
    fn test_setters_do_not_clamp() {
        // Bounds belong to the input controls
        let mut state = CompositionState::new();
        state.set_font_size(99);
        state.set_position(0);
        assert_eq!(state.font_size(), 99);
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_can_export() {
        let mut state = CompositionState::new();
        assert!(!state.can_export());

        state.set_message("Hi");
        assert!(state.can_export());

        state.set_export_in_progress(true);
        assert!(!state.can_export());

        state.set_export_in_progress(false);
        assert!(state.can_export());
    }
}
