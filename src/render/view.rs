//! Composition view: derives what the card looks like from the current state.
//!
//! `compose_view` is a pure function. Both the terminal preview and the raster
//! compositor draw from the `CardView` it returns, so the two never disagree on
//! size, color or placement.

use crate::models::{CardTemplate, CompositionState, RgbColor};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.4;
/// Horizontal padding on each side of the message block (px).
pub const PADDING_X: f32 = 24.0;
/// Corner radius of the card (px).
pub const CORNER_RADIUS: f32 = 16.0;
/// Shadow offset to the right and down (px).
pub const SHADOW_OFFSET: f32 = 2.0;
/// Shadow blur radius (px).
pub const SHADOW_BLUR: f32 = 4.0;
/// Shadow opacity (black).
pub const SHADOW_ALPHA: f32 = 0.5;

/// The message overlay, present only when there is a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Message text as typed
    pub text: String,
    /// Font size in px
    pub font_size_px: u16,
    /// Vertical center of the block, in percent of the card height
    pub top_percent: u16,
    /// Text color
    pub color: RgbColor,
}

impl Overlay {
    /// Lines of the message after pre-line whitespace handling.
    ///
    /// Newlines are kept; runs of spaces and tabs inside a line collapse to
    /// one space and are trimmed at both ends.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.text
            .split('\n')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    }
}

/// Everything needed to draw the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Background template
    pub background: &'static CardTemplate,
    /// Message overlay (hidden entirely when the message is empty)
    pub overlay: Option<Overlay>,
}

/// Derives the card view from the composition state.
#[must_use]
pub fn compose_view(state: &CompositionState) -> CardView {
    let overlay = if state.message().is_empty() {
        None
    } else {
        Some(Overlay {
            text: state.message().to_string(),
            font_size_px: state.font_size(),
            top_percent: state.position(),
            color: state.text_color().color,
        })
    };

    CardView {
        background: state.template(),
        overlay,
    }
}
