//! Fixed palette of message colors.

use super::RgbColor;

/// A named swatch from the message color palette.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextColor {
    /// Display name (also accepted on the command line)
    pub name: &'static str,
    /// Swatch color
    pub color: RgbColor,
}

/// The six swatches, in picker order.
pub static TEXT_COLORS: [TextColor; 6] = [
    TextColor {
        name: "White",
        color: RgbColor::new(0xFF, 0xFF, 0xFF),
    },
    TextColor {
        name: "Cream",
        color: RgbColor::new(0xF5, 0xF0, 0xE6),
    },
    TextColor {
        name: "Gold",
        color: RgbColor::new(0xD4, 0xA5, 0x74),
    },
    TextColor {
        name: "Red",
        color: RgbColor::new(0xC4, 0x1E, 0x3A),
    },
    TextColor {
        name: "Green",
        color: RgbColor::new(0x2D, 0x5A, 0x3F),
    },
    TextColor {
        name: "Navy",
        color: RgbColor::new(0x1A, 0x27, 0x44),
    },
];

impl TextColor {
    /// The swatch a fresh card starts with (white).
    #[must_use]
    pub fn default_color() -> &'static Self {
        &TEXT_COLORS[0]
    }

    /// Looks up a swatch by name (case-insensitive).
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Self> {
        TEXT_COLORS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Position of this swatch in the palette.
    #[must_use]
    pub fn index(&self) -> usize {
        TEXT_COLORS
            .iter()
            .position(|c| c.name == self.name)
            .unwrap_or_default()
    }

    /// Swatch at a palette index, wrapping around in both directions.
    #[must_use]
    pub fn at_wrapping(index: isize) -> &'static Self {
        let len = TEXT_COLORS.len() as isize;
        &TEXT_COLORS[index.rem_euclid(len) as usize]
    }

    /// Light swatches get a visible border in the picker.
    #[must_use]
    pub fn is_light(&self) -> bool {
        matches!(self.name, "White" | "Cream")
    }
}

/// Parses a swatch name for clap.
pub fn parse_text_color(s: &str) -> Result<&'static TextColor, String> {
    TextColor::find(s).ok_or_else(|| {
        let names: Vec<&str> = TEXT_COLORS.iter().map(|c| c.name).collect();
        format!("unknown color '{s}' (expected one of: {})", names.join(", "))
    })
}
