//! Data models for the card: catalogs and the composition state.
//!
//! Models are independent of the terminal UI and the raster renderer.

pub mod composition;
pub mod rgb;
pub mod template;
pub mod text_color;

// Re-export all model types
pub use composition::CompositionState;
pub use rgb::RgbColor;
pub use template::{CardTemplate, TEMPLATES};
pub use text_color::{TextColor, TEXT_COLORS};
