//! Card rendering: the composition view and the raster compositor.
//!
//! `view` turns the composition state into a `CardView`; `compositor` draws a
//! `CardView` into a bitmap using backgrounds from `assets` and glyphs from
//! `font`.

pub mod assets;
pub mod compositor;
pub mod font;
pub mod view;

pub use assets::AssetStore;
pub use compositor::compose;
pub use font::{FontRenderer, Glyph, GlyphRasterizer};
pub use view::{compose_view, CardView, Overlay};
