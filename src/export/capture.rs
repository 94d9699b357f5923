//! Bitmap capture of the current composition.

use anyhow::Result;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::models::CompositionState;
use crate::render::{compose, compose_view, AssetStore, FontRenderer, GlyphRasterizer};

/// Produces a bitmap of the card as it is currently composed.
pub trait CardCapture: Send + Sync {
    /// Captures the composition at `scale` times its natural size, on a transparent backdrop.
    fn capture(&self, state: &CompositionState, scale: u32) -> Result<RgbaImage>;
}

/// Captures by rasterizing the card view with the asset store and a TrueType font.
///
/// The font is resolved on first use, so a missing font only fails exports
/// that actually draw a message.
#[derive(Debug)]
pub struct RasterCapture {
    assets: AssetStore,
    font_path: Option<PathBuf>,
    font: OnceLock<Arc<FontRenderer>>,
}

impl RasterCapture {
    /// Creates a capture backed by `assets`, using `font_path` or a system font.
    #[must_use]
    pub fn new(assets: AssetStore, font_path: Option<PathBuf>) -> Self {
        Self {
            assets,
            font_path,
            font: OnceLock::new(),
        }
    }

    fn font(&self) -> Result<Arc<FontRenderer>> {
        if let Some(font) = self.font.get() {
            return Ok(Arc::clone(font));
        }
        let font = Arc::new(FontRenderer::resolve(self.font_path.as_deref())?);
        Ok(Arc::clone(self.font.get_or_init(|| font)))
    }
}

impl CardCapture for RasterCapture {
    fn capture(&self, state: &CompositionState, scale: u32) -> Result<RgbaImage> {
        let view = compose_view(state);
        let background = self.assets.background(view.background)?;

        let font = if view.overlay.is_some() {
            Some(self.font()?)
        } else {
            None
        };
        let glyphs = font.as_deref().map(|f| f as &dyn GlyphRasterizer);

        compose(&view, &background, glyphs, scale)
    }
}
