//! Font loading and glyph rasterization for the message overlay.

use anyhow::{Context, Result};
use fontconfig::Fontconfig;
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A single rasterized glyph: coverage bitmap plus placement metrics.
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    /// Bitmap width in pixels
    pub width: usize,
    /// Bitmap height in pixels
    pub height: usize,
    /// Offset of the bitmap's left edge from the pen position
    pub xmin: i32,
    /// Offset of the bitmap's bottom edge from the baseline (up is positive)
    pub ymin: i32,
    /// Horizontal pen advance
    pub advance: f32,
    /// Row-major coverage values (0 = empty, 255 = full)
    pub coverage: Vec<u8>,
}

/// Source of glyph bitmaps used by the compositor's text layout.
pub trait GlyphRasterizer {
    /// Rasterizes one character at the given pixel size.
    fn rasterize(&self, ch: char, px: f32) -> Glyph;

    /// Distance from the top of a line box to the baseline, before line-height spreading.
    fn ascent(&self, px: f32) -> f32;

    /// Distance from the baseline to the bottom of the glyph box (positive).
    fn descent(&self, px: f32) -> f32;
}

/// TrueType font renderer backed by fontdue.
pub struct FontRenderer {
    font: Font,
    source: PathBuf,
}

impl std::fmt::Debug for FontRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRenderer")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Fontconfig queries tried in order when no font is configured.
///
/// Serif italic first to match the card's lettering, then plain serif, then sans.
const FONT_QUERIES: &[(&str, Option<&str>)] = &[
    ("serif", Some("Italic")),
    ("serif", None),
    ("sans-serif", None),
];

impl FontRenderer {
    /// Load a TrueType font from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::load(path, 0)
    }

    /// Load face `index` of a font file (non-zero only for collections).
    fn load(path: &Path, index: u32) -> Result<Self> {
        info!(path = %path.display(), index, "Loading font");

        let font_data = fs::read(path).with_context(|| {
            format!(
                "Failed to read font file: {}. Check that the file exists and is readable.",
                path.display()
            )
        })?;

        let settings = FontSettings {
            collection_index: index,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(font_data, settings).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse font file '{}': {}. Font may be corrupt or in an unsupported format.",
                path.display(),
                e
            )
        })?;

        Ok(Self {
            font,
            source: path.to_path_buf(),
        })
    }

    /// Load the configured font, or the best available system font.
    pub fn resolve(configured: Option<&Path>) -> Result<Self> {
        if let Some(path) = configured {
            return Self::from_path(path);
        }

        Self::from_system_font().context(
            "No usable TrueType font found. Set `paths.font` in the config file \
             or pass --font.",
        )
    }

    /// Load the best system font that fontconfig resolves and fontdue can parse.
    fn from_system_font() -> Option<Self> {
        let Some(fc) = Fontconfig::new() else {
            warn!("fontconfig is not available, cannot resolve a system font");
            return None;
        };

        FONT_QUERIES.iter().find_map(|&(family, style)| {
            let found = fc.find(family, style)?;
            debug!(
                family,
                style = style.unwrap_or("Regular"),
                name = %found.name,
                path = %found.path.display(),
                "Resolved font via fontconfig"
            );
            let index = found.index.and_then(|i| u32::try_from(i).ok()).unwrap_or(0);
            match Self::load(&found.path, index) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "Skipping unusable system font");
                    None
                }
            }
        })
    }

    /// Path the font was loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl GlyphRasterizer for FontRenderer {
    fn rasterize(&self, ch: char, px: f32) -> Glyph {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        Glyph {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        }
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent)
    }

    fn descent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.2, |m| -m.descent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_path_missing_file() {
        let err = FontRenderer::from_path(Path::new("/no/such/font.ttf")).unwrap_err();
        assert!(err.to_string().contains("Failed to read font file"));
    }

    #[test]
    fn test_from_path_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let bogus = temp_dir.path().join("bogus.ttf");
        fs::write(&bogus, b"definitely not a font").unwrap();

        let err = FontRenderer::from_path(&bogus).unwrap_err();
        assert!(err.to_string().contains("Failed to parse font file"));
    }

    #[test]
    fn test_resolve_prefers_configured_path() {
        let err = FontRenderer::resolve(Some(Path::new("/no/such/font.ttf"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/font.ttf"));
    }

    #[test]
    fn test_system_font_is_loadable() {
        // Machines without fontconfig or fonts have nothing to check
        if let Ok(font) = FontRenderer::resolve(None) {
            assert!(font.source().is_file());
            assert!(font.rasterize('M', 24.0).advance > 0.0);
        }
    }
}
