//! Shared test fixtures for card tests.
#![allow(dead_code)] // Not every test file uses every fixture

use christmas_card::config::Config;
use christmas_card::models::TEMPLATES;
use christmas_card::render::FontRenderer;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Natural size of the generated template images.
pub const ASSET_SIZE: (u32, u32) = (200, 150);

/// Creates an assets directory holding every template image.
///
/// Each image is a solid color so tests can tell templates apart.
pub fn temp_assets() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (i, template) in TEMPLATES.iter().enumerate() {
        let shade = u8::try_from(40 * (i + 1)).unwrap();
        RgbImage::from_pixel(ASSET_SIZE.0, ASSET_SIZE.1, Rgb([shade, 60, 40]))
            .save(temp_dir.path().join(template.image))
            .expect("Failed to write template image");
    }
    temp_dir
}

/// Writes `config` to a fresh temp directory and returns the file path.
pub fn temp_config(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    config.save_to(&path).expect("Failed to write config");
    (path, temp_dir)
}

/// A config file path that does not exist yet, so defaults apply.
pub fn empty_config() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    (temp_dir.path().join("config.toml"), temp_dir)
}

/// Path of a usable system font, if the machine has one.
pub fn system_font() -> Option<PathBuf> {
    FontRenderer::resolve(None)
        .ok()
        .map(|font| font.source().to_path_buf())
}

/// PNG files in `dir` named like exported cards.
pub fn exported_cards(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix("christmas-card-"))
                .and_then(|rest| rest.strip_suffix(".png"))
                .is_some_and(|digits| {
                    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
                })
        })
        .collect()
}
