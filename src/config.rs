//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution. Only application
//! setup lives here; the card being edited is never persisted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::CONFIG_DIR_NAME;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding the template background images
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Where exported cards are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// TrueType font used for the message (system font when unset)
    #[serde(default)]
    pub font: Option<PathBuf>,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

/// Gets the default export directory.
///
/// Uses the platform download directory, falling back to the current directory.
fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            output_dir: default_output_dir(),
            font: None,
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ChristmasCard/config.toml`
/// - macOS: `~/Library/Application Support/ChristmasCard/config.toml`
/// - Windows: `%APPDATA%\ChristmasCard\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from an explicit file path.
    ///
    /// If the file doesn't exist, returns default configuration. Paths are not
    /// checked here, so a stale entry can still be repaired with `config set`.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to an explicit file path (temp file + rename).
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the font file exists (if set)
    /// - the output directory is not an existing regular file
    ///
    /// The assets directory is not checked; missing images fail the export
    /// that needs them.
    pub fn validate(&self) -> Result<()> {
        if let Some(font) = &self.paths.font {
            if !font.is_file() {
                anyhow::bail!("Font file does not exist: {}", font.display());
            }
        }

        if self.paths.output_dir.is_file() {
            anyhow::bail!(
                "Output directory is a file: {}",
                self.paths.output_dir.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.paths.font, None);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
    }

    #[test]
    fn test_config_validate_default() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_config_validate_ignores_missing_assets_dir() {
        let mut config = Config::new();
        config.paths.assets_dir = PathBuf::from("/this/assets/dir/does/not/exist");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_missing_font() {
        let mut config = Config::new();
        config.paths.font = Some(PathBuf::from("/this/font/does/not/exist.ttf"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_output_dir_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let mut config = Config::new();
        config.paths.output_dir = file;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.paths.assets_dir = PathBuf::from("/srv/cards");
        config.paths.output_dir = temp_dir.path().to_path_buf();
        config.ui.theme_mode = ThemeMode::Light;

        config.save_to(&config_file).unwrap();
        assert!(!config_file.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.paths.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_config_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\ntheme_mode = \"Dark\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.ui.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.paths.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_config_load_keeps_stale_font() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[paths]\nassets_dir = \"/srv/cards\"\nfont = \"/gone/font.ttf\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.paths.font, Some(PathBuf::from("/gone/font.ttf")));
        assert_eq!(loaded.paths.assets_dir, PathBuf::from("/srv/cards"));
        assert!(loaded.validate().is_err());
        assert!(loaded.save_to(&config_file).is_err());
    }
}
