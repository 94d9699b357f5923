//! Configuration management CLI commands.

use crate::cli::common::{config_path, load_config, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as TOML
    #[arg(long)]
    toml: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory containing the template images
    #[arg(long, value_name = "DIR")]
    assets_dir: Option<PathBuf>,

    /// Directory exported cards are saved into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TrueType font for the message
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE", value_parser = parse_theme_mode)]
    theme: Option<ThemeMode>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, config_file: Option<&Path>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(config_file),
            ConfigCommand::Set(args) => args.execute(config_file),
            ConfigCommand::Path => {
                println!("{}", config_path(config_file)?.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, config_file: Option<&Path>) -> CliResult<()> {
        let config = load_config(config_file)?;

        if self.toml {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| CliError::io(format!("Failed to serialize configuration: {e}")))?;
            print!("{content}");
        } else {
            print!("{}", human_readable(&config));
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, config_file: Option<&Path>) -> CliResult<()> {
        let mut config = load_config(config_file)?;
        self.apply(&mut config)?;

        let path = config_path(config_file)?;
        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }

    fn apply(&self, config: &mut Config) -> CliResult<()> {
        // At least one argument must be provided
        if self.assets_dir.is_none()
            && self.output_dir.is_none()
            && self.font.is_none()
            && self.theme.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --assets-dir, --output-dir, --font, or --theme",
            ));
        }

        if let Some(path) = &self.assets_dir {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Assets directory does not exist: {}",
                    path.display()
                )));
            }
            config.paths.assets_dir.clone_from(path);
        }

        if let Some(path) = &self.output_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.output_dir.clone_from(path);
        }

        if let Some(path) = &self.font {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "Font file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.font = Some(path.clone());
        }

        if let Some(theme) = self.theme {
            config.ui.theme_mode = theme;
        }

        Ok(())
    }
}

fn parse_theme_mode(s: &str) -> Result<ThemeMode, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        _ => Err("Invalid theme mode. Must be 'auto', 'light', or 'dark'".to_string()),
    }
}

/// Configuration in human-readable format
fn human_readable(config: &Config) -> String {
    let font = config
        .paths
        .font
        .as_ref()
        .map_or_else(|| "(system font)".to_string(), |p| p.display().to_string());

    format!(
        "Christmas Card Configuration\n\
         ============================\n\
         \n\
         Paths:\n  \
         Assets Directory: {}\n  \
         Output Directory: {}\n  \
         Font: {font}\n\
         \n\
         UI:\n  \
         Theme Mode: {}\n",
        config.paths.assets_dir.display(),
        config.paths.output_dir.display(),
        format!("{:?}", config.ui.theme_mode).to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set_args() -> ConfigSetArgs {
        ConfigSetArgs {
            assets_dir: None,
            output_dir: None,
            font: None,
            theme: None,
        }
    }

    #[test]
    fn test_theme_mode_parsing() {
        assert_eq!(parse_theme_mode("auto"), Ok(ThemeMode::Auto));
        assert_eq!(parse_theme_mode("Light"), Ok(ThemeMode::Light));
        assert_eq!(parse_theme_mode("DARK"), Ok(ThemeMode::Dark));
        assert!(parse_theme_mode("sepia").is_err());
    }

    #[test]
    fn test_set_requires_an_option() {
        let mut config = Config::default();
        let err = set_args().apply(&mut config).unwrap_err();
        assert!(err.message.contains("--assets-dir"));
    }

    #[test]
    fn test_set_applies_values() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("cards");
        let mut config = Config::default();

        let args = ConfigSetArgs {
            assets_dir: Some(temp_dir.path().to_path_buf()),
            output_dir: Some(output.clone()),
            theme: Some(ThemeMode::Light),
            ..set_args()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.paths.assets_dir, temp_dir.path());
        assert_eq!(config.paths.output_dir, output);
        assert!(output.is_dir());
        assert_eq!(config.ui.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_set_rejects_missing_font() {
        let mut config = Config::default();
        let args = ConfigSetArgs {
            font: Some(PathBuf::from("/no/such/font.ttf")),
            ..set_args()
        };
        assert!(args.apply(&mut config).is_err());
        assert_eq!(config.paths.font, None);
    }

    #[test]
    fn test_set_font_repairs_stale_font() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[paths]\nassets_dir = \"/srv/cards\"\nfont = \"/gone/font.ttf\"\n",
        )
        .unwrap();
        let font = temp_dir.path().join("Card-Italic.ttf");
        std::fs::write(&font, b"").unwrap();

        let args = ConfigSetArgs {
            font: Some(font.clone()),
            ..set_args()
        };
        args.execute(Some(&config_file)).unwrap();

        let saved = Config::load_from(&config_file).unwrap();
        assert_eq!(saved.paths.font, Some(font));
        assert_eq!(saved.paths.assets_dir, PathBuf::from("/srv/cards"));
    }

    #[test]
    fn test_human_readable() {
        let text = human_readable(&Config::default());
        assert!(text.contains("Assets Directory: assets"));
        assert!(text.contains("Font: (system font)"));
        assert!(text.contains("Theme Mode: auto"));
    }
}
