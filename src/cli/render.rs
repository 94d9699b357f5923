//! Render command: export a card without the interactive editor.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::common::{load_config, CliError, CliResult};
use crate::constants::{
    FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, MESSAGE_MAX_CHARS, POSITION_DEFAULT,
    POSITION_MAX, POSITION_MIN,
};
use crate::export::{export_now, DirectoryDownloads, RasterCapture};
use crate::models::template::parse_template_id;
use crate::models::text_color::parse_text_color;
use crate::models::{CardTemplate, CompositionState, TextColor};
use crate::render::AssetStore;

/// Render a card to PNG
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Message to write on the card (max 50 characters, newlines allowed)
    #[arg(short, long, value_name = "TEXT")]
    pub message: String,

    /// Card template id (see `templates`)
    #[arg(short, long, value_name = "ID", default_value = "snowman", value_parser = parse_template_id)]
    pub template: &'static CardTemplate,

    /// Font size in px
    #[arg(
        long,
        value_name = "PX",
        default_value_t = FONT_SIZE_DEFAULT,
        value_parser = clap::value_parser!(u16).range(i64::from(FONT_SIZE_MIN)..=i64::from(FONT_SIZE_MAX))
    )]
    pub font_size: u16,

    /// Text color name (see `colors`)
    #[arg(short, long, value_name = "NAME", default_value = "White", value_parser = parse_text_color)]
    pub color: &'static TextColor,

    /// Vertical position of the message in percent of the card height
    #[arg(
        short,
        long,
        value_name = "PERCENT",
        default_value_t = POSITION_DEFAULT,
        value_parser = clap::value_parser!(u16).range(i64::from(POSITION_MIN)..=i64::from(POSITION_MAX))
    )]
    pub position: u16,

    /// Directory to save the card into (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory containing the template images (defaults to the configured assets directory)
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// TrueType font for the message (defaults to the configured or a system font)
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, config_file: Option<&Path>) -> CliResult<()> {
        let state = self.composition()?;
        let config = load_config(config_file)?;

        let assets_dir = self.assets.clone().unwrap_or(config.paths.assets_dir);
        let output_dir = self.output.clone().unwrap_or(config.paths.output_dir);
        let font = self.font.clone().or(config.paths.font);
        debug!(
            assets = %assets_dir.display(),
            output = %output_dir.display(),
            "Rendering card"
        );

        let capture = RasterCapture::new(AssetStore::new(assets_dir), font);
        let sink = DirectoryDownloads::new(output_dir);

        let mut state = state;
        match export_now(&mut state, &capture, &sink) {
            Ok(Some(path)) => {
                println!("✓ Saved card to: {}", path.display());
                println!("Share it with friends and family!");
                Ok(())
            }
            Ok(None) => Err(CliError::validation("Please enter a message")),
            Err(e) => Err(CliError::io(format!("Download failed. {e}"))),
        }
    }

    /// Builds the composition, applying the message input's constraints.
    fn composition(&self) -> CliResult<CompositionState> {
        if self.message.is_empty() {
            return Err(CliError::validation("Please enter a message"));
        }
        let length = self.message.chars().count();
        if length > MESSAGE_MAX_CHARS {
            return Err(CliError::validation(format!(
                "Message is too long: {length} characters (max {MESSAGE_MAX_CHARS})"
            )));
        }

        let mut state = CompositionState::new();
        state.set_template(self.template);
        state.set_message(self.message.as_str());
        state.set_font_size(self.font_size);
        state.set_text_color(self.color);
        state.set_position(self.position);
        Ok(state)
    }
}
