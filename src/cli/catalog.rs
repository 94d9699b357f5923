//! Catalog commands: list the card templates and text colors.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::common::{load_config, CliResult};
use crate::models::{TEMPLATES, TEXT_COLORS};
use crate::render::AssetStore;

/// List the card templates
#[derive(Debug, Clone, Args)]
pub struct TemplatesArgs {
    /// Check that each template image exists in this assets directory
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

impl TemplatesArgs {
    /// Execute the templates command
    pub fn execute(&self, config_file: Option<&Path>) -> CliResult<()> {
        let assets_dir = match &self.assets {
            Some(dir) => dir.clone(),
            None => load_config(config_file)?.paths.assets_dir,
        };
        let store = AssetStore::new(assets_dir);

        for line in template_lines(&store) {
            println!("{line}");
        }
        Ok(())
    }
}

fn template_lines(store: &AssetStore) -> Vec<String> {
    TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let marker = if store.path_for(template).is_file() {
                ""
            } else {
                "  (missing)"
            };
            format!(
                "{}. {:<8} {:<8} {}{marker}",
                i + 1,
                template.id,
                template.name,
                template.image
            )
        })
        .collect()
}

/// List the text colors
#[derive(Debug, Clone, Args)]
pub struct ColorsArgs {}

impl ColorsArgs {
    /// Execute the colors command
    pub fn execute(&self) -> CliResult<()> {
        for line in color_lines() {
            println!("{line}");
        }
        Ok(())
    }
}

fn color_lines() -> Vec<String> {
    TEXT_COLORS
        .iter()
        .map(|color| format!("{:<6} {}", color.name, color.color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_lines_mark_missing() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("4-gift.jpeg"), b"").unwrap();

        let lines = template_lines(&AssetStore::new(temp_dir.path()));
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("1. snowman"));
        assert!(lines[0].ends_with("(missing)"));
        assert!(lines[3].ends_with("4-gift.jpeg"));
    }

    #[test]
    fn test_color_lines() {
        let lines = color_lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "White  #FFFFFF");
        assert_eq!(lines[5], "Navy   #1A2744");
    }
}
