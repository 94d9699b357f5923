//! Christmas Card - terminal greeting card customizer
//!
//! Pick a card, write a message, style it, and save the card as a PNG.
//! Without a subcommand the interactive editor starts; the subcommands give
//! headless access for scripting.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use christmas_card::app;
use christmas_card::cli::{self, CliError, ColorsArgs, ConfigArgs, RenderArgs, TemplatesArgs};
use christmas_card::config::Config;
use christmas_card::constants::{APP_BINARY_NAME, APP_NAME};
use christmas_card::logging::{self, LogTarget};

/// Christmas Card - terminal greeting card customizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Use this configuration file instead of the default one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card to PNG without the editor
    Render(RenderArgs),
    /// List the card templates
    Templates(TemplatesArgs),
    /// List the text colors
    Colors(ColorsArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return run_editor(cli.config, cli.verbose);
    };

    // Logging is best effort for headless commands
    let _ = logging::init(cli.verbose, &LogTarget::Stderr);

    let config_file = cli.config.as_deref();
    let result = match &command {
        Command::Render(args) => args.execute(config_file),
        Command::Templates(args) => args.execute(config_file),
        Command::Colors(args) => args.execute(),
        Command::Config(args) => args.execute(config_file),
    };

    if let Err(CliError { message, exit_code }) = result {
        eprintln!("Error: {message}");
        std::process::exit(exit_code.code());
    }
    Ok(())
}

fn run_editor(config_file: Option<PathBuf>, verbose: bool) -> Result<()> {
    let log_target = LogTarget::File(logging::log_file_path()?);
    logging::init(verbose, &log_target)?;

    let config = match cli::common::load_config(config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Falling back to default configuration");
            eprintln!("Warning: {e}");
            eprintln!("Run `{APP_BINARY_NAME} config show` to inspect the configuration.");
            Config::default()
        }
    };

    app::launch_editor(config)?;

    println!("{APP_NAME}: Happy Holidays!");
    Ok(())
}
