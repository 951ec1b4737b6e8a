//! pokedata CLI
//!
//! Command-line interface for building the Pokémon JSON datasets.

mod cli_types;
mod commands;
mod error;
mod logger;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedata_lib::PipelineConfig;

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::commands::config::{run_config_path, run_config_show};
use crate::commands::run::run_step;
pub(crate) use crate::error::CliError;

/// Blank line at info level, so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (mut config, source) = PipelineConfig::resolve(cli.config.as_deref())?;
    log::debug!("Configuration: {source}");

    if let Some(dir) = cli.data_dir {
        config.paths.data_dir = dir;
    }
    if let Some(dir) = cli.dump_dir {
        config.paths.dump_dir = dir;
    }

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&config, &source),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
        command => {
            if let Commands::Locations {
                patch: Some(ref patch),
            } = command
            {
                config.paths.patch_file = patch.clone();
            }
            match command.step() {
                Some(step) => run_step(config, step, cli.quiet),
                None => Ok(()),
            }
        }
    }
}
