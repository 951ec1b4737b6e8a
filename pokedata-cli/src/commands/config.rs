use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedata_core::DatasetKind;
use pokedata_lib::{ConfigSource, PipelineConfig, config_path};

use crate::CliError;

/// Show the resolved configuration and where it came from.
pub(crate) fn run_config_show(config: &PipelineConfig, source: &ConfigSource) -> Result<(), CliError> {
    log::info!(
        "{}",
        "pokedata Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let user = config_path();
    if user.exists() {
        log::info!(
            "  Config file: {} {}",
            user.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            user.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("  Loaded from: {}", source);
    log::info!("  Outputs:");
    for kind in DatasetKind::all() {
        log::info!(
            "    {}",
            config
                .data_path(*kind)
                .display()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    for line in config.to_toml()?.lines() {
        log::info!("{line}");
    }
    Ok(())
}

/// Print the per-user config file path.
pub(crate) fn run_config_path() {
    log::info!("{}", config_path().display());
}
