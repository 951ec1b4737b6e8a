//! Log output for the CLI.
//!
//! Normal output goes through `log::info!`, so `--quiet` drops it by raising
//! the level to `Warn`. Messages print bare unless `--verbose` is set.

use std::io::Write;

use log::LevelFilter;

/// Level for the given flags. `--verbose` wins over `--quiet`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG`, when set, overrides the level.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.target(env_logger::Target::Stdout);
    let _ = builder.try_init();
}
