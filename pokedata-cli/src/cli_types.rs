//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pokedata_lib::Step;

#[derive(Parser)]
#[command(name = "pokedata")]
#[command(about = "Build Pokémon JSON datasets from PokeAPI and local game dumps", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.config/pokedata/pokedata.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory datasets are read from and written to
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Root of the local game-data dump (containing info/ and strings/)
    #[arg(long, global = true)]
    pub dump_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch abilities (generations I-V plus always-included ones)
    Abilities,

    /// Fetch moves, with stat overrides from the skill dump
    Moves,

    /// Fetch natures
    Natures,

    /// Fetch sprites for every in-range species, variety and form
    Sprites,

    /// Group Pokémon and moves by type, with localized type names
    Types,

    /// Build the item dataset from the dump and string tables
    Items,

    /// Cross-link held items between the Pokémon and item datasets
    HeldItems,

    /// Bucket Pokémon by gender rate
    GenderRates,

    /// Compile encounter locations from the monster dump
    Locations {
        /// Patch file with manual additions and removals
        #[arg(long)]
        patch: Option<PathBuf>,
    },

    /// Re-index compiled locations by rarity, region and encounter type
    LocationReports,

    /// Inspect the active configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// The pipeline step a dataset subcommand runs.
    pub(crate) fn step(&self) -> Option<Step> {
        let step = match self {
            Self::Abilities => Step::Abilities,
            Self::Moves => Step::Moves,
            Self::Natures => Step::Natures,
            Self::Sprites => Step::Sprites,
            Self::Types => Step::Types,
            Self::Items => Step::Items,
            Self::HeldItems => Step::HeldItems,
            Self::GenderRates => Step::GenderRates,
            Self::Locations { .. } => Step::Locations,
            Self::LocationReports => Step::LocationReports,
            Self::Config { .. } => return None,
        };
        Some(step)
    }
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the resolved configuration and where it came from
    Show,

    /// Print the per-user config file path
    Path,
}
