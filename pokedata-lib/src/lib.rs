//! Batch pipelines that build the Pokémon JSON datasets.
//!
//! Each [`Step`] reads from the remote catalog, the local game-data dump, or
//! previously written datasets, and writes one or more pretty-printed JSON
//! mappings into the configured data directory.

pub mod catalog;
pub mod config;
pub mod error;
pub mod items;
pub mod pipeline;
pub mod progress;
pub mod reports;
pub mod sprites;
pub mod types;

pub use config::{ConfigSource, PipelineConfig, config_path};
pub use error::PipelineError;
pub use pipeline::{Pipeline, RunReport, Step, WrittenArtifact};
pub use progress::PipelineEvent;
