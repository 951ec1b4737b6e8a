use thiserror::Error;

use pokedata_lib::PipelineError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A pipeline step failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The pipeline thread panicked or hung up
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
