use std::path::PathBuf;

use crate::pipeline::Step;

/// Progress update sent while a pipeline runs.
///
/// Sent over an MPSC channel so a frontend can render progress while the
/// pipeline blocks on the network.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A step has started.
    Started { step: Step },
    /// Walking a paginated listing.
    Listing { resource: String },
    /// Listing finished with `total` entries.
    Listed { total: usize },
    /// Fetching or processing one entity.
    Processing {
        index: usize,
        total: usize,
        name: String,
    },
    /// An entity was left out of the output.
    Skipped { name: String, reason: String },
    /// Writing an artifact.
    Writing { path: PathBuf },
    /// The step finished.
    Completed { step: Step },
}

impl PipelineEvent {
    pub fn processing(index: usize, total: usize, name: impl Into<String>) -> Self {
        Self::Processing {
            index,
            total,
            name: name.into(),
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Skipped {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Completion fraction (0.0 to 1.0) if calculable.
    pub fn percentage(&self) -> Option<f64> {
        match self {
            Self::Processing { index, total, .. } if *total > 0 => {
                Some((*index + 1) as f64 / *total as f64)
            }
            Self::Completed { .. } => Some(1.0),
            _ => None,
        }
    }
}
