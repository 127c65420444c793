//! Error types for the summary crate.

use apidrift_artifacts::ArtifactError;
use apidrift_diff::DiffError;

/// Errors from setting up or running a change summary.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// A snapshot root does not exist. Raised before any diff work starts.
    #[error("artifacts directory does not exist: {0}")]
    ArtifactsDirectoryMissing(String),

    /// No files were supplied to compare.
    #[error("file list cannot be empty")]
    EmptyFileList,

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// One artifact could not be diffed.
    #[error("{file}: {source}")]
    Diff {
        file: String,
        #[source]
        source: DiffError,
    },

    /// Reading an artifact failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// A worker task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl SummaryError {
    /// Whether the failure concerns a single artifact's content, as opposed
    /// to the run as a whole. Only these may be skipped.
    pub fn is_per_file(&self) -> bool {
        match self {
            Self::Diff { .. } => true,
            Self::Artifact(e) => e.as_flatten_error().is_some(),
            _ => false,
        }
    }
}

/// Result alias for summary operations.
pub type SummaryResult<T> = Result<T, SummaryError>;
