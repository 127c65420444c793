//! Error types for the artifacts crate.

use std::path::PathBuf;

use apidrift_flatten::FlattenError;

/// Errors from artifact sources and sinks.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// An artifact root directory does not exist.
    #[error("artifacts directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    /// An artifact could not be parsed as a document.
    #[error("{file}: {source}")]
    Document {
        file: String,
        #[source]
        source: FlattenError,
    },

    /// I/O error reading or writing artifacts.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The flattening error behind this failure, if any.
    pub fn as_flatten_error(&self) -> Option<&FlattenError> {
        match self {
            Self::Document { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;
