//! Error types for the diff crate.

use apidrift_flatten::FlattenError;

/// Errors that can occur while diffing documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The artifact file name does not encode `<family>.<version>.<rest>`.
    #[error("invalid artifact file name `{0}`: expected <family>.<version>.<anything>")]
    InvalidFileName(String),

    /// One side of the comparison could not be flattened.
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
