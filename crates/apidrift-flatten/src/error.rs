//! Error types for the flatten crate.

/// Errors raised while parsing or flattening a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// The document could not be parsed or does not have a flattenable shape.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// Nesting exceeded the configured maximum depth.
    #[error("document nesting exceeds maximum depth of {max_depth}")]
    DocumentTooDeep { max_depth: usize },
}

impl FlattenError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }
}

/// Convenience alias for flatten results.
pub type FlattenResult<T> = Result<T, FlattenError>;
