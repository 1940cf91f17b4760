//! Error types for recipe execution.

use drpt_model::LimitsError;
use thiserror::Error;

/// Errors that abort a release run.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A rename step would leave two columns with the same name.
    #[error("rename conflict: columns [{}] would all be named '{target}'", sources.join(", "))]
    ColumnConflict { target: String, sources: Vec<String> },

    /// Scaling limits for a column are unusable.
    #[error(transparent)]
    Limits(#[from] LimitsError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_names_every_source() {
        let err = TransformError::ColumnConflict {
            target: "x".to_string(),
            sources: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "rename conflict: columns [a, b] would all be named 'x'"
        );
    }
}
