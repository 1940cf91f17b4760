//! Error types for writing release outputs.

use std::path::PathBuf;

use drpt_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create a file or its directory.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write CSV rows.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Polars failed to write the dataset.
    #[error("failed to write dataset {path}: {message}")]
    Dataset { path: PathBuf, message: String },

    /// Output path does not name a supported dataset format.
    #[error(transparent)]
    Format(#[from] IngestError),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, ReportError>;
