//! Error types for loading release inputs.

use std::path::PathBuf;

use drpt_model::{LimitsError, RecipeError};
use thiserror::Error;

/// Errors that can occur while loading a dataset, recipe or limits file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported format.
    #[error("unsupported {kind} format '{extension}' for {path}")]
    UnsupportedFormat {
        kind: &'static str,
        extension: String,
        path: PathBuf,
    },

    // === Dataset Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read Parquet with Polars.
    #[error("failed to read Parquet {path}: {message}")]
    ParquetRead { path: PathBuf, message: String },

    // === Recipe Errors ===
    /// Recipe failed validation.
    #[error("invalid recipe {path}: {source}")]
    Recipe {
        path: PathBuf,
        #[source]
        source: RecipeError,
    },

    // === Limits Errors ===
    /// A limits file row could not be parsed.
    #[error("invalid limits file {path} at line {line}: {reason}")]
    LimitsParse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A limits entry violates `min <= max`.
    #[error("invalid limits file {path}: {source}")]
    Limits {
        path: PathBuf,
        #[source]
        source: LimitsError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
