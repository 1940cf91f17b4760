//! Dataset reading.
//!
//! The format is picked from the file extension. CSV files must carry a
//! single header row; Parquet files are read whole and truncated when a row
//! limit is requested.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Number of rows Polars looks at when inferring CSV column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Supported on-disk dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Parquet,
}

impl DatasetFormat {
    /// Detect the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            _ => Err(IngestError::UnsupportedFormat {
                kind: "dataset",
                extension,
                path: path.to_path_buf(),
            }),
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Read a dataset into a DataFrame, keeping the file's column order.
///
/// `row_limit` keeps only the first rows, for preview runs.
///
/// # Errors
///
/// Returns an [`IngestError`] if the file is missing, has an unsupported
/// extension or cannot be parsed.
pub fn read_dataset(path: &Path, row_limit: Option<usize>) -> Result<DataFrame> {
    let format = DatasetFormat::from_path(path)?;
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let start = Instant::now();
    let df = match format {
        DatasetFormat::Csv => read_csv_dataset(path, row_limit)?,
        DatasetFormat::Parquet => read_parquet_dataset(path, row_limit)?,
    };
    info!(
        path = %path.display(),
        format = format.extension(),
        row_count = df.height(),
        column_count = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(df)
}

fn read_csv_dataset(path: &Path, row_limit: Option<usize>) -> Result<DataFrame> {
    let csv_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(row_limit)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)
}

fn read_parquet_dataset(path: &Path, row_limit: Option<usize>) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    match row_limit {
        Some(limit) if limit < df.height() => {
            debug!(row_limit = limit, "truncating parquet dataset");
            Ok(df.head(Some(limit)))
        }
        _ => Ok(df),
    }
}
