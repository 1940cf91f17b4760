//! Dataset output in the format named by the path.

use std::fs::File;
use std::path::Path;

use drpt_ingest::DatasetFormat;
use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{ReportError, Result};

/// Write `df` to `path` as CSV (with header) or Parquet.
///
/// Returns the format that was written.
pub fn write_dataset(df: &mut DataFrame, path: &Path) -> Result<DatasetFormat> {
    let format = DatasetFormat::from_path(path)?;
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = match format {
        DatasetFormat::Csv => CsvWriter::new(file).include_header(true).finish(df),
        DatasetFormat::Parquet => ParquetWriter::new(file).finish(df).map(|_| ()),
    };
    written.map_err(|e| ReportError::Dataset {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(
        path = %path.display(),
        format = format.extension(),
        row_count = df.height(),
        column_count = df.width(),
        "dataset written"
    );
    Ok(format)
}
