//! Report CSV output.

use std::io::Write;
use std::path::Path;

use drpt_model::Report;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{ReportError, Result};

/// Write `report` as CSV with the header `index,action_kind,column,details`.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_report_to(report, file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = report.len(), "report written");
    Ok(())
}

/// Serialize `report` as CSV into any writer.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] if a row cannot be written.
pub fn write_report_to<W: Write>(report: &Report, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in report.entries() {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render `report` as a CSV string.
pub fn report_to_csv_string(report: &Report) -> csv::Result<String> {
    let mut buffer = Vec::new();
    write_report_to(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
