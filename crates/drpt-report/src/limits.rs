//! Persisted limits output.

use std::path::Path;

use drpt_common::format_numeric;
use drpt_model::ColumnLimits;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{ReportError, Result};

/// Write limits as CSV `column,min,max`, header included, in the order given.
///
/// The file can be passed back as a limits file to reproduce the scaling.
pub fn write_limits<'a, I>(limits: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = (&'a str, &'a ColumnLimits)>,
{
    ensure_parent_dir(path)?;
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["column", "min", "max"])
        .map_err(csv_error)?;
    let mut count = 0;
    for (column, bounds) in limits {
        writer
            .write_record([
                column,
                format_numeric(bounds.min).as_str(),
                format_numeric(bounds.max).as_str(),
            ])
            .map_err(csv_error)?;
        count += 1;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), columns = count, "limits written");
    Ok(count)
}
