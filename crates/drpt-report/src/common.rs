//! Output path helpers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Default dataset output path: `<stem>_release_<version><ext>` next to the
/// input file.
pub fn default_output_path(input: &Path, recipe_version: &str) -> PathBuf {
    let stem = file_stem(input);
    let extension = input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_release_{recipe_version}{extension}"))
}

/// Report path for a dataset output: `<stem>_report.csv` next to it.
pub fn report_path_for(output: &Path) -> PathBuf {
    output.with_file_name(format!("{}_report.csv", file_stem(output)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
