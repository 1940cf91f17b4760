//! Limits file loading.
//!
//! Two layouts are accepted, picked by extension:
//!
//! - `.csv`: one `column,min,max` row per column. An optional
//!   `column,min,max` header row is skipped and blank lines are ignored.
//!   An empty or `NaN` bound is left for the live dataset to fill.
//! - `.json`: an object mapping each column to `[min, max]` (or to
//!   `{"min": .., "max": ..}`), where a bound may be `null`.

use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use drpt_common::parse_f64;
use drpt_model::{LimitsRecord, PartialLimits};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

const HEADER: [&str; 3] = ["column", "min", "max"];

/// Read an external limits file.
///
/// # Errors
///
/// Returns an [`IngestError`] if the file is missing, has an unsupported
/// extension, contains a malformed row or an entry with `min > max`.
pub fn read_limits(path: &Path) -> Result<LimitsRecord> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    let record = match extension.as_str() {
        "csv" => read_limits_csv(path)?,
        "json" => read_limits_json(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                kind: "limits",
                extension,
                path: path.to_path_buf(),
            });
        }
    };
    info!(
        path = %path.display(),
        column_count = record.len(),
        "limits loaded"
    );
    Ok(record)
}

fn read_limits_csv(path: &Path) -> Result<LimitsRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut record = LimitsRecord::new();
    let mut first_row = true;
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let line = row.position().map_or(0, csv::Position::line);
        if row.iter().all(str::is_empty) {
            continue;
        }
        if std::mem::take(&mut first_row) && is_header(&row) {
            debug!("skipping limits header row");
            continue;
        }
        if row.len() != 3 {
            return Err(IngestError::LimitsParse {
                path: path.to_path_buf(),
                line,
                reason: format!("expected 3 fields (column,min,max), found {}", row.len()),
            });
        }
        let column = &row[0];
        if column.is_empty() {
            return Err(IngestError::LimitsParse {
                path: path.to_path_buf(),
                line,
                reason: "empty column name".to_string(),
            });
        }
        let parse = |raw: &str, bound: &str| {
            parse_bound(raw).map_err(|reason| IngestError::LimitsParse {
                path: path.to_path_buf(),
                line,
                reason: format!("{bound} for column '{column}': {reason}"),
            })
        };
        let limits = PartialLimits::new(parse(&row[1], "min")?, parse(&row[2], "max")?);
        insert(&mut record, path, column, limits)?;
    }
    Ok(record)
}

fn is_header(row: &csv::StringRecord) -> bool {
    row.len() == HEADER.len()
        && row
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.eq_ignore_ascii_case(name))
}

fn parse_bound(raw: &str) -> std::result::Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    match parse_f64(trimmed) {
        Some(value) if value.is_finite() => Ok(Some(value)),
        Some(value) => Err(format!("bound must be finite, found {value}")),
        None => Err(format!("'{trimmed}' is not a number")),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBounds {
    Pair([Option<f64>; 2]),
    Named {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl From<JsonBounds> for PartialLimits {
    fn from(bounds: JsonBounds) -> Self {
        match bounds {
            JsonBounds::Pair([min, max]) | JsonBounds::Named { min, max } => {
                PartialLimits::new(min, max)
            }
        }
    }
}

fn read_limits_json(path: &Path) -> Result<LimitsRecord> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: BTreeMap<String, JsonBounds> =
        serde_json::from_str(&text).map_err(|e| IngestError::LimitsParse {
            path: path.to_path_buf(),
            line: e.line() as u64,
            reason: e.to_string(),
        })?;
    let mut record = LimitsRecord::new();
    for (column, bounds) in entries {
        insert(&mut record, path, &column, bounds.into())?;
    }
    Ok(record)
}

fn insert(
    record: &mut LimitsRecord,
    path: &Path,
    column: &str,
    limits: PartialLimits,
) -> Result<()> {
    record
        .insert(column, limits)
        .map_err(|source| IngestError::Limits {
            path: path.to_path_buf(),
            source,
        })
}

fn csv_error(path: &Path, error: csv::Error) -> IngestError {
    IngestError::LimitsParse {
        path: path.to_path_buf(),
        line: error
            .position()
            .map_or(0, csv::Position::line),
        reason: error.to_string(),
    }
}
