use std::path::PathBuf;

use drpt_model::{ActionKind, Report};

/// Everything a release run produced.
#[derive(Debug)]
pub struct ReleaseResult {
    pub recipe_version: String,
    pub input: PathBuf,
    /// Dataset output path; nothing is written there on a dry run.
    pub output: PathBuf,
    pub dataset_written: bool,
    pub report_path: PathBuf,
    pub limits_path: Option<PathBuf>,
    pub report: Report,
    pub row_count: usize,
    pub column_count: usize,
    /// External limits entries that matched no scaled column.
    pub unused_limits: Vec<String>,
}

impl ReleaseResult {
    /// Number of report entries per column action, in execution order.
    pub fn action_counts(&self) -> Vec<(ActionKind, usize)> {
        ActionKind::ALL
            .iter()
            .filter(|kind| !kind.is_metadata())
            .map(|kind| (*kind, self.report.count(*kind)))
            .collect()
    }
}
