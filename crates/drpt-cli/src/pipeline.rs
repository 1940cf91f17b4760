//! Staged release pipeline: load, transform, write.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use drpt_ingest::{load_recipe, read_dataset, read_limits};
use drpt_model::{Recipe, ReleaseOptions};
use drpt_report::{
    default_output_path, report_path_for, write_dataset, write_limits, write_report,
};
use drpt_transform::{LimitsStore, ReleaseEngine, ReleaseOutcome};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::types::ReleaseResult;

/// Inputs and flags of one release run.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub recipe: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub limits: Option<PathBuf>,
    pub save_limits: Option<PathBuf>,
    pub options: ReleaseOptions,
}

impl ReleaseRequest {
    pub fn new(recipe: impl Into<PathBuf>, input: impl Into<PathBuf>) -> Self {
        Self {
            recipe: recipe.into(),
            input: input.into(),
            output: None,
            limits: None,
            save_limits: None,
            options: ReleaseOptions::default(),
        }
    }
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Validated inputs ready for the engine.
#[derive(Debug)]
pub struct LoadedInputs {
    pub recipe: Recipe,
    pub data: DataFrame,
    pub limits: LimitsStore,
}

/// Load the recipe first so an invalid recipe fails before the dataset is
/// read, then the dataset and the optional limits file.
pub fn load(request: &ReleaseRequest) -> Result<LoadedInputs> {
    let recipe = load_recipe(&request.recipe).context("load recipe")?;
    let data = read_dataset(&request.input, request.options.row_limit).context("read dataset")?;
    let limits = match &request.limits {
        Some(path) => LimitsStore::from_record(read_limits(path).context("read limits")?),
        None => LimitsStore::new(),
    };
    Ok(LoadedInputs {
        recipe,
        data,
        limits,
    })
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

/// Run the recipe over the loaded dataset.
pub fn transform(
    recipe: &Recipe,
    data: DataFrame,
    limits: &mut LimitsStore,
    options: &ReleaseOptions,
) -> Result<ReleaseOutcome> {
    ReleaseEngine::new(recipe, options.clone())
        .run(data, limits)
        .context("apply recipe")
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Paths the output stage writes to.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dataset: PathBuf,
    pub report: PathBuf,
    pub limits: Option<PathBuf>,
}

impl OutputPaths {
    pub fn for_request(request: &ReleaseRequest, recipe_version: &str) -> Self {
        let dataset = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input, recipe_version));
        let report = report_path_for(&dataset);
        Self {
            dataset,
            report,
            limits: request.save_limits.clone(),
        }
    }
}

/// Write the dataset (unless dry run), the report and the requested limits.
///
/// Returns whether the dataset was written.
pub fn output(
    outcome: &mut ReleaseOutcome,
    limits: &LimitsStore,
    paths: &OutputPaths,
    options: &ReleaseOptions,
) -> Result<bool> {
    let dataset_written = if options.dry_run {
        info!(path = %paths.dataset.display(), "dry run, dataset not written");
        false
    } else {
        write_dataset(&mut outcome.data, &paths.dataset).context("write dataset")?;
        true
    };
    write_report(&outcome.report, &paths.report).context("write report")?;
    if let Some(path) = &paths.limits {
        write_limits(limits.records(), path).context("write limits")?;
    }
    Ok(dataset_written)
}

/// Run all stages for one request.
pub fn run_release(request: &ReleaseRequest) -> Result<ReleaseResult> {
    let span = info_span!("release", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let LoadedInputs {
        recipe,
        data,
        mut limits,
    } = load(request)?;
    let paths = OutputPaths::for_request(request, &recipe.version);
    check_distinct_paths(&request.input, &paths)?;

    let mut outcome = transform(&recipe, data, &mut limits, &request.options)?;
    let unused_limits: Vec<String> = if request.options.scaling_enabled() {
        limits
            .unused_columns()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };
    let dataset_written = output(&mut outcome, &limits, &paths, &request.options)?;

    info!(
        duration_ms = start.elapsed().as_millis(),
        report_entries = outcome.report.len(),
        "release finished"
    );
    Ok(ReleaseResult {
        recipe_version: recipe.version,
        input: request.input.clone(),
        output: paths.dataset,
        dataset_written,
        report_path: paths.report,
        limits_path: paths.limits,
        row_count: outcome.data.height(),
        column_count: outcome.data.width(),
        report: outcome.report,
        unused_limits,
    })
}

fn check_distinct_paths(input: &Path, paths: &OutputPaths) -> Result<()> {
    let input = resolved(input);
    let outputs = [Some(&paths.dataset), Some(&paths.report), paths.limits.as_ref()];
    for path in outputs.into_iter().flatten() {
        if resolved(path) == input {
            anyhow::bail!("output {} would overwrite the input dataset", path.display());
        }
    }
    Ok(())
}

/// Resolve `path` through its parent directory, which may be all that exists
/// for an output that has not been written yet.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}
