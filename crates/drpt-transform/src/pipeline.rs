//! Release engine: runs the recipe's actions in their fixed order.
//!
//! The engine takes ownership of the dataset, applies
//!
//! 1. drop-constant (when enabled)
//! 2. drop
//! 3. obfuscate
//! 4. scale (unless disabled)
//! 5. rename
//!
//! and hands the transformed dataset back together with the finished report.
//! It performs no I/O.

use std::time::Instant;

use drpt_model::{Recipe, ReleaseOptions, Report, ReportBuilder};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::executors::{
    drop_columns, drop_constant_columns, obfuscate_columns, rename_columns, scale_columns,
};
use crate::limits::LimitsStore;

/// Transformed dataset and the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    pub data: DataFrame,
    pub report: Report,
}

/// Executes one recipe against datasets.
#[derive(Debug, Clone)]
pub struct ReleaseEngine<'a> {
    recipe: &'a Recipe,
    options: ReleaseOptions,
    tool_version: String,
}

impl<'a> ReleaseEngine<'a> {
    pub fn new(recipe: &'a Recipe, options: ReleaseOptions) -> Self {
        Self {
            recipe,
            options,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the tool version written to the report.
    pub fn with_tool_version(mut self, tool_version: impl Into<String>) -> Self {
        self.tool_version = tool_version.into();
        self
    }

    /// Run every action on `data`, consulting and updating `limits`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::TransformError`] on a rename conflict, on unusable
    /// scaling limits or on a failed DataFrame operation. No report is
    /// produced in that case.
    pub fn run(&self, mut data: DataFrame, limits: &mut LimitsStore) -> Result<ReleaseOutcome> {
        let span = info_span!("release", recipe_version = %self.recipe.version);
        let _guard = span.enter();
        let start = Instant::now();
        let actions = &self.recipe.actions;
        let mut report = ReportBuilder::new(&self.recipe.version, &self.tool_version);

        if actions.drop_constant_columns {
            drop_constant_columns(&mut data, &mut report)?;
        } else {
            debug!("drop-constant step disabled");
        }
        drop_columns(&mut data, &actions.drop, &mut report)?;
        let obfuscated = obfuscate_columns(&mut data, &actions.obfuscate, &mut report)?;
        if self.options.scaling_enabled() {
            scale_columns(
                &mut data,
                &actions.no_scaling,
                &obfuscated,
                limits,
                &mut report,
            )?;
            for column in limits.unused_columns() {
                debug!(column, "external limits entry not used");
            }
        } else {
            debug!("scale step disabled");
        }
        rename_columns(&mut data, &actions.rename, &mut report)?;

        let report = report.finalize();
        info!(
            row_count = data.height(),
            column_count = data.width(),
            report_entries = report.len(),
            duration_ms = start.elapsed().as_millis(),
            "release complete"
        );
        Ok(ReleaseOutcome { data, report })
    }
}
