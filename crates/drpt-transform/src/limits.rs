//! Limits store: the scaling bounds in effect for a run.
//!
//! External limits seed the store before scaling and win over the live
//! dataset. Bounds missing from an external entry are filled from the data.
//! Every bound actually used is recorded so it can be persisted and reused
//! by a later release.

use std::collections::{BTreeMap, BTreeSet};

use drpt_model::{ColumnLimits, LimitsError, LimitsRecord, PartialLimits};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LimitsStore {
    external: BTreeMap<String, PartialLimits>,
    consumed: BTreeSet<String>,
    recorded: BTreeMap<String, ColumnLimits>,
}

impl LimitsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from an external limits record.
    pub fn from_record(record: LimitsRecord) -> Self {
        let mut store = Self::new();
        store.seed(record);
        store
    }

    /// Load external limits. A later seed overrides earlier entries.
    pub fn seed(&mut self, record: LimitsRecord) {
        self.external.extend(record);
    }

    /// Limits known for `column`: the recorded bounds if the column was
    /// already scaled, otherwise a complete external entry.
    pub fn get_limits(&self, column: &str) -> Option<ColumnLimits> {
        if let Some(limits) = self.recorded.get(column) {
            return Some(*limits);
        }
        let external = self.external.get(column)?;
        match (external.min, external.max) {
            (Some(min), Some(max)) => Some(ColumnLimits { min, max }),
            _ => None,
        }
    }

    /// Decide the bounds to scale `column` with, given the bounds observed in
    /// the live data (`None` when the column holds no values).
    ///
    /// Returns `Ok(None)` when no complete pair can be formed.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if the combined bounds are inverted.
    pub fn resolve(
        &mut self,
        column: &str,
        observed: Option<ColumnLimits>,
    ) -> Result<Option<ColumnLimits>, LimitsError> {
        let Some(external) = self.external.get(column).copied() else {
            return Ok(observed);
        };
        self.consumed.insert(column.to_string());
        let limits = match (external.min, external.max, observed) {
            (Some(min), Some(max), _) => Some(ColumnLimits::new(column, min, max)?),
            (_, _, Some(observed)) => Some(external.fill(column, observed)?),
            _ => None,
        };
        debug!(
            column,
            complete = external.is_complete(),
            usable = limits.is_some(),
            "using external limits"
        );
        Ok(limits)
    }

    /// Record the bounds used to scale `column`.
    pub fn record_limits(&mut self, column: &str, limits: ColumnLimits) {
        self.recorded.insert(column.to_string(), limits);
    }

    /// External entries that no scaled column consumed, in name order.
    pub fn unused_columns(&self) -> Vec<&str> {
        self.external
            .keys()
            .filter(|column| !self.consumed.contains(*column))
            .map(String::as_str)
            .collect()
    }

    /// Recorded limits ordered by column name.
    pub fn records(&self) -> impl Iterator<Item = (&str, &ColumnLimits)> {
        self.recorded
            .iter()
            .map(|(column, limits)| (column.as_str(), limits))
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }
}
