//! Column scaling limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LimitsError;

/// The `(min, max)` bounds used to Min/Max scale one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnLimits {
    pub min: f64,
    pub max: f64,
}

impl ColumnLimits {
    /// Create limits for `column`, enforcing finite bounds and `min <= max`.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] naming the column when the invariant fails.
    pub fn new(column: &str, min: f64, max: f64) -> Result<Self, LimitsError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(LimitsError::NotFinite {
                column: column.to_string(),
                min,
                max,
            });
        }
        if min > max {
            return Err(LimitsError::Inverted {
                column: column.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Returns true when `min == max`.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Min/Max scale one value; degenerate limits map every value to `0.0`.
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

/// Bounds from an external limits source, either of which may be missing.
///
/// A missing bound is taken from the live dataset at scale time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PartialLimits {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Both bounds are present.
    pub fn is_complete(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Fill missing bounds from `observed` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if the combined bounds are inverted.
    pub fn fill(&self, column: &str, observed: ColumnLimits) -> Result<ColumnLimits, LimitsError> {
        ColumnLimits::new(
            column,
            self.min.unwrap_or(observed.min),
            self.max.unwrap_or(observed.max),
        )
    }

    /// Validate a complete pair; partial pairs pass unchecked.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if both bounds are present and inverted.
    pub fn validate(&self, column: &str) -> Result<(), LimitsError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            ColumnLimits::new(column, min, max)?;
        }
        Ok(())
    }
}

impl From<ColumnLimits> for PartialLimits {
    fn from(limits: ColumnLimits) -> Self {
        Self {
            min: Some(limits.min),
            max: Some(limits.max),
        }
    }
}

/// Externally supplied limits keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitsRecord {
    entries: BTreeMap<String, PartialLimits>,
}

impl LimitsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert limits for a column; a later entry for the same column wins.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if both bounds are present and inverted.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        limits: PartialLimits,
    ) -> Result<(), LimitsError> {
        let column = column.into();
        limits.validate(&column)?;
        self.entries.insert(column, limits);
        Ok(())
    }

    pub fn get(&self, column: &str) -> Option<&PartialLimits> {
        self.entries.get(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by column name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PartialLimits)> {
        self.entries.iter().map(|(column, limits)| (column.as_str(), limits))
    }
}

impl IntoIterator for LimitsRecord {
    type Item = (String, PartialLimits);
    type IntoIter = std::collections::btree_map::IntoIter<String, PartialLimits>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
