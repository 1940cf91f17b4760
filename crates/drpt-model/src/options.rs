//! Run options for a release.

use serde::{Deserialize, Serialize};

/// Whether the scale step runs at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalingMode {
    /// Min/Max scale every eligible numeric column.
    #[default]
    Enabled,
    /// Skip the scale step for every column.
    Disabled,
}

/// Options controlling one release run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOptions {
    /// Default Min/Max scaling of numeric columns.
    pub scaling: ScalingMode,

    /// Produce the report without writing the transformed dataset.
    pub dry_run: bool,

    /// Read at most this many rows (preview runs).
    pub row_limit: Option<usize>,
}

impl ReleaseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn scaling_enabled(&self) -> bool {
        self.scaling == ScalingMode::Enabled
    }
}
