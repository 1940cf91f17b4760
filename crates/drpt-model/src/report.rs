//! Release report: the ordered audit trail of a run.

use std::fmt;

use serde::Serialize;

/// Kind of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActionKind {
    #[serde(rename = "recipe_version")]
    RecipeVersion,
    #[serde(rename = "drpt_version")]
    DrptVersion,
    #[serde(rename = "DROP")]
    Drop,
    #[serde(rename = "DROP_CONSTANT")]
    DropConstant,
    #[serde(rename = "OBFUSCATE")]
    Obfuscate,
    #[serde(rename = "SCALE_DEFAULT")]
    ScaleDefault,
    #[serde(rename = "RENAME")]
    Rename,
}

impl ActionKind {
    /// All kinds in the order actions are executed, metadata first.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::RecipeVersion,
        ActionKind::DrptVersion,
        ActionKind::DropConstant,
        ActionKind::Drop,
        ActionKind::Obfuscate,
        ActionKind::ScaleDefault,
        ActionKind::Rename,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::RecipeVersion => "recipe_version",
            ActionKind::DrptVersion => "drpt_version",
            ActionKind::Drop => "DROP",
            ActionKind::DropConstant => "DROP_CONSTANT",
            ActionKind::Obfuscate => "OBFUSCATE",
            ActionKind::ScaleDefault => "SCALE_DEFAULT",
            ActionKind::Rename => "RENAME",
        }
    }

    /// Metadata entries describe the run rather than a column.
    pub fn is_metadata(self) -> bool {
        matches!(self, ActionKind::RecipeVersion | ActionKind::DrptVersion)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub action_kind: ActionKind,
    pub column: String,
    pub details: String,
}

/// Append-only report under construction.
///
/// The two metadata entries are written on creation, so every report starts
/// with the recipe version followed by the tool version.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    entries: Vec<ReportEntry>,
}

impl ReportBuilder {
    pub fn new(recipe_version: &str, tool_version: &str) -> Self {
        let mut builder = Self {
            entries: Vec::new(),
        };
        builder.record(ActionKind::RecipeVersion, "", recipe_version);
        builder.record(ActionKind::DrptVersion, "", tool_version);
        builder
    }

    /// Append an entry with the next sequence index.
    pub fn record(
        &mut self,
        action_kind: ActionKind,
        column: impl Into<String>,
        details: impl Into<String>,
    ) {
        let index = self.entries.len();
        self.entries.push(ReportEntry {
            index,
            action_kind,
            column: column.into(),
            details: details.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finalize(self) -> Report {
        Report {
            entries: self.entries,
        }
    }
}

/// A finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Entries for column actions, metadata excluded.
    pub fn action_entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.action_kind.is_metadata())
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: ActionKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action_kind == kind)
            .count()
    }

    /// Details of the first entry of `kind` for `column`.
    pub fn details_for(&self, kind: ActionKind, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.action_kind == kind && entry.column == column)
            .map(|entry| entry.details.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
