//! Data model for data release preparation.
//!
//! - **recipe**: the validated recipe and its raw JSON document
//! - **pattern**: fullmatch column patterns and rename target templates
//! - **limits**: per-column scaling bounds
//! - **report**: report entries and the append-only report builder
//! - **options**: run options built from the command line

pub mod error;
pub mod limits;
pub mod options;
pub mod pattern;
pub mod recipe;
pub mod report;

pub use error::{LimitsError, RecipeError, Result};
pub use limits::{ColumnLimits, LimitsRecord, PartialLimits};
pub use options::{ReleaseOptions, ScalingMode};
pub use pattern::{Pattern, TargetTemplate};
pub use recipe::{ActionsDocument, Recipe, RecipeActions, RecipeDocument, RenameRule};
pub use report::{ActionKind, Report, ReportBuilder, ReportEntry};
