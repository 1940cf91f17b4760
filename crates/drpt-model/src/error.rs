//! Error types for recipe and limits validation.

use thiserror::Error;

/// A recipe that cannot be executed.
///
/// Every variant is fatal and is raised before any action touches the dataset.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The document is not JSON or does not have the recipe shape.
    #[error("recipe does not match the recipe schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// A column pattern is not a valid regular expression.
    #[error("invalid column pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A rename target cannot be rendered from its pattern.
    #[error("invalid rename target '{template}' for pattern '{pattern}': {reason}")]
    InvalidTemplate {
        pattern: String,
        template: String,
        reason: String,
    },

    /// A rename entry is not a single `pattern: target` pair.
    #[error("rename entry {index} must map exactly one pattern to a target, found {count}")]
    RenameEntryShape { index: usize, count: usize },
}

/// Limits that violate `min <= max`.
#[derive(Debug, Error, PartialEq)]
pub enum LimitsError {
    #[error("limits for column '{column}' are inverted: min {min} > max {max}")]
    Inverted { column: String, min: f64, max: f64 },

    #[error("limits for column '{column}' are not finite: min {min}, max {max}")]
    NotFinite { column: String, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, RecipeError>;
