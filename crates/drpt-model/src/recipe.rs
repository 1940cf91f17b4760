//! Release recipes.
//!
//! A recipe is read as a loosely typed [`RecipeDocument`] and immediately
//! validated into a [`Recipe`] whose patterns and templates are compiled.
//! Nothing downstream ever sees the raw document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{RecipeError, Result};
use crate::pattern::{Pattern, TargetTemplate};

/// The recipe document as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    pub version: String,
    #[serde(default)]
    pub actions: ActionsDocument,
}

/// The `actions` object of a recipe document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ActionsDocument {
    pub drop: Vec<String>,
    pub rename: Vec<BTreeMap<String, String>>,
    pub obfuscate: Vec<String>,
    pub no_scaling: Vec<String>,
    pub drop_constant_columns: bool,
}

/// One rename rule: every column matching `pattern` is renamed to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub pattern: Pattern,
    pub target: TargetTemplate,
}

/// Validated recipe actions.
///
/// `drop`, `obfuscate` and `no_scaling` hold distinct patterns in recipe
/// order; `rename` keeps every rule in recipe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeActions {
    pub drop: Vec<Pattern>,
    pub rename: Vec<RenameRule>,
    pub obfuscate: Vec<Pattern>,
    pub no_scaling: Vec<Pattern>,
    pub drop_constant_columns: bool,
}

impl RecipeActions {
    /// Returns true if the recipe asks for no column action at all.
    pub fn is_empty(&self) -> bool {
        self.drop.is_empty()
            && self.rename.is_empty()
            && self.obfuscate.is_empty()
            && self.no_scaling.is_empty()
            && !self.drop_constant_columns
    }
}

/// A validated, immutable release recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub version: String,
    pub actions: RecipeActions,
}

impl Recipe {
    /// Parse and validate a recipe from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`RecipeError`] if the text is not a recipe document or if
    /// any pattern or rename target is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RecipeDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validate a parsed recipe document.
    ///
    /// # Errors
    ///
    /// Returns a [`RecipeError`] if any pattern or rename target is invalid.
    pub fn from_document(document: RecipeDocument) -> Result<Self> {
        let RecipeDocument { version, actions } = document;

        let mut rename = Vec::with_capacity(actions.rename.len());
        for (index, entry) in actions.rename.into_iter().enumerate() {
            if entry.len() != 1 {
                return Err(RecipeError::RenameEntryShape {
                    index,
                    count: entry.len(),
                });
            }
            for (source, target) in entry {
                let pattern = Pattern::new(source)?;
                let target = TargetTemplate::compile(target, &pattern)?;
                rename.push(RenameRule { pattern, target });
            }
        }

        Ok(Self {
            version,
            actions: RecipeActions {
                drop: compile_patterns(actions.drop)?,
                rename,
                obfuscate: compile_patterns(actions.obfuscate)?,
                no_scaling: compile_patterns(actions.no_scaling)?,
                drop_constant_columns: actions.drop_constant_columns,
            },
        })
    }
}

fn compile_patterns(sources: Vec<String>) -> Result<Vec<Pattern>> {
    let mut seen = BTreeSet::new();
    let mut patterns = Vec::with_capacity(sources.len());
    for source in sources {
        if !seen.insert(source.clone()) {
            continue;
        }
        patterns.push(Pattern::new(source)?);
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_actions_default_to_empty() {
        let recipe = Recipe::from_json_str(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(recipe.version, "1.0");
        assert!(recipe.actions.is_empty());
        assert!(!recipe.actions.drop_constant_columns);
    }

    #[test]
    fn duplicate_patterns_are_collapsed() {
        let recipe = Recipe::from_json_str(
            r#"{"version": "1", "actions": {"drop": ["a", "b", "a"]}}"#,
        )
        .unwrap();
        let drop: Vec<&str> = recipe.actions.drop.iter().map(Pattern::as_str).collect();
        assert_eq!(drop, vec!["a", "b"]);
    }

    #[test]
    fn rename_entry_with_two_pairs_is_rejected() {
        let error = Recipe::from_json_str(
            r#"{"version": "1", "actions": {"rename": [{"a": "b", "c": "d"}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            RecipeError::RenameEntryShape { index: 0, count: 2 }
        ));
    }
}
