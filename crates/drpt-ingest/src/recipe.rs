//! Recipe file loading.

use std::path::Path;

use drpt_model::Recipe;
use tracing::info;

use crate::error::{IngestError, Result};

/// Read and validate a JSON recipe file.
///
/// # Errors
///
/// Returns [`IngestError::FileNotFound`] or [`IngestError::FileRead`] for I/O
/// failures and [`IngestError::Recipe`] when the recipe fails validation.
pub fn load_recipe(path: &Path) -> Result<Recipe> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let recipe = Recipe::from_json_str(&text).map_err(|source| IngestError::Recipe {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        recipe_version = %recipe.version,
        drop_patterns = recipe.actions.drop.len(),
        rename_rules = recipe.actions.rename.len(),
        obfuscate_patterns = recipe.actions.obfuscate.len(),
        no_scaling_patterns = recipe.actions.no_scaling.len(),
        drop_constant_columns = recipe.actions.drop_constant_columns,
        "recipe loaded"
    );
    Ok(recipe)
}
