//! Tests for recipe parsing and validation.

use drpt_model::{Pattern, Recipe, RecipeError};

const WORKED_EXAMPLE: &str = r#"{
    "version": "1.0",
    "actions": {
        "drop": ["test2", "test[8-9]"],
        "rename": [
            {"test1": "test1_renamed"},
            {"test([3-4])": "test\\1_regex_renamed"}
        ],
        "obfuscate": ["test3"],
        "no-scaling": ["test4"]
    }
}"#;

#[test]
fn parses_worked_example() {
    let recipe = Recipe::from_json_str(WORKED_EXAMPLE).expect("valid recipe");
    assert_eq!(recipe.version, "1.0");

    let drop: Vec<&str> = recipe.actions.drop.iter().map(Pattern::as_str).collect();
    assert_eq!(drop, vec!["test2", "test[8-9]"]);

    assert_eq!(recipe.actions.rename.len(), 2);
    assert_eq!(recipe.actions.rename[0].pattern.as_str(), "test1");
    assert_eq!(recipe.actions.rename[0].target.as_str(), "test1_renamed");
    assert_eq!(recipe.actions.rename[1].pattern.as_str(), "test([3-4])");
    assert_eq!(
        recipe.actions.rename[1].target.as_str(),
        r"test\1_regex_renamed"
    );

    assert_eq!(recipe.actions.obfuscate.len(), 1);
    let no_scaling: Vec<&str> = recipe.actions.no_scaling.iter().map(Pattern::as_str).collect();
    assert_eq!(no_scaling, vec!["test4"]);
    assert!(!recipe.actions.drop_constant_columns);
}

#[test]
fn parses_drop_constant_flag() {
    let recipe = Recipe::from_json_str(
        r#"{"version": "2", "actions": {"drop-constant-columns": true}}"#,
    )
    .expect("valid recipe");
    assert!(recipe.actions.drop_constant_columns);
    assert!(!recipe.actions.is_empty());
}

#[test]
fn missing_version_is_rejected() {
    let error = Recipe::from_json_str(r#"{"actions": {}}"#).unwrap_err();
    assert!(matches!(error, RecipeError::Schema(_)));
}

#[test]
fn wrong_value_types_are_rejected() {
    for json in [
        r#"{"version": 1}"#,
        r#"{"version": "1", "actions": {"drop": "test1"}}"#,
        r#"{"version": "1", "actions": {"drop": [1]}}"#,
        r#"{"version": "1", "actions": {"rename": ["a"]}}"#,
        r#"{"version": "1", "actions": {"rename": [{"a": 1}]}}"#,
        r#"{"version": "1", "actions": {"drop-constant-columns": "yes"}}"#,
    ] {
        let error = Recipe::from_json_str(json).unwrap_err();
        assert!(matches!(error, RecipeError::Schema(_)), "accepted: {json}");
    }
}

#[test]
fn unknown_action_is_rejected() {
    let error = Recipe::from_json_str(r#"{"version": "1", "actions": {"no_scaling": ["a"]}}"#)
        .unwrap_err();
    assert!(error.to_string().contains("no_scaling"));
}

#[test]
fn invalid_pattern_names_the_pattern() {
    let error =
        Recipe::from_json_str(r#"{"version": "1", "actions": {"obfuscate": ["col[0-"]}}"#)
            .unwrap_err();
    match error {
        RecipeError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "col[0-"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rename_target_must_reference_existing_groups() {
    let error = Recipe::from_json_str(
        r#"{"version": "1", "actions": {"rename": [{"col": "new_\\1"}]}}"#,
    )
    .unwrap_err();
    assert!(matches!(error, RecipeError::InvalidTemplate { .. }));
}

#[test]
fn malformed_json_is_rejected() {
    let error = Recipe::from_json_str("{\"version\": ").unwrap_err();
    assert!(matches!(error, RecipeError::Schema(_)));
}
