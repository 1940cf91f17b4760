//! Column action executors.
//!
//! Each executor resolves its columns against the frame as it stands, applies
//! the action to every matched column and appends one report entry per
//! column. Obfuscation and scaling compute every replacement column before
//! writing any of them back.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use drpt_common::{any_to_string, column_names, format_bounds, is_numeric_dtype};
use drpt_model::{ActionKind, ColumnLimits, Pattern, RenameRule, ReportBuilder};
use polars::prelude::{ChunkAgg, Column, DataFrame, DataType, Float64Chunked, IntoColumn};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::limits::LimitsStore;
use crate::resolver::{matches_any, resolve};

/// Drop every column holding exactly one distinct non-null value.
///
/// Returns the dropped column names in frame order.
pub fn drop_constant_columns(df: &mut DataFrame, report: &mut ReportBuilder) -> Result<Vec<String>> {
    let mut constant = Vec::new();
    for column in df.get_columns() {
        if column.drop_nulls().n_unique()? == 1 {
            constant.push(column.name().to_string());
        }
    }
    for name in &constant {
        df.drop_in_place(name)?;
        debug!(column = %name, "dropped constant column");
        report.record(ActionKind::DropConstant, name.as_str(), "");
    }
    info!(dropped = constant.len(), "drop-constant step complete");
    Ok(constant)
}

/// Drop every column matched by any of `patterns`.
///
/// Patterns are applied in order; a column removed by an earlier pattern is
/// no longer there for later ones.
pub fn drop_columns(
    df: &mut DataFrame,
    patterns: &[Pattern],
    report: &mut ReportBuilder,
) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for pattern in patterns {
        let columns = column_names(df);
        for matched in resolve(pattern, &columns) {
            df.drop_in_place(&matched.column)?;
            debug!(column = %matched.column, pattern = %pattern, "dropped column");
            report.record(ActionKind::Drop, matched.column.as_str(), "");
            dropped.push(matched.column);
        }
    }
    info!(dropped = dropped.len(), "drop step complete");
    Ok(dropped)
}

/// Replace every column matched by `patterns` with integer codes.
///
/// Codes start at 0 and follow the order in which values first appear. Nulls
/// stay null. A column matched by several patterns is coded once.
pub fn obfuscate_columns(
    df: &mut DataFrame,
    patterns: &[Pattern],
    report: &mut ReportBuilder,
) -> Result<BTreeSet<String>> {
    let columns = column_names(df);
    let mut selected = Vec::new();
    let mut seen = BTreeSet::new();
    for pattern in patterns {
        for matched in resolve(pattern, &columns) {
            if seen.insert(matched.column.clone()) {
                selected.push(matched.column);
            }
        }
    }

    let mut coded = Vec::with_capacity(selected.len());
    for name in &selected {
        let (column, distinct) = encode_first_appearance(df.column(name)?)?;
        debug!(column = %name, distinct, "obfuscated column");
        coded.push(column);
    }
    for (name, column) in selected.iter().zip(coded) {
        df.with_column(column)?;
        report.record(ActionKind::Obfuscate, name.as_str(), "");
    }
    info!(obfuscated = selected.len(), "obfuscate step complete");
    Ok(seen)
}

fn encode_first_appearance(column: &Column) -> Result<(Column, usize)> {
    let mut lookup: HashMap<String, i64> = HashMap::new();
    let mut codes = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx)?;
        if value.is_null() {
            codes.push(None);
            continue;
        }
        let next = lookup.len() as i64;
        codes.push(Some(*lookup.entry(any_to_string(value)).or_insert(next)));
    }
    Ok((Column::new(column.name().clone(), codes), lookup.len()))
}

/// Min/Max scale every numeric column not excluded.
///
/// A column is skipped when it is not numeric, when it is in `obfuscated`,
/// when a `no_scaling` pattern matches it, or when no bounds can be formed
/// because it holds no values or its observed bounds are NaN or infinite. The bounds used are recorded in `limits` and
/// reported as `[min,max]`.
pub fn scale_columns(
    df: &mut DataFrame,
    no_scaling: &[Pattern],
    obfuscated: &BTreeSet<String>,
    limits: &mut LimitsStore,
    report: &mut ReportBuilder,
) -> Result<Vec<String>> {
    let mut scaled = Vec::new();
    for column in df.get_columns() {
        let name = column.name().as_str();
        if !is_numeric_dtype(column.dtype()) {
            debug!(column = name, dtype = %column.dtype(), "not numeric, not scaled");
            continue;
        }
        if obfuscated.contains(name) || matches_any(no_scaling, name) {
            debug!(column = name, "excluded from scaling");
            continue;
        }
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let observed = match (values.min(), values.max()) {
            (Some(min), Some(max)) if min.is_finite() && max.is_finite() => {
                Some(ColumnLimits::new(name, min, max)?)
            }
            (Some(_), Some(_)) => {
                debug!(column = name, "observed bounds not finite");
                None
            }
            _ => None,
        };
        let Some(bounds) = limits.resolve(name, observed)? else {
            debug!(column = name, "no values to scale");
            continue;
        };
        let result: Float64Chunked = values
            .into_iter()
            .map(|value| value.map(|v| bounds.scale(v)))
            .collect();
        scaled.push((
            name.to_string(),
            bounds,
            result.with_name(column.name().clone()).into_column(),
        ));
    }

    let mut names = Vec::with_capacity(scaled.len());
    for (name, bounds, column) in scaled {
        df.with_column(column)?;
        limits.record_limits(&name, bounds);
        debug!(
            column = %name,
            min = bounds.min,
            max = bounds.max,
            degenerate = bounds.is_degenerate(),
            "scaled column"
        );
        report.record(
            ActionKind::ScaleDefault,
            name.as_str(),
            format_bounds(bounds.min, bounds.max),
        );
        names.push(name);
    }
    info!(scaled = names.len(), "scale step complete");
    Ok(names)
}

/// Apply rename rules in recipe order.
///
/// Each rule sees the column names left by the rules before it. Within a
/// rule all matched columns are renamed together; two sources rendering the
/// same target, or a target naming a column that keeps its name, is a
/// [`TransformError::ColumnConflict`].
///
/// Returns the number of columns renamed.
pub fn rename_columns(
    df: &mut DataFrame,
    rules: &[RenameRule],
    report: &mut ReportBuilder,
) -> Result<usize> {
    let mut renamed = 0;
    for rule in rules {
        let columns = column_names(df);
        let renames: Vec<(String, String)> = resolve(&rule.pattern, &columns)
            .into_iter()
            .map(|matched| {
                let target = rule.target.render(&matched.groups);
                (matched.column, target)
            })
            .collect();
        if renames.is_empty() {
            continue;
        }
        check_conflicts(&columns, &renames)?;

        let mapping: HashMap<&str, &str> = renames
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
            .collect();
        let relabelled: Vec<Column> = df
            .get_columns()
            .iter()
            .map(|column| match mapping.get(column.name().as_str()) {
                Some(target) => column.clone().with_name((*target).into()),
                None => column.clone(),
            })
            .collect();
        *df = DataFrame::new(relabelled)?;

        for (source, target) in renames {
            debug!(column = %source, target = %target, pattern = %rule.pattern, "renamed column");
            report.record(ActionKind::Rename, source, target);
            renamed += 1;
        }
    }
    info!(renamed, "rename step complete");
    Ok(renamed)
}

fn check_conflicts(columns: &[String], renames: &[(String, String)]) -> Result<()> {
    let sources: BTreeSet<&str> = renames.iter().map(|(source, _)| source.as_str()).collect();
    let mut by_target: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (source, target) in renames {
        by_target.entry(target).or_default().push(source);
    }
    for column in columns {
        if !sources.contains(column.as_str())
            && let Some(claimants) = by_target.get_mut(column.as_str())
        {
            claimants.insert(0, column);
        }
    }
    match by_target.into_iter().find(|(_, claimants)| claimants.len() > 1) {
        Some((target, claimants)) => Err(TransformError::ColumnConflict {
            target: target.to_string(),
            sources: claimants.into_iter().map(str::to_string).collect(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drpt_model::TargetTemplate;
    use polars::df;

    fn builder() -> ReportBuilder {
        ReportBuilder::new("1", "0.0.0")
    }

    fn rule(pattern: &str, target: &str) -> RenameRule {
        let pattern = Pattern::new(pattern).unwrap();
        let target = TargetTemplate::compile(target, &pattern).unwrap();
        RenameRule { pattern, target }
    }

    #[test]
    fn drop_constant_ignores_nulls() {
        let mut frame = df!(
            "same" => [Some(5i64), None, Some(5)],
            "varied" => [1i64, 2, 3],
            "empty" => [None::<i64>, None, None],
        )
        .unwrap();
        let mut report = builder();
        let dropped = drop_constant_columns(&mut frame, &mut report).unwrap();
        assert_eq!(dropped, vec!["same"]);
        assert_eq!(column_names(&frame), vec!["varied", "empty"]);
    }

    #[test]
    fn obfuscation_codes_follow_first_appearance() {
        let mut frame = df!("c" => [Some("b"), Some("a"), None, Some("b"), Some("c")]).unwrap();
        let mut report = builder();
        let patterns = vec![Pattern::new("c").unwrap(), Pattern::new("[a-c]").unwrap()];
        obfuscate_columns(&mut frame, &patterns, &mut report).unwrap();
        let codes: Vec<Option<i64>> = frame.column("c").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(codes, vec![Some(0), Some(1), None, Some(0), Some(2)]);
        assert_eq!(report.finalize().count(ActionKind::Obfuscate), 1);
    }

    #[test]
    fn rename_applies_to_every_match_of_a_rule() {
        let mut frame = df!("a" => [1i64], "b" => [2i64]).unwrap();
        let mut report = builder();
        let rules = vec![rule("(a|b)", r"\1_x")];
        assert_eq!(rename_columns(&mut frame, &rules, &mut report).unwrap(), 2);
        assert_eq!(column_names(&frame), vec!["a_x", "b_x"]);
    }

    #[test]
    fn rename_onto_existing_column_is_a_conflict() {
        let mut frame = df!("a" => [1i64], "b" => [2i64]).unwrap();
        let mut report = builder();
        let error = rename_columns(&mut frame, &[rule("a", "b")], &mut report).unwrap_err();
        match error {
            TransformError::ColumnConflict { target, sources } => {
                assert_eq!(target, "b");
                assert_eq!(sources, vec!["b", "a"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(column_names(&frame), vec!["a", "b"]);
    }

    #[test]
    fn rename_to_same_name_is_not_a_conflict() {
        let mut frame = df!("a" => [1i64]).unwrap();
        let mut report = builder();
        rename_columns(&mut frame, &[rule("a", "a")], &mut report).unwrap();
        assert_eq!(column_names(&frame), vec!["a"]);
    }
}
