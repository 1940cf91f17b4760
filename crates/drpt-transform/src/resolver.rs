//! Pattern resolution against the current column list.

use drpt_model::Pattern;

/// One column matched by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub column: String,
    /// Capture groups of the match; index 0 is the whole column name.
    pub groups: Vec<Option<String>>,
}

/// Match `pattern` against `columns`, returning matches in column order.
///
/// A pattern that matches nothing yields an empty list.
pub fn resolve<S: AsRef<str>>(pattern: &Pattern, columns: &[S]) -> Vec<PatternMatch> {
    columns
        .iter()
        .filter_map(|column| {
            let column = column.as_ref();
            let captures = pattern.captures(column)?;
            let groups = captures
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect();
            Some(PatternMatch {
                column: column.to_string(),
                groups,
            })
        })
        .collect()
}

/// Returns true if any of `patterns` matches `column`.
pub fn matches_any(patterns: &[Pattern], column: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_in_column_order_with_groups() {
        let pattern = Pattern::new("test([3-4])").unwrap();
        let columns = ["test4", "test1", "test3", "test34"];
        let matches = resolve(&pattern, &columns);
        let names: Vec<&str> = matches.iter().map(|m| m.column.as_str()).collect();
        assert_eq!(names, vec!["test4", "test3"]);
        assert_eq!(
            matches[1].groups,
            vec![Some("test3".to_string()), Some("3".to_string())]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let pattern = Pattern::new("absent").unwrap();
        assert!(resolve(&pattern, &["a", "b"]).is_empty());
    }

    #[test]
    fn unmatched_optional_group_is_none() {
        let pattern = Pattern::new("a(b)?").unwrap();
        let matches = resolve(&pattern, &["a"]);
        assert_eq!(matches[0].groups, vec![Some("a".to_string()), None]);
    }

    #[test]
    fn matches_any_checks_every_pattern() {
        let patterns = vec![Pattern::new("x").unwrap(), Pattern::new("id_.*").unwrap()];
        assert!(matches_any(&patterns, "id_7"));
        assert!(!matches_any(&patterns, "y"));
    }
}
