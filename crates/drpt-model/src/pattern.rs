//! Column name patterns and rename target templates.
//!
//! A [`Pattern`] is compiled once when the recipe is loaded. Literal column
//! names are simply regexes without metacharacters, so a single matching path
//! covers both. Matching always uses fullmatch semantics: the pattern is
//! anchored at both ends of the column name.

use std::fmt;

use regex::{Captures, Regex};

use crate::error::{RecipeError, Result};

/// A compiled column name pattern with fullmatch semantics.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern string as written in the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::InvalidPattern`] if the string is not a valid
    /// regular expression.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let anchored = format!("^(?:{source})$");
        let regex = Regex::new(&anchored).map_err(|error| RecipeError::InvalidPattern {
            pattern: source.clone(),
            message: error.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the recipe.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches the whole column name.
    pub fn is_match(&self, column: &str) -> bool {
        self.regex.is_match(column)
    }

    /// Capture groups of a full match against `column`, if any.
    pub fn captures<'h>(&self, column: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(column)
    }

    /// Number of explicit capture groups (group 0 excluded).
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Index of a named capture group.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.regex
            .capture_names()
            .position(|candidate| candidate == Some(name))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
}

/// A rename target with capture-group references bound to a pattern.
///
/// Supported references follow the usual regex substitution syntax:
/// `\1` to `\99`, `\g<1>` and `\g<name>`. `\\` produces a backslash and
/// `\n`, `\r`, `\t` produce the matching control characters. An optional
/// group that did not take part in the match renders as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl TargetTemplate {
    /// Parse `source` and bind its group references to `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::InvalidTemplate`] for malformed escapes and for
    /// references to groups the pattern does not define.
    pub fn compile(source: impl Into<String>, pattern: &Pattern) -> Result<Self> {
        let source = source.into();
        let segments = parse_segments(&source, pattern).map_err(|reason| {
            RecipeError::InvalidTemplate {
                pattern: pattern.as_str().to_string(),
                template: source.clone(),
                reason,
            }
        })?;
        Ok(Self { source, segments })
    }

    /// The template as written in the recipe.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the target name from the capture groups of a match.
    ///
    /// `groups[0]` is the whole match; missing or unmatched groups render as
    /// the empty string.
    pub fn render(&self, groups: &[Option<String>]) -> String {
        let mut rendered = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Group(index) => {
                    if let Some(Some(text)) = groups.get(*index) {
                        rendered.push_str(text);
                    }
                }
            }
        }
        rendered
    }
}

impl fmt::Display for TargetTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segments(source: &str, pattern: &Pattern) -> std::result::Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            literal.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            return Err("trailing backslash".to_string());
        };
        let group = match next {
            '\\' => {
                literal.push('\\');
                None
            }
            'n' => {
                literal.push('\n');
                None
            }
            'r' => {
                literal.push('\r');
                None
            }
            't' => {
                literal.push('\t');
                None
            }
            'g' => {
                if chars.next() != Some('<') {
                    return Err("missing '<' after \\g".to_string());
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('>') => break,
                        Some(c) => name.push(c),
                        None => return Err(format!("unterminated group reference \\g<{name}")),
                    }
                }
                Some(bind_group(&name, pattern)?)
            }
            '0' => return Err("octal escapes are not supported".to_string()),
            digit if digit.is_ascii_digit() => {
                let mut number = String::from(digit);
                if let Some(second) = chars.next_if(char::is_ascii_digit) {
                    number.push(second);
                }
                Some(bind_group(&number, pattern)?)
            }
            letter if letter.is_ascii_alphabetic() => {
                return Err(format!("bad escape \\{letter}"));
            }
            other => {
                literal.push('\\');
                literal.push(other);
                None
            }
        };
        if let Some(index) = group {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Group(index));
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn bind_group(reference: &str, pattern: &Pattern) -> std::result::Result<usize, String> {
    if reference.is_empty() {
        return Err("empty group reference".to_string());
    }
    let index = if reference.chars().all(|c| c.is_ascii_digit()) {
        reference
            .parse::<usize>()
            .map_err(|_| format!("invalid group reference '{reference}'"))?
    } else {
        pattern
            .group_index(reference)
            .ok_or_else(|| format!("unknown group name '{reference}'"))?
    };
    if index > pattern.group_count() {
        return Err(format!(
            "invalid group reference {index}: pattern has {} group(s)",
            pattern.group_count()
        ));
    }
    Ok(index)
}
