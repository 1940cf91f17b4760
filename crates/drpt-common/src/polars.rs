//! Polars value and dtype helpers.
//!
//! Everything that turns a cell into text or a number goes through here so
//! that reports, limits files and obfuscation keys agree on one rendering.

use polars::prelude::{AnyValue, DataFrame, DataType};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats with
/// [`format_numeric`].
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use drpt_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("one")), "one");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number using the shortest representation that
/// round-trips to the same `f64`.
///
/// Negative zero is rendered as `0` so that bounds computed from `-0.0` and
/// `0.0` produce the same report text.
///
/// # Examples
///
/// ```
/// use drpt_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(100.0), "100");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(-0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Renders a `(min, max)` pair the way it appears in report details.
///
/// ```
/// use drpt_common::format_bounds;
///
/// assert_eq!(format_bounds(1.1, 3.3), "[1.1,3.3]");
/// ```
pub fn format_bounds(min: f64, max: f64) -> String {
    format!("[{},{}]", format_numeric(min), format_numeric(max))
}

/// Parses a string as `f64`, returning `None` for empty strings, invalid
/// input and `NaN`.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Returns true for the integer and floating-point dtypes that can be scaled.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Returns the column names of a frame in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
    }

    #[test]
    fn test_any_to_string_boolean() {
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn test_format_numeric_keeps_integral_zeros() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(2500.0), "2500");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(3.3), "3.3");
        assert_eq!(format_numeric(-1.25), "-1.25");
    }

    #[test]
    fn test_format_bounds() {
        assert_eq!(format_bounds(1.1, 3.3), "[1.1,3.3]");
        assert_eq!(format_bounds(5.0, 5.0), "[5,5]");
        assert_eq!(format_bounds(-2.0, 0.5), "[-2,0.5]");
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("  3.5  "), Some(3.5));
        assert_eq!(parse_f64("invalid"), None);
    }

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }
}
