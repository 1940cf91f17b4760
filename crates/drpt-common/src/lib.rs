//! Shared utilities for the drpt crates.
//!
//! This crate provides the small set of Polars helpers used across the
//! workspace: value conversion, dtype classification and the numeric
//! formatting used wherever a number ends up in a text artifact.

pub mod polars;

pub use polars::{
    any_to_string, column_names, format_bounds, format_numeric, is_numeric_dtype,
    parse_f64,
};
