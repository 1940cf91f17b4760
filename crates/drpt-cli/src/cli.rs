//! CLI argument definitions for drpt.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "drpt",
    version,
    about = "Data Release Preparation Tool - prepare a dataset for publication",
    long_about = "Prepare a tabular dataset for publication by dropping, renaming,\n\
                  obfuscating and scaling columns as described in a JSON recipe.\n\n\
                  Every action taken is written to a CSV report next to the output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the event target (module path) in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Omit span close events from json logs.
    #[arg(long = "no-log-spans", global = true)]
    pub no_log_spans: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a recipe to a dataset and write the release and its report.
    Release(ReleaseArgs),

    /// Validate a recipe and list its actions.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ReleaseArgs {
    /// JSON recipe describing the column actions.
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,

    /// Dataset to release (.csv or .parquet).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output dataset (default: <INPUT stem>_release_<version><ext> next to INPUT).
    #[arg(short = 'o', long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Limits file (.csv or .json) seeding the Min/Max scaling bounds.
    #[arg(short = 'l', long = "limits-file", value_name = "PATH")]
    pub limits_file: Option<PathBuf>,

    /// Write the scaling bounds used by this run as a limits CSV.
    #[arg(long = "save-limits", value_name = "PATH")]
    pub save_limits: Option<PathBuf>,

    /// Write the report only; skip writing the dataset.
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Read only the first N rows of the input (preview runs).
    #[arg(short = 'n', long = "nrows", value_name = "N")]
    pub nrows: Option<usize>,

    /// Disable default Min/Max scaling of numeric columns.
    #[arg(long = "no-scaling")]
    pub no_scaling: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// JSON recipe to validate.
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
