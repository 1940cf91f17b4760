//! drpt: Data Release Preparation Tool.

use clap::{ColorChoice, Parser};
use drpt_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_check, run_release_command};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Release(args) => run_release_command(args).map(|result| print_summary(&result)),
        Command::Check(args) => run_check(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_timestamps = cli.log_timestamps;
    config.with_target = cli.log_target;
    config.with_spans = !cli.no_log_spans;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "drpt",
            "--log-timestamps",
            "--log-target",
            "--no-log-spans",
            "--log-format",
            "compact",
            "check",
            "recipe.json",
        ])
        .unwrap();
        let config = log_config_from_cli(&cli);
        assert!(config.with_timestamps);
        assert!(config.with_target);
        assert!(!config.with_spans);
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn logging_defaults_without_flags() {
        let cli = Cli::try_parse_from(["drpt", "check", "recipe.json"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
        assert!(config.with_spans);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.use_env_filter);
    }
}
