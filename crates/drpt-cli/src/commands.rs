use anyhow::{Context, Result};
use comfy_table::Table;
use drpt_ingest::load_recipe;
use drpt_model::{ReleaseOptions, ScalingMode};

use drpt_cli::pipeline::{ReleaseRequest, run_release};
use drpt_cli::types::ReleaseResult;

use crate::cli::{CheckArgs, ReleaseArgs};
use crate::summary::apply_table_style;

pub fn run_release_command(args: &ReleaseArgs) -> Result<ReleaseResult> {
    let scaling = if args.no_scaling {
        ScalingMode::Disabled
    } else {
        ScalingMode::Enabled
    };
    let options = ReleaseOptions::new()
        .with_scaling(scaling)
        .with_dry_run(args.dry_run)
        .with_row_limit(args.nrows);
    let request = ReleaseRequest {
        output: args.output_file.clone(),
        limits: args.limits_file.clone(),
        save_limits: args.save_limits.clone(),
        options,
        ..ReleaseRequest::new(&args.recipe, &args.input)
    };
    run_release(&request)
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let recipe = load_recipe(&args.recipe).context("load recipe")?;
    println!("Recipe: {}", args.recipe.display());
    println!("Version: {}", recipe.version);

    let actions = &recipe.actions;
    let mut table = Table::new();
    table.set_header(vec!["Action", "Pattern", "Target"]);
    apply_table_style(&mut table);
    if actions.drop_constant_columns {
        table.add_row(vec!["drop-constant-columns", "-", "-"]);
    }
    for pattern in &actions.drop {
        table.add_row(vec!["drop", pattern.as_str(), "-"]);
    }
    for pattern in &actions.obfuscate {
        table.add_row(vec!["obfuscate", pattern.as_str(), "-"]);
    }
    for pattern in &actions.no_scaling {
        table.add_row(vec!["no-scaling", pattern.as_str(), "-"]);
    }
    for rule in &actions.rename {
        table.add_row(vec!["rename", rule.pattern.as_str(), rule.target.as_str()]);
    }
    if actions.is_empty() {
        println!("No actions.");
    } else {
        println!("{table}");
    }
    Ok(())
}
