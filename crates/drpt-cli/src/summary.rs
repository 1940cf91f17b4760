use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use drpt_cli::types::ReleaseResult;
use drpt_model::ActionKind;

pub fn print_summary(result: &ReleaseResult) {
    println!("Recipe version: {}", result.recipe_version);
    println!("Input: {}", result.input.display());
    if result.dataset_written {
        println!(
            "Output: {} ({} rows, {} columns)",
            result.output.display(),
            result.row_count,
            result.column_count
        );
    } else {
        println!("Output: {} (dry run, not written)", result.output.display());
    }
    println!("Report: {}", result.report_path.display());
    if let Some(path) = &result.limits_path {
        println!("Limits: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Action"),
        header_cell("Column"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for entry in result.report.action_entries() {
        table.add_row(vec![
            Cell::new(entry.index),
            action_cell(entry.action_kind),
            Cell::new(&entry.column),
            detail_cell(&entry.details),
        ]);
    }
    println!("{table}");

    let mut totals = Table::new();
    totals.set_header(vec![header_cell("Action"), header_cell("Columns")]);
    apply_table_style(&mut totals);
    align_column(&mut totals, 1, CellAlignment::Right);
    for (kind, count) in result.action_counts() {
        let count_cell = if count > 0 {
            Cell::new(count).add_attribute(Attribute::Bold)
        } else {
            dim_cell(count)
        };
        totals.add_row(vec![action_cell(kind), count_cell]);
    }
    println!("{totals}");

    if !result.unused_limits.is_empty() {
        println!("Unused limits: {}", result.unused_limits.join(", "));
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn action_cell(kind: ActionKind) -> Cell {
    let color = match kind {
        ActionKind::Drop | ActionKind::DropConstant => Color::Red,
        ActionKind::Obfuscate => Color::Magenta,
        ActionKind::ScaleDefault => Color::Yellow,
        ActionKind::Rename => Color::Green,
        ActionKind::RecipeVersion | ActionKind::DrptVersion => Color::Cyan,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn detail_cell(details: &str) -> Cell {
    if details.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(details)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
