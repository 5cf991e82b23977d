use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ConvertResult, Count};

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output ({}): {}", result.format, path.display()),
        None => println!("Output: dry run, nothing written"),
    }
    println!("Title: {}", result.report.title());

    let counts = &result.counts;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Records"),
        header_cell("Flagged"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let rows = [
        ("Domain scores", counts.domain_scores),
        ("Symptom severities", counts.severities),
        ("Subtest metrics", counts.subtest_metrics),
    ];
    for (label, count) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count.total),
            flagged_cell(count),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!("Subtests found: {}", counts.subtests)),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new(format!("Scales found: {}", counts.scales)),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Report items")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.report.len()).add_attribute(Attribute::Bold),
        flagged_cell(Count {
            total: result.report.len(),
            flagged: result.report.flagged_count(),
        })
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flagged_cell(count: Count) -> Cell {
    if count.flagged == 0 {
        dim_cell(0)
    } else {
        Cell::new(count.flagged).fg(Color::Red)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
