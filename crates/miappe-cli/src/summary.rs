use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use miappe_model::Issue;
use miappe_validate::ValidationReport;

use crate::cli::ReportFormatArg;

pub fn print_report(path: &Path, report: &ValidationReport, format: ReportFormatArg) -> Result<()> {
    match format {
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize report")?;
            println!("{json}");
        }
        ReportFormatArg::Table => print_tables(path, report),
    }
    Ok(())
}

fn print_tables(path: &Path, report: &ValidationReport) {
    println!("Workbook: {}", path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Records"),
        header_cell("Accepted"),
        header_cell("Rejected"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (category, summary) in report.summary() {
        table.add_row(vec![
            Cell::new(category)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.total()),
            count_cell(summary.accepted, Color::Green),
            count_cell(summary.rejected, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.len()).add_attribute(Attribute::Bold),
        count_cell(report.accepted_count(), Color::Green).add_attribute(Attribute::Bold),
        count_cell(report.rejected_count(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_issue_table(report);
}

fn print_issue_table(report: &ValidationReport) {
    if report.is_valid() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Location"),
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for outcome in report.rejected() {
        for issue in outcome.issues() {
            table.add_row(vec![
                Cell::new(outcome.location()).fg(Color::Blue),
                Cell::new(issue.field()),
                rule_cell(issue),
                Cell::new(issue.message()),
            ]);
        }
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Prints the issues of a record rejected under `--fail-fast`.
pub fn print_issues(issues: &[Issue]) {
    for issue in issues {
        eprintln!("- {}", issue.message());
    }
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
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(28)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(11)),
        ColumnConstraint::UpperBoundary(Width::Percentage(55)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rule_cell(issue: &Issue) -> Cell {
    match issue {
        Issue::RequiredMissing { .. } => Cell::new("REQUIRED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Issue::InvalidFormat { .. } => Cell::new("FORMAT").fg(Color::Red),
        Issue::Cardinality { .. } => Cell::new("CARDINALITY").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
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
