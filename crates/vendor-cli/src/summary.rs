//! Terminal rendering of run reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vendor_ingest::IngestReport;

use crate::commands::SummaryOutcome;

pub fn print_ingest_report(report: &IngestReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Seconds"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for load in &report.loads {
        table.add_row(vec![
            Cell::new(&load.table).fg(Color::Blue),
            Cell::new(load.rows),
            Cell::new(format_seconds(load.elapsed.as_secs_f64())),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        Cell::new(format_seconds(report.elapsed.as_secs_f64())).add_attribute(Attribute::Bold),
    ]);

    println!("Loaded {} file(s)", report.loads.len());
    println!("{table}");
}

pub fn print_summary_outcome(outcome: &SummaryOutcome) {
    println!(
        "Vendor summary: {} row(s) aggregated, {} row(s) written in {}s",
        outcome.rows_fetched,
        outcome.rows_written,
        format_seconds(outcome.elapsed.as_secs_f64())
    );
}

fn format_seconds(secs: f64) -> String {
    format!("{secs:.2}")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.00");
        assert_eq!(format_seconds(12.3456), "12.35");
    }
}
