//! Text rendering of report results.
//!
//! Produces a boxed ASCII grid with every cell centered, or a fixed notice
//! when there is nothing to show.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use report_core::error::Result;
use report_core::models::TabularResult;

/// Printed in place of a table when a result is absent or empty.
pub const NO_DATA_NOTICE: &str = "No data to display";

/// Render `result` as a grid table.
///
/// `None` and results with neither headers nor rows give [`NO_DATA_NOTICE`].
/// Empty headers are allowed: the body rows render without a header row.
pub fn render(result: Option<&TabularResult>) -> String {
    match result {
        Some(result) if !result.is_empty() => build_table(result).to_string(),
        _ => NO_DATA_NOTICE.to_string(),
    }
}

/// Render `result` as pretty-printed JSON with `headers` and `rows` keys.
pub fn render_json(result: &TabularResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn build_table(result: &TabularResult) -> Table {
    let mut table = Table::new();
    // Layout must not depend on the terminal the report is printed to.
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled);

    if !result.headers.is_empty() {
        table.set_header(result.headers.iter().map(centered));
    }
    for row in &result.rows {
        table.add_row(row.iter().map(centered));
    }

    table
}

fn centered<T: ToString>(content: T) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Center)
}
