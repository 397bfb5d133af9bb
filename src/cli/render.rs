//! Page rendering
//!
//! Plain-text table sized from the accessor's column hints, or a JSON
//! document of the page metadata and its raw records.

use serde_json::json;

use crate::accessors::FieldAccessor;
use crate::constants::MAX_CELL_WIDTH;
use crate::domain::{ColumnWidth, FieldValue};
use crate::error::Result;
use crate::state::RecordBrowser;
use crate::utils::format::{fit, format_amount, format_datetime};

fn cell_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => format_amount(*n),
        FieldValue::Date(dt) => format_datetime(dt),
        other => other.display_or_sentinel(),
    }
}

/// Render the current page as an aligned text table with a footer
pub fn render_table<A: FieldAccessor>(browser: &RecordBrowser<A>) -> String {
    let accessor = browser.accessor();
    let columns = accessor.columns();
    let sort = browser.state().sort();

    let rows: Vec<Vec<String>> = browser
        .visible_rows()
        .map(|record| {
            columns
                .iter()
                .map(|column| cell_text(&accessor.derive(record, column.id)))
                .collect()
        })
        .collect();

    let headers: Vec<String> = columns
        .iter()
        .map(|column| match sort {
            Some(spec) if spec.field == column.id => format!("{} {}", column.label, spec.direction.arrow()),
            _ => column.label.to_string(),
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match column.width {
            ColumnWidth::Fixed(width) => width,
            ColumnWidth::Flex => rows
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH),
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| fit(cell, width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&headers));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&line(&rule));
    out.push('\n');

    if rows.is_empty() {
        out.push_str("No records found\n");
    }
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    out.push_str(&footer(browser));
    out.push('\n');
    out
}

fn footer<A: FieldAccessor>(browser: &RecordBrowser<A>) -> String {
    let info = browser.page_info();
    let label = browser.accessor().entity_type().label();
    let mut text = format!("Page {} of {}", info.page, info.total_pages.max(1));
    if info.total_items > 0 {
        text.push_str(&format!(" | {}-{} of {} {label}", info.start + 1, info.end, info.total_items));
    } else {
        text.push_str(&format!(" | 0 {label}"));
    }
    let unfiltered = browser.view().unfiltered_count();
    if unfiltered != info.total_items {
        text.push_str(&format!(" (filtered from {unfiltered})"));
    }
    text
}

/// Render the page metadata, view state and raw records as pretty JSON
pub fn render_json<A: FieldAccessor>(browser: &RecordBrowser<A>) -> Result<String> {
    let rows: Vec<_> = browser.visible_rows().collect();
    let document = json!({
        "entity": browser.accessor().entity_type(),
        "state": browser.state(),
        "page": browser.page_info(),
        "records": rows,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}
