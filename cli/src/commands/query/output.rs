//! Output formatting for statement results.
//!
//! A row-producing statement is shown as a left-aligned, pipe-delimited table
//! of its header and preview rows, followed by one summary line. Each column
//! is padded to its widest cell, header included; widths count characters.

use db::queries::statement::{QueryOutcome, ResultPreview};

use crate::output::Outputable;

impl Outputable for QueryOutcome {
    fn to_table(&self) -> String {
        match self {
            QueryOutcome::Rows(preview) => format_preview(preview),
            QueryOutcome::Modified { rows } => format!("Modified {} row(s).", rows),
            QueryOutcome::Done => "Done.".to_string(),
        }
    }
}

fn format_preview(preview: &ResultPreview) -> String {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(preview.rows.len() + 1);
    table.push(preview.columns.clone());
    // NULL cells render as "NULL" through Value's Display.
    table.extend(
        preview
            .rows
            .iter()
            .map(|row| row.iter().map(|value| value.to_string()).collect()),
    );

    let mut widths = vec![0; preview.columns.len()];
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines: Vec<String> = table.iter().map(|row| format_row(row, &widths)).collect();
    lines.push(summary(preview));
    lines.join("\n")
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in row.iter().zip(widths) {
        let padding = width - cell.chars().count();
        line.push_str("| ");
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
    }
    line.push('|');
    line
}

fn summary(preview: &ResultPreview) -> String {
    if preview.rows.is_empty() {
        "Query returned zero rows.".to_string()
    } else if preview.truncated {
        format!("Output first {} rows.", preview.rows.len())
    } else {
        format!("Output all {} row(s).", preview.rows.len())
    }
}
