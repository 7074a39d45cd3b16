//! Fixed-width text rendering of rows.

use crate::tokenizer::Row;

/// Width of every rendered column
pub const COLUMN_WIDTH: usize = 20;

/// Characters kept from a field too wide for its column
const TRUNCATED_PREFIX: usize = 14;

/// Render one field as `|field|`, or `|prefix...|` when it does not fit,
/// left-aligned in a [`COLUMN_WIDTH`] column.
pub fn format_field(field: &str) -> String {
    let cell = if field.chars().count() < COLUMN_WIDTH {
        format!("|{}|", field)
    } else {
        let prefix: String = field.chars().take(TRUNCATED_PREFIX).collect();
        format!("|{}...|", prefix)
    };
    format!("{:<width$}", cell, width = COLUMN_WIDTH)
}

/// Render rows, one newline-terminated line each
pub fn format_rows(rows: &[Row]) -> String {
    let mut out = String::with_capacity(rows.len() * COLUMN_WIDTH * 4);
    for row in rows {
        for field in row {
            out.push_str(&format_field(field));
        }
        out.push('\n');
    }
    out
}
