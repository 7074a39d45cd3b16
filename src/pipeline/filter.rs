//! Column/value row filtering.

use crate::tokenizer::{Batch, Field, Row};

/// Keeps rows whose value in a named column matches, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    column: String,
    value: String,
}

impl RowFilter {
    /// Build a filter; blank column names or values disable filtering
    pub fn new(column: impl AsRef<str>, value: impl AsRef<str>) -> Option<Self> {
        let column = column.as_ref();
        let value = value.as_ref();
        if column.trim().is_empty() || value.trim().is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_lowercase(),
            value: value.to_lowercase(),
        })
    }

    /// Build a filter from optional CLI-style arguments
    pub fn from_options(column: Option<&str>, value: Option<&str>) -> Option<Self> {
        Self::new(column?, value?)
    }

    /// Position of the filter column in `header`, if present
    pub fn column_index(&self, header: &[Field]) -> Option<usize> {
        header
            .iter()
            .position(|name| name.to_lowercase() == self.column)
    }

    pub fn matches(&self, row: &[Field], column_index: usize) -> bool {
        row.get(column_index)
            .is_some_and(|value| value.to_lowercase() == self.value)
    }

    /// Filter one batch against the session header.
    ///
    /// The header row itself is kept when the batch carries it. When the
    /// column is missing from the header the batch passes through untouched.
    pub fn apply(&self, header: Option<&Row>, batch: Batch) -> Vec<Row> {
        let Some(index) = header.and_then(|h| self.column_index(h)) else {
            return batch.rows;
        };

        let keep_first = batch.includes_header;
        batch
            .rows
            .into_iter()
            .enumerate()
            .filter(|(i, row)| (keep_first && *i == 0) || self.matches(row, index))
            .map(|(_, row)| row)
            .collect()
    }
}
