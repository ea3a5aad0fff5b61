//! Loose header matching.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{EngineError, EngineResult};

/// Folds a header to lowercase alphanumerics.
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::normalize_header;
///
/// assert_eq!(normalize_header("Employee Id"), "employeeid");
/// assert_eq!(normalize_header("employee_id"), "employeeid");
/// assert_eq!(normalize_header(" Punch IN Time "), "punchintime");
/// ```
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column positions of one table, keyed by normalized header.
#[derive(Debug)]
pub(crate) struct HeaderIndex {
    table: &'static str,
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub(crate) fn new(table: &'static str, headers: &StringRecord) -> Self {
        let mut columns = HashMap::new();
        for (position, header) in headers.iter().enumerate() {
            // first occurrence wins on duplicates
            columns.entry(normalize_header(header)).or_insert(position);
        }
        Self { table, columns }
    }

    /// Position of a required column; `display` is the name used in errors.
    pub(crate) fn require(&self, display: &str) -> EngineResult<usize> {
        self.optional(display)
            .ok_or_else(|| EngineError::MissingColumn {
                table: self.table.to_string(),
                column: display.to_string(),
            })
    }

    pub(crate) fn optional(&self, name: &str) -> Option<usize> {
        self.columns.get(&normalize_header(name)).copied()
    }
}

/// A trimmed, non-empty cell.
pub(crate) fn cell(record: &StringRecord, position: usize) -> Option<&str> {
    record
        .get(position)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
