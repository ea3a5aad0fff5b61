//! HRMS leave table normalization.

use std::io::{BufReader, Read, Seek};
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{LeaveRow, LeaveTable, parse_day_column};

use super::headers::{HeaderIndex, cell};
use super::workbook::{is_workbook, read_first_sheet};
use super::{csv_error, csv_reader, open_input};

const EMPLOYEE_ID: &str = "Employee Id";
const EMPLOYEE_NAME: &str = "Employee Name";

/// Reads the HRMS sheet from CSV. `source` labels the input in errors.
///
/// Headers that parse as `DD-MM-YYYY` become day columns; every other column
/// besides the two identity columns is ignored. Cells are kept raw.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::MissingColumn`] when `Employee Id` or
/// `Employee Name` is absent.
pub fn read_leave_table<R: Read>(reader: R, source: &str) -> EngineResult<LeaveTable> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers().map_err(|e| csv_error(source, e))?.clone();
    let rows = reader
        .into_records()
        .map(|row| row.map_err(|e| csv_error(source, e)));
    normalize_leaves(&headers, rows, source)
}

/// Reads the HRMS sheet from the first worksheet of an `.xlsx` workbook.
///
/// Day headers must be text cells in `DD-MM-YYYY` form.
pub fn read_leave_workbook<RS: Read + Seek>(reader: RS, source: &str) -> EngineResult<LeaveTable> {
    let sheet = read_first_sheet(reader, source)?;
    normalize_leaves(&sheet.headers, sheet.rows.into_iter().map(Ok), source)
}

fn normalize_leaves<I>(headers: &StringRecord, rows: I, source: &str) -> EngineResult<LeaveTable>
where
    I: IntoIterator<Item = EngineResult<StringRecord>>,
{
    let index = HeaderIndex::new("leave", headers);
    let id_column = index.require(EMPLOYEE_ID)?;
    let name_column = index.require(EMPLOYEE_NAME)?;

    let day_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| parse_day_column(header).is_some())
        .collect();

    let mut leaves = Vec::new();
    for record in rows {
        let record = record?;
        let codes = day_columns.iter().filter_map(|(position, header)| {
            cell(&record, *position).map(|code| (*header, code.to_string()))
        });
        leaves.push(LeaveRow::from_columns(
            cell(&record, id_column).unwrap_or_default(),
            cell(&record, name_column).unwrap_or_default(),
            codes,
        ));
    }

    debug!(
        source,
        rows = leaves.len(),
        day_columns = day_columns.len(),
        "Loaded leave table"
    );
    Ok(LeaveTable::new(leaves))
}

/// Reads the HRMS sheet from a file: `.xlsx` as a workbook, otherwise CSV.
pub fn load_leave_table(path: impl AsRef<Path>) -> EngineResult<LeaveTable> {
    let path = path.as_ref();
    let file = open_input(path)?;
    let source = path.display().to_string();
    if is_workbook(path) {
        read_leave_workbook(BufReader::new(file), &source)
    } else {
        read_leave_table(file, &source)
    }
}
