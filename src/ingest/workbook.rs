//! First-sheet extraction from `.xlsx` inputs.
//!
//! Cells are flattened to text so workbook rows go through the same column
//! lookup and parsing as CSV rows.

use std::ffi::OsStr;
use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::error::{EngineError, EngineResult};

use super::punch_table::COMBINED_TIMESTAMP_FORMAT;

/// Header row and data rows of a worksheet, as text.
#[derive(Debug)]
pub(crate) struct SheetRows {
    pub(crate) headers: StringRecord,
    pub(crate) rows: Vec<StringRecord>,
}

/// True when the path has an `.xlsx` extension (any case).
pub(crate) fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Reads the first worksheet. An empty sheet yields no headers.
pub(crate) fn read_first_sheet<RS: Read + Seek>(
    reader: RS,
    source: &str,
) -> EngineResult<SheetRows> {
    let mut workbook: Xlsx<RS> = Xlsx::new(reader).map_err(|e| workbook_error(source, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::InputRead {
            path: source.to_string(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(|e| workbook_error(source, e))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|data| cell_text(data).trim().to_string())
                .collect::<StringRecord>()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect::<StringRecord>())
        .collect();

    Ok(SheetRows { headers, rows })
}

/// Text form of a cell.
///
/// Date-time cells use the combined punch format, which the split parser
/// also accepts. Pure time cells become `HH:MM:SS`.
fn cell_text(data: &Data) -> String {
    match data {
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => {
            let Some(datetime) = value.as_datetime() else {
                return String::new();
            };
            if value.as_f64() < 1.0 {
                datetime.format("%H:%M:%S").to_string()
            } else {
                datetime.format(COMBINED_TIMESTAMP_FORMAT).to_string()
            }
        }
        Data::DateTimeIso(value) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|datetime| datetime.format(COMBINED_TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|_| value.clone()),
        Data::DurationIso(value) => value.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn workbook_error(source: &str, err: calamine::XlsxError) -> EngineError {
    EngineError::InputRead {
        path: source.to_string(),
        message: err.to_string(),
    }
}
