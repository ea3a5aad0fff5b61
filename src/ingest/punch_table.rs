//! Punch table normalization.
//!
//! The schema is detected from the headers: a `Punch Out Time` column means
//! the split layout, otherwise the combined one. Files ending in `.xlsx` are
//! read from their first worksheet; anything else is read as CSV.

use std::io::{BufReader, Read, Seek};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{ClockTime, PunchRecord, PunchSchema, PunchTable};

use super::headers::{HeaderIndex, cell};
use super::workbook::{is_workbook, read_first_sheet};
use super::{csv_error, csv_reader, open_input};

/// Timestamp format of the combined `Punch IN Time` column.
pub const COMBINED_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const EMPLOYEE_ID: &str = "employee_id";
const PUNCH_IN: &str = "Punch IN Time";
const PUNCH_OUT: &str = "Punch Out Time";
const SHIFT_NAME: &str = "shift_name";
const DATE: &str = "Date";

const SPLIT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// A split-schema timestamp: a full datetime, or a bare time of day when the
/// date comes from the `Date` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitTimestamp {
    /// Date part, when the cell carried one.
    pub date: Option<NaiveDate>,
    /// Time of day.
    pub time: ClockTime,
}

/// Parses a split-schema punch cell with the generic formats.
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::parse_split_timestamp;
/// use attendance_engine::models::ClockTime;
/// use chrono::NaiveDate;
///
/// let ts = parse_split_timestamp("2024-01-02 09:50:00").unwrap();
/// assert_eq!(ts.date, NaiveDate::from_ymd_opt(2024, 1, 2));
/// assert_eq!(ts.time, ClockTime::at(9, 50));
///
/// assert_eq!(parse_split_timestamp("18:05").unwrap().date, None);
/// assert!(parse_split_timestamp("yesterday").is_none());
/// ```
pub fn parse_split_timestamp(value: &str) -> Option<SplitTimestamp> {
    let value = value.trim();
    let datetime = SPLIT_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok());
    if let Some(datetime) = datetime {
        return Some(SplitTimestamp {
            date: Some(datetime.date()),
            time: ClockTime::from_datetime(datetime),
        });
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .map(|time| SplitTimestamp {
            date: None,
            time: ClockTime::from_time(time),
        })
}

fn parse_combined_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), COMBINED_TIMESTAMP_FORMAT).ok()
}

/// A `Date` cell; workbook date cells arrive with a midnight time part.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            SPLIT_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
}

struct PunchColumns {
    employee_id: usize,
    punch_in: usize,
    punch_out: Option<usize>,
    shift_name: usize,
    date: Option<usize>,
}

impl PunchColumns {
    fn locate(index: &HeaderIndex) -> EngineResult<Self> {
        Ok(Self {
            employee_id: index.require(EMPLOYEE_ID)?,
            punch_in: index.require(PUNCH_IN)?,
            punch_out: index.optional(PUNCH_OUT),
            shift_name: index.require(SHIFT_NAME)?,
            date: index.optional(DATE),
        })
    }

    fn schema(&self) -> PunchSchema {
        if self.punch_out.is_some() {
            PunchSchema::Split
        } else {
            PunchSchema::Combined
        }
    }
}

/// Reads a punch table from CSV. `source` labels the input in errors.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::MissingColumn`] when `employee_id`,
/// `Punch IN Time` or `shift_name` is absent, and
/// [`crate::error::EngineError::InputRead`] for malformed CSV. Unparseable
/// timestamps are not errors; they leave the punch (and possibly the date)
/// missing.
pub fn read_punch_table<R: Read>(reader: R, source: &str) -> EngineResult<PunchTable> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers().map_err(|e| csv_error(source, e))?.clone();
    let rows = reader
        .into_records()
        .map(|row| row.map_err(|e| csv_error(source, e)));
    normalize_punches(&headers, rows, source)
}

/// Reads a punch table from the first worksheet of an `.xlsx` workbook.
///
/// Date-time cells are accepted in either schema, alongside the text forms
/// [`read_punch_table`] understands.
///
/// # Errors
///
/// As [`read_punch_table`], plus
/// [`crate::error::EngineError::InputRead`] when the bytes are not a workbook.
pub fn read_punch_workbook<RS: Read + Seek>(reader: RS, source: &str) -> EngineResult<PunchTable> {
    let sheet = read_first_sheet(reader, source)?;
    normalize_punches(&sheet.headers, sheet.rows.into_iter().map(Ok), source)
}

fn normalize_punches<I>(headers: &StringRecord, rows: I, source: &str) -> EngineResult<PunchTable>
where
    I: IntoIterator<Item = EngineResult<StringRecord>>,
{
    let columns = PunchColumns::locate(&HeaderIndex::new("punch", headers))?;
    let schema = columns.schema();

    let mut records = Vec::new();
    let mut unparseable = 0usize;
    for row in rows {
        let row = row?;
        let employee_id = cell(&row, columns.employee_id).unwrap_or_default().to_string();
        let shift_name = cell(&row, columns.shift_name).unwrap_or_default().to_string();
        let raw_in = cell(&row, columns.punch_in);

        let record = match schema {
            PunchSchema::Combined => {
                let parsed = raw_in.and_then(parse_combined_timestamp);
                if raw_in.is_some() && parsed.is_none() {
                    unparseable += 1;
                }
                PunchRecord {
                    employee_id,
                    date: parsed.map(|dt| dt.date()),
                    punch_in: parsed.map(ClockTime::from_datetime),
                    punch_out: None,
                    shift_name,
                }
            }
            PunchSchema::Split => {
                let raw_out = columns.punch_out.and_then(|position| cell(&row, position));
                let punch_in = raw_in.and_then(parse_split_timestamp);
                let punch_out = raw_out.and_then(parse_split_timestamp);
                unparseable += usize::from(raw_in.is_some() && punch_in.is_none());
                unparseable += usize::from(raw_out.is_some() && punch_out.is_none());

                let date = columns
                    .date
                    .and_then(|position| cell(&row, position))
                    .and_then(parse_date)
                    .or_else(|| punch_in.and_then(|ts| ts.date))
                    .or_else(|| punch_out.and_then(|ts| ts.date));
                PunchRecord {
                    employee_id,
                    date,
                    punch_in: punch_in.map(|ts| ts.time),
                    punch_out: punch_out.map(|ts| ts.time),
                    shift_name,
                }
            }
        };
        records.push(record);
    }

    if unparseable > 0 {
        warn!(source, unparseable, "Unparseable punch timestamps treated as missing");
    }
    debug!(source, ?schema, records = records.len(), "Loaded punch table");

    Ok(PunchTable::new(schema, records))
}

/// Reads a punch table from a file: `.xlsx` as a workbook, otherwise CSV.
pub fn load_punch_table(path: impl AsRef<Path>) -> EngineResult<PunchTable> {
    let path = path.as_ref();
    let file = open_input(path)?;
    let source = path.display().to_string();
    if is_workbook(path) {
        read_punch_workbook(BufReader::new(file), &source)
    } else {
        read_punch_table(file, &source)
    }
}
