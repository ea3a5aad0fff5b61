//! Record normalization for the two input tables.
//!
//! Both tables are read as CSV, or from the first worksheet of an `.xlsx`
//! workbook when the file name says so. Header names are matched loosely: case,
//! spaces, underscores and punctuation are ignored, so `employee_id` and
//! `Employee Id` name the same column. A missing required column is fatal;
//! a bad cell is not.
//!
//! # Example
//!
//! ```
//! use attendance_engine::ingest::{read_leave_table, read_punch_table};
//! use attendance_engine::models::PunchSchema;
//!
//! let punches = "employee_id,Punch IN Time,shift_name\nE1,02-01-2024 09:50:00,General\n";
//! let hrms = "Employee Id,Employee Name,02-01-2024\nE1,Asha,PT\n";
//!
//! let punches = read_punch_table(punches.as_bytes(), "punches.csv").unwrap();
//! let leaves = read_leave_table(hrms.as_bytes(), "hrms.csv").unwrap();
//! assert_eq!(punches.schema, PunchSchema::Combined);
//! assert_eq!(leaves.rows[0].employee_name, "Asha");
//! ```

mod headers;
mod leave_table;
mod punch_table;
mod workbook;

pub use headers::normalize_header;
pub use leave_table::{load_leave_table, read_leave_table, read_leave_workbook};
pub use punch_table::{
    COMBINED_TIMESTAMP_FORMAT, SplitTimestamp, load_punch_table, parse_split_timestamp,
    read_punch_table, read_punch_workbook,
};

use std::fs::File;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Opens an input file, mapping failures to [`EngineError::InputRead`].
fn open_input(path: &Path) -> EngineResult<File> {
    File::open(path).map_err(|e| EngineError::InputRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Builds a CSV reader that tolerates ragged rows.
fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

fn csv_error(source: &str, err: csv::Error) -> EngineError {
    EngineError::InputRead {
        path: source.to_string(),
        message: err.to_string(),
    }
}
