//! HRMS leave codes and the leave table.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format of the HRMS day column headers.
pub const DAY_COLUMN_FORMAT: &str = "%d-%m-%Y";

/// The counted leave sub-types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Privileged leave.
    #[serde(rename = "PL")]
    Privileged,
    /// Casual leave.
    #[serde(rename = "CL")]
    Casual,
    /// LL leave.
    #[serde(rename = "LL")]
    Ll,
    /// Leave without pay.
    #[serde(rename = "LWP")]
    WithoutPay,
}

impl LeaveType {
    /// The HRMS code for this leave type.
    pub fn code(self) -> &'static str {
        match self {
            LeaveType::Privileged => "PL",
            LeaveType::Casual => "CL",
            LeaveType::Ll => "LL",
            LeaveType::WithoutPay => "LWP",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One recognised HRMS cell value.
///
/// Anything outside the closed vocabulary parses to `None` and resolves to a
/// blank day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveCode {
    /// `HD`: pre-approved half day.
    HalfDay,
    /// `WOff`: weekly off.
    WeeklyOff,
    /// `Not Enrolled`.
    NotEnrolled,
    /// `PL`, `CL`, `LL` or `LWP`.
    Leave(LeaveType),
    /// `PL/PT` or `CL/PT`: half-day leave, half-day present.
    HalfDayLeave(LeaveType),
    /// `PT`: present, expected to punch.
    Present,
    /// `WFH`: work from home.
    WorkFromHome,
}

impl LeaveCode {
    /// Parses a raw HRMS cell. Surrounding whitespace is ignored; matching is
    /// otherwise exact.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{LeaveCode, LeaveType};
    ///
    /// assert_eq!(LeaveCode::parse("LWP"), Some(LeaveCode::Leave(LeaveType::WithoutPay)));
    /// assert_eq!(LeaveCode::parse(" CL/PT "), Some(LeaveCode::HalfDayLeave(LeaveType::Casual)));
    /// assert_eq!(LeaveCode::parse("pt"), None);
    /// assert_eq!(LeaveCode::parse(""), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let code = match raw.trim() {
            "HD" => LeaveCode::HalfDay,
            "WOff" => LeaveCode::WeeklyOff,
            "Not Enrolled" => LeaveCode::NotEnrolled,
            "PL" => LeaveCode::Leave(LeaveType::Privileged),
            "CL" => LeaveCode::Leave(LeaveType::Casual),
            "LL" => LeaveCode::Leave(LeaveType::Ll),
            "LWP" => LeaveCode::Leave(LeaveType::WithoutPay),
            "PL/PT" => LeaveCode::HalfDayLeave(LeaveType::Privileged),
            "CL/PT" => LeaveCode::HalfDayLeave(LeaveType::Casual),
            "PT" => LeaveCode::Present,
            "WFH" => LeaveCode::WorkFromHome,
            _ => return None,
        };
        Some(code)
    }
}

/// Parses an HRMS day column header (`DD-MM-YYYY`).
pub fn parse_day_column(header: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(header.trim(), DAY_COLUMN_FORMAT).ok()
}

/// Formats a date as an HRMS day column header.
pub fn day_column_name(date: NaiveDate) -> String {
    date.format(DAY_COLUMN_FORMAT).to_string()
}

/// One employee row of the HRMS sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRow {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Raw cell values keyed by the date of their day column.
    pub codes: BTreeMap<NaiveDate, String>,
}

impl LeaveRow {
    /// Builds a row from `(header, cell)` pairs, keeping only day columns.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::LeaveRow;
    /// use chrono::NaiveDate;
    ///
    /// let row = LeaveRow::from_columns(
    ///     "E1",
    ///     "Asha",
    ///     [("05-01-2024", "HD"), ("Department", "Ops")],
    /// );
    /// assert_eq!(row.codes.len(), 1);
    /// assert_eq!(row.raw_code(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()), Some("HD"));
    /// ```
    pub fn from_columns<I, H, V>(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        columns: I,
    ) -> Self
    where
        I: IntoIterator<Item = (H, V)>,
        H: AsRef<str>,
        V: Into<String>,
    {
        let codes = columns
            .into_iter()
            .filter_map(|(header, value)| {
                parse_day_column(header.as_ref()).map(|date| (date, value.into()))
            })
            .collect();
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            codes,
        }
    }

    /// The raw cell for a date, or `None` when the sheet has no such column.
    pub fn raw_code(&self, date: NaiveDate) -> Option<&str> {
        self.codes.get(&date).map(String::as_str)
    }

    /// The parsed code for a date; `None` for a missing column, an empty cell
    /// or an unrecognised value.
    pub fn code(&self, date: NaiveDate) -> Option<LeaveCode> {
        self.raw_code(date).and_then(LeaveCode::parse)
    }
}

/// The HRMS sheet: one row per employee, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeaveTable {
    /// Rows in source order; output rows follow this order.
    pub rows: Vec<LeaveRow>,
}

impl LeaveTable {
    /// Creates a table from rows.
    pub fn new(rows: Vec<LeaveRow>) -> Self {
        Self { rows }
    }
}
