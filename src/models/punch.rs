//! Punch records from the biometric clock export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ClockTime;

/// Shift name that uses the general-shift lateness threshold.
pub const GENERAL_SHIFT: &str = "general";

/// Shift name that uses the evening-shift lateness threshold.
pub const EVENING_SHIFT: &str = "evening shift";

/// Which layout of punch export produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchSchema {
    /// One combined punch timestamp per row; no punch-out is ever recorded.
    Combined,
    /// Separate punch-in and punch-out timestamps.
    #[default]
    Split,
}

impl PunchSchema {
    /// Returns true when a missing punch-out means the day is incomplete.
    pub fn expects_punch_out(self) -> bool {
        matches!(self, PunchSchema::Split)
    }
}

/// The named shifts that carry lateness thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedShift {
    /// The general (day) shift.
    General,
    /// The evening shift.
    Evening,
}

impl NamedShift {
    /// Matches a free-text shift name, ignoring case and surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::NamedShift;
    ///
    /// assert_eq!(NamedShift::from_name("  General "), Some(NamedShift::General));
    /// assert_eq!(NamedShift::from_name("EVENING SHIFT"), Some(NamedShift::Evening));
    /// assert_eq!(NamedShift::from_name("night"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let folded = name.trim().to_lowercase();
        match folded.as_str() {
            GENERAL_SHIFT => Some(NamedShift::General),
            EVENING_SHIFT => Some(NamedShift::Evening),
            _ => None,
        }
    }

    /// Status prefix used for a late punch on this shift.
    pub fn late_tag(self) -> &'static str {
        match self {
            NamedShift::General => "GSL",
            NamedShift::Evening => "ESL",
        }
    }
}

/// One punch event for an employee on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Employee identifier, matched against the leave table.
    pub employee_id: String,
    /// Calendar date the punch belongs to; `None` when it could not be parsed.
    pub date: Option<NaiveDate>,
    /// Punch-in time, if recorded and parseable.
    pub punch_in: Option<ClockTime>,
    /// Punch-out time, if recorded and parseable.
    pub punch_out: Option<ClockTime>,
    /// Free-text shift name from the export.
    pub shift_name: String,
}

/// All punch records of one export, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PunchTable {
    /// The export layout the records came from.
    pub schema: PunchSchema,
    /// Records in source order.
    pub records: Vec<PunchRecord>,
}

impl PunchTable {
    /// Creates a table from records of a known schema.
    pub fn new(schema: PunchSchema, records: Vec<PunchRecord>) -> Self {
        Self { schema, records }
    }

    /// Iterates the dates of every dated record.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().filter_map(|r| r.date)
    }
}
