//! Punch-completeness check.

use crate::models::{ClockTime, PunchRecord, PunchSchema};

/// How complete a day's punch record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchCompleteness {
    /// A punch-in exists, and a punch-out too where the schema records one.
    Complete {
        /// The punch-in time, fed to the lateness check.
        punch_in: ClockTime,
    },
    /// Neither punch is usable.
    MissingBoth,
    /// Punch-out recorded, punch-in missing.
    MissingIn,
    /// Punch-in recorded, punch-out missing (split schema only).
    MissingOut,
}

/// Classifies a punch record.
///
/// Under the combined schema no punch-out is ever recorded, so a record with
/// a punch-in is complete.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ClockTime, PunchRecord, PunchSchema};
/// use attendance_engine::resolution::{PunchCompleteness, check_completeness};
///
/// let record = PunchRecord {
///     employee_id: "E1".to_string(),
///     date: None,
///     punch_in: ClockTime::from_hm(9, 30),
///     punch_out: None,
///     shift_name: "General".to_string(),
/// };
/// assert_eq!(check_completeness(&record, PunchSchema::Split), PunchCompleteness::MissingOut);
/// assert!(matches!(
///     check_completeness(&record, PunchSchema::Combined),
///     PunchCompleteness::Complete { .. }
/// ));
/// ```
pub fn check_completeness(record: &PunchRecord, schema: PunchSchema) -> PunchCompleteness {
    let needs_out = schema.expects_punch_out();
    match (record.punch_in, record.punch_out) {
        (None, None) => PunchCompleteness::MissingBoth,
        (None, Some(_)) => PunchCompleteness::MissingIn,
        (Some(_), None) if needs_out => PunchCompleteness::MissingOut,
        (Some(punch_in), _) => PunchCompleteness::Complete { punch_in },
    }
}
