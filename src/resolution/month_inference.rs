//! Reporting month inference.
//!
//! The month is computed once, from the earliest dated punch, and passed
//! explicitly to every later step.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthContext, PunchTable};

/// Infers the reporting month from the earliest dated punch record.
///
/// # Errors
///
/// Returns [`EngineError::NoPunchDates`] when no record carries a date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ClockTime, PunchRecord, PunchSchema, PunchTable};
/// use attendance_engine::resolution::infer_month;
/// use chrono::NaiveDate;
///
/// let record = |d| PunchRecord {
///     employee_id: "E1".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 2, d),
///     punch_in: ClockTime::from_hm(9, 0),
///     punch_out: None,
///     shift_name: "General".to_string(),
/// };
/// let table = PunchTable::new(PunchSchema::Combined, vec![record(20), record(3)]);
///
/// let month = infer_month(&table).unwrap();
/// assert_eq!((month.year, month.month, month.days_in_month), (2024, 2, 29));
/// ```
pub fn infer_month(punches: &PunchTable) -> EngineResult<MonthContext> {
    let earliest = punches.dates().min().ok_or(EngineError::NoPunchDates)?;
    let month = MonthContext::containing(earliest);
    debug!(
        earliest = %earliest,
        year = month.year,
        month = month.month,
        days_in_month = month.days_in_month,
        "Inferred reporting month"
    );
    Ok(month)
}
