//! End-to-end report construction.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{PolicyPreset, ResolutionPolicy};
use crate::error::EngineResult;
use crate::models::{AttendanceReport, LeaveTable, PunchTable};

use super::aggregator::aggregate;
use super::month_inference::infer_month;

/// Infers the month, then resolves every employee-day into a report.
///
/// Rules written for the other punch layout are still applied as given, but
/// logged as a warning.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::NoPunchDates`] when the punch table
/// carries no usable date.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ResolutionPolicy;
/// use attendance_engine::models::{ClockTime, LeaveRow, LeaveTable, PunchRecord, PunchSchema, PunchTable};
/// use attendance_engine::resolution::build_report;
/// use chrono::NaiveDate;
///
/// let leaves = LeaveTable::new(vec![LeaveRow::from_columns(
///     "E1",
///     "Asha",
///     [("02-01-2024", "PT"), ("03-01-2024", "PL")],
/// )]);
/// let punches = PunchTable::new(
///     PunchSchema::Split,
///     vec![PunchRecord {
///         employee_id: "E1".to_string(),
///         date: NaiveDate::from_ymd_opt(2024, 1, 2),
///         punch_in: ClockTime::from_hm(9, 50),
///         punch_out: ClockTime::from_hm(18, 0),
///         shift_name: "General".to_string(),
///     }],
/// );
///
/// let report = build_report(&leaves, &punches, &ResolutionPolicy::default()).unwrap();
/// assert_eq!(report.month.days_in_month, 31);
/// assert_eq!(report.rows[0].late_count, 1);
/// assert_eq!(report.rows[0].pl_count, 1);
/// ```
pub fn build_report(
    leaves: &LeaveTable,
    punches: &PunchTable,
    policy: &ResolutionPolicy,
) -> EngineResult<AttendanceReport> {
    let start_time = Instant::now();
    let preset = policy.preset();
    let expected = PolicyPreset::for_schema(punches.schema);
    if preset.is_some_and(|preset| preset != expected) {
        warn!(
            schema = ?punches.schema,
            preset = ?preset,
            expected = ?expected,
            "Resolution rules do not match the punch layout"
        );
    }

    let month = infer_month(punches)?;
    let rows = aggregate(leaves, punches, &month, policy);

    let report = AttendanceReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        month,
        rows,
    };

    info!(
        report_id = %report.report_id,
        schema = ?punches.schema,
        preset = ?preset,
        year = report.month.year,
        month = report.month.month,
        employees = report.rows.len(),
        punches = punches.records.len(),
        late_days = report.rows.iter().map(|r| r.late_count).sum::<u32>(),
        leave_days = report.rows.iter().map(|r| r.leave_count).sum::<u32>(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Attendance report built"
    );

    Ok(report)
}
