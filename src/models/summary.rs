//! Aggregated per-employee rows and the finished report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayStatus, LeaveType, MonthContext};

/// One output row: an employee's month at a glance.
///
/// `leave_count` always equals the sum of the four per-type counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Number of late days.
    pub late_count: u32,
    /// One slot per day of the month; index 0 is day 1. `None` is blank.
    pub day_statuses: Vec<Option<DayStatus>>,
    /// Total counted leave days.
    pub leave_count: u32,
    /// `PL` days.
    pub pl_count: u32,
    /// `CL` days.
    pub cl_count: u32,
    /// `LL` days.
    pub ll_count: u32,
    /// `LWP` days.
    pub lwp_count: u32,
}

impl EmployeeSummary {
    /// An empty row with `days` blank day slots.
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        days: usize,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            late_count: 0,
            day_statuses: vec![None; days],
            leave_count: 0,
            pl_count: 0,
            cl_count: 0,
            ll_count: 0,
            lwp_count: 0,
        }
    }

    /// Counts one leave day of the given type.
    pub fn record_leave(&mut self, leave: LeaveType) {
        match leave {
            LeaveType::Privileged => self.pl_count += 1,
            LeaveType::Casual => self.cl_count += 1,
            LeaveType::Ll => self.ll_count += 1,
            LeaveType::WithoutPay => self.lwp_count += 1,
        }
        self.leave_count += 1;
    }

    /// The status of day `day` (1-based).
    pub fn status(&self, day: u32) -> Option<DayStatus> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.day_statuses.get(index).copied().flatten()
    }
}

/// A finished month report, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Unique identifier for this report run.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The month the report covers.
    pub month: MonthContext,
    /// One row per employee, in leave-table order.
    pub rows: Vec<EmployeeSummary>,
}

impl AttendanceReport {
    /// Column headers of the tabular report, `Day 1`..`Day N` included.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::AttendanceReport;
    ///
    /// let headers = AttendanceReport::column_headers(28);
    /// assert_eq!(headers.len(), 3 + 28 + 5);
    /// assert_eq!(headers[3], "Day 1");
    /// assert_eq!(headers[30], "Day 28");
    /// assert_eq!(headers.last().map(String::as_str), Some("LWP Count"));
    /// ```
    pub fn column_headers(days_in_month: u32) -> Vec<String> {
        let mut headers: Vec<String> = ["Employee Id", "Employee Name", "Late Count"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        headers.extend((1..=days_in_month).map(|day| format!("Day {day}")));
        headers.extend(
            ["Leaves Count", "PL Count", "CL Count", "LL Count", "LWP Count"]
                .iter()
                .map(|h| h.to_string()),
        );
        headers
    }
}
