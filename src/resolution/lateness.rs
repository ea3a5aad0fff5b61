//! Shift lateness check.

use crate::config::ResolutionPolicy;
use crate::models::{ClockTime, DayStatus, NamedShift};

/// Decides between on-time `PT` and a late status for a punch-in.
///
/// Only the two named shifts have thresholds; any other shift name is on
/// time. A punch exactly at the threshold is on time.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ResolutionPolicy;
/// use attendance_engine::models::{ClockTime, DayStatus};
/// use attendance_engine::resolution::check_lateness;
///
/// let policy = ResolutionPolicy::dual_punch();
/// let late = check_lateness("General", ClockTime::at(9, 50), &policy);
/// assert_eq!(late.to_string(), "GSL 09:50");
///
/// let on_time = check_lateness("General", ClockTime::at(9, 45), &policy);
/// assert_eq!(on_time, DayStatus::Present);
/// ```
pub fn check_lateness(shift_name: &str, punch_in: ClockTime, policy: &ResolutionPolicy) -> DayStatus {
    match NamedShift::from_name(shift_name) {
        Some(shift) if punch_in > policy.late_after(shift) => DayStatus::Late { shift, punch_in },
        _ => DayStatus::Present,
    }
}
