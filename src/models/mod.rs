//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock;
mod day_status;
mod leave;
mod month;
mod punch;
mod summary;

pub use clock::ClockTime;
pub use day_status::{DayStatus, UnknownDayStatus};
pub use leave::{
    DAY_COLUMN_FORMAT, LeaveCode, LeaveRow, LeaveTable, LeaveType, day_column_name,
    parse_day_column,
};
pub use month::MonthContext;
pub use punch::{EVENING_SHIFT, GENERAL_SHIFT, NamedShift, PunchRecord, PunchSchema, PunchTable};
pub use summary::{AttendanceReport, EmployeeSummary};
