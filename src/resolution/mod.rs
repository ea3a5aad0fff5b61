//! Attendance resolution for the reporting month.
//!
//! This module turns the leave table and the punch table into per-employee
//! summaries: it infers the month, checks punch completeness and shift
//! lateness, resolves each employee-day and aggregates the counters.

mod aggregator;
mod day_resolver;
mod lateness;
mod month_inference;
mod pipeline;
mod punch_check;

pub use aggregator::aggregate;
pub use day_resolver::{DayResolution, DayResolver};
pub use lateness::check_lateness;
pub use month_inference::infer_month;
pub use pipeline::build_report;
pub use punch_check::{PunchCompleteness, check_completeness};
