//! Day status resolution.
//!
//! Merges one HRMS leave code with the punch records of the same employee and
//! day into a single [`DayStatus`]. Rules are checked in a fixed order and the
//! first match wins:
//!
//! 1. no code: blank
//! 2. `HD`, `WOff`, `Not Enrolled`: the literal code
//! 3. `PL`, `CL`, `LL`, `LWP`: the literal code, counted as leave
//! 4. `PL/PT`, `CL/PT`: per [`HalfDayLeavePolicy`]
//! 5. `PT`: punch completeness, then shift lateness
//! 6. `WFH`: the literal code, no lateness check

use serde::{Deserialize, Serialize};

use crate::config::{HalfDayLeavePolicy, MissingPunchPolicy, ResolutionPolicy};
use crate::models::{DayStatus, LeaveCode, LeaveType, PunchRecord, PunchSchema};

use super::lateness::check_lateness;
use super::punch_check::{PunchCompleteness, check_completeness};

/// The outcome of resolving one employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResolution {
    /// The resolved status; `None` leaves the day blank.
    pub status: Option<DayStatus>,
    /// Whether the day counts towards the late total.
    pub is_late: bool,
    /// The leave counter to increment, if any.
    pub leave: Option<LeaveType>,
}

impl DayResolution {
    /// A blank day with no counters touched.
    pub const BLANK: Self = Self {
        status: None,
        is_late: false,
        leave: None,
    };

    fn status(status: DayStatus) -> Self {
        Self {
            status: Some(status),
            is_late: status.is_late(),
            leave: None,
        }
    }

    fn leave(leave: LeaveType) -> Self {
        Self {
            status: Some(DayStatus::Leave(leave)),
            is_late: false,
            leave: Some(leave),
        }
    }
}

/// Resolves days under one rule table and one punch schema.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ResolutionPolicy;
/// use attendance_engine::models::{ClockTime, DayStatus, LeaveCode, PunchRecord, PunchSchema};
/// use attendance_engine::resolution::DayResolver;
///
/// let policy = ResolutionPolicy::dual_punch();
/// let resolver = DayResolver::new(&policy, PunchSchema::Split);
/// let punch = PunchRecord {
///     employee_id: "E1".to_string(),
///     date: None,
///     punch_in: ClockTime::from_hm(9, 50),
///     punch_out: ClockTime::from_hm(18, 0),
///     shift_name: "General".to_string(),
/// };
///
/// let day = resolver.resolve(Some(LeaveCode::Present), &[&punch]);
/// assert_eq!(day.status.map(|s| s.to_string()), Some("GSL 09:50".to_string()));
/// assert!(day.is_late);
///
/// let absent = resolver.resolve(Some(LeaveCode::Present), &[]);
/// assert_eq!(absent.status, Some(DayStatus::Absent));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DayResolver<'a> {
    policy: &'a ResolutionPolicy,
    schema: PunchSchema,
}

impl<'a> DayResolver<'a> {
    /// Creates a resolver for the given rules and punch schema.
    pub fn new(policy: &'a ResolutionPolicy, schema: PunchSchema) -> Self {
        Self { policy, schema }
    }

    /// Resolves one day.
    ///
    /// `punches` are the records of this employee on this date, in source
    /// order; only the first one is consulted.
    pub fn resolve(&self, code: Option<LeaveCode>, punches: &[&PunchRecord]) -> DayResolution {
        let Some(code) = code else {
            return DayResolution::BLANK;
        };
        let first = punches.first().copied();

        match code {
            LeaveCode::HalfDay => DayResolution::status(DayStatus::HalfDay),
            LeaveCode::WeeklyOff => DayResolution::status(DayStatus::WeeklyOff),
            LeaveCode::NotEnrolled => DayResolution::status(DayStatus::NotEnrolled),
            LeaveCode::Leave(leave) => DayResolution::leave(leave),
            LeaveCode::HalfDayLeave(_) => DayResolution::status(self.resolve_half_day(first)),
            LeaveCode::Present => DayResolution::status(self.resolve_present(first)),
            LeaveCode::WorkFromHome => DayResolution::status(DayStatus::WorkFromHome),
        }
    }

    fn resolve_half_day(&self, punch: Option<&PunchRecord>) -> DayStatus {
        match self.policy.half_day_leave {
            HalfDayLeavePolicy::FixedLiteral => DayStatus::HalfDayFixed,
            HalfDayLeavePolicy::PunchDependent => match punch {
                Some(record) if record.punch_in.is_some() || record.punch_out.is_some() => {
                    DayStatus::HalfDayLeave
                }
                _ => DayStatus::Absent,
            },
        }
    }

    fn resolve_present(&self, punch: Option<&PunchRecord>) -> DayStatus {
        let Some(record) = punch else {
            return match self.policy.missing_punch {
                MissingPunchPolicy::Absent => DayStatus::Absent,
                MissingPunchPolicy::PunchMiss => DayStatus::PunchMiss,
            };
        };

        // A partial punch wins over lateness, even when the punch-in was late.
        match check_completeness(record, self.schema) {
            PunchCompleteness::MissingBoth => DayStatus::Absent,
            PunchCompleteness::MissingIn => DayStatus::MorningPunchMiss,
            PunchCompleteness::MissingOut => DayStatus::EveningPunchMiss,
            PunchCompleteness::Complete { punch_in } => {
                check_lateness(&record.shift_name, punch_in, self.policy)
            }
        }
    }
}
