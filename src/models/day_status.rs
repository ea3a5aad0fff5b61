//! Resolved per-day attendance statuses.
//!
//! The literal renderings are part of the output contract: the spreadsheet
//! palette and API consumers key on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ClockTime, LeaveType, NamedShift};

/// The resolved status of one employee-day.
///
/// A blank day is represented as `Option::<DayStatus>::None` by callers.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ClockTime, DayStatus, NamedShift};
///
/// let late = DayStatus::Late {
///     shift: NamedShift::General,
///     punch_in: ClockTime::from_hm(9, 50).unwrap(),
/// };
/// assert_eq!(late.to_string(), "GSL 09:50");
/// assert_eq!("GSL 09:50".parse::<DayStatus>().unwrap(), late);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStatus {
    /// `HD`
    HalfDay,
    /// `WOff`
    WeeklyOff,
    /// `Not Enrolled`
    NotEnrolled,
    /// `PL`, `CL`, `LL` or `LWP`
    Leave(LeaveType),
    /// `Half Day Leave`: half-day leave with a recorded punch.
    HalfDayLeave,
    /// `Half Day`: half-day leave under the fixed-literal policy.
    HalfDayFixed,
    /// `AT`: absent, no usable punch where one was expected.
    Absent,
    /// `PT`: present and on time.
    Present,
    /// `WFH`
    WorkFromHome,
    /// `Punch Miss`: no punch record under the single-punch policy.
    PunchMiss,
    /// `Morning Punch Miss`: punch-out recorded without a punch-in.
    MorningPunchMiss,
    /// `Evening Punch Miss`: punch-in recorded without a punch-out.
    EveningPunchMiss,
    /// `GSL HH:MM` / `ESL HH:MM`: late on a named shift.
    Late {
        /// The shift whose threshold was exceeded.
        shift: NamedShift,
        /// The punch-in time that was late.
        punch_in: ClockTime,
    },
}

impl DayStatus {
    /// Returns true for the late statuses.
    pub fn is_late(&self) -> bool {
        matches!(self, DayStatus::Late { .. })
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatus::HalfDay => f.write_str("HD"),
            DayStatus::WeeklyOff => f.write_str("WOff"),
            DayStatus::NotEnrolled => f.write_str("Not Enrolled"),
            DayStatus::Leave(leave) => f.write_str(leave.code()),
            DayStatus::HalfDayLeave => f.write_str("Half Day Leave"),
            DayStatus::HalfDayFixed => f.write_str("Half Day"),
            DayStatus::Absent => f.write_str("AT"),
            DayStatus::Present => f.write_str("PT"),
            DayStatus::WorkFromHome => f.write_str("WFH"),
            DayStatus::PunchMiss => f.write_str("Punch Miss"),
            DayStatus::MorningPunchMiss => f.write_str("Morning Punch Miss"),
            DayStatus::EveningPunchMiss => f.write_str("Evening Punch Miss"),
            DayStatus::Late { shift, punch_in } => write!(f, "{} {}", shift.late_tag(), punch_in),
        }
    }
}

/// Error returned when a string is not a day status literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day status '{0}'")]
pub struct UnknownDayStatus(pub String);

impl FromStr for DayStatus {
    type Err = UnknownDayStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "HD" => DayStatus::HalfDay,
            "WOff" => DayStatus::WeeklyOff,
            "Not Enrolled" => DayStatus::NotEnrolled,
            "PL" => DayStatus::Leave(LeaveType::Privileged),
            "CL" => DayStatus::Leave(LeaveType::Casual),
            "LL" => DayStatus::Leave(LeaveType::Ll),
            "LWP" => DayStatus::Leave(LeaveType::WithoutPay),
            "Half Day Leave" => DayStatus::HalfDayLeave,
            "Half Day" => DayStatus::HalfDayFixed,
            "AT" => DayStatus::Absent,
            "PT" => DayStatus::Present,
            "WFH" => DayStatus::WorkFromHome,
            "Punch Miss" => DayStatus::PunchMiss,
            "Morning Punch Miss" => DayStatus::MorningPunchMiss,
            "Evening Punch Miss" => DayStatus::EveningPunchMiss,
            other => {
                let unknown = || UnknownDayStatus(other.to_string());
                let (tag, time) = other.split_once(' ').ok_or_else(unknown)?;
                let shift = match tag {
                    "GSL" => NamedShift::General,
                    "ESL" => NamedShift::Evening,
                    _ => return Err(unknown()),
                };
                let punch_in = time.parse::<ClockTime>().map_err(|_| unknown())?;
                DayStatus::Late { shift, punch_in }
            }
        };
        Ok(status)
    }
}

impl Serialize for DayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
