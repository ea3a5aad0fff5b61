//! Minute-of-day clock values.
//!
//! Punch times and lateness thresholds are compared as integers, never as
//! formatted strings.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// A time of day with minute precision.
///
/// Renders and parses as zero-padded `HH:MM`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ClockTime;
///
/// let threshold: ClockTime = "09:45".parse().unwrap();
/// let punch = ClockTime::from_hm(9, 50).unwrap();
/// assert!(punch > threshold);
/// assert_eq!(punch.to_string(), "09:50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a clock time in a `const` context.
    ///
    /// Out-of-range parts fail const evaluation; use [`ClockTime::from_hm`]
    /// for runtime values.
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour * 60 + minute)
    }

    /// Builds a clock time from hours and minutes, rejecting out-of-range parts.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    /// Truncates a time to minute precision.
    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Takes the time-of-day of a timestamp, truncated to the minute.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::from_time(datetime.time())
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(self) -> u16 {
        self.0
    }

    /// Hour component.
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component.
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidClockTime {
            value: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
