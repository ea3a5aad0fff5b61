//! The reporting month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The single calendar month a run reports on.
///
/// Every day-column lookup and punch-date filter goes through this value.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthContext;
/// use chrono::NaiveDate;
///
/// let month = MonthContext::containing(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap());
/// assert_eq!(month.days_in_month, 29);
/// assert_eq!(month.date(29), NaiveDate::from_ymd_opt(2024, 2, 29));
/// assert_eq!(month.date(30), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthContext {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Number of days in the month (28-31).
    pub days_in_month: u32,
}

impl MonthContext {
    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let (year, month) = (date.year(), date.month());
        Self {
            year,
            month,
            days_in_month: days_in_month(year, month),
        }
    }

    /// The date of day `day` (1-based) of this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Iterates every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month).filter_map(move |day| self.date(day))
    }

    /// Returns true if `date` falls in this month and year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Number of days in a month, following the Gregorian calendar.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
