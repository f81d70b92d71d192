//! Query period model.
//!
//! This module contains the [`QueryPeriod`] type: the calendar month an
//! overtime calculation is made for, and the closed date range derived from it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Returns the number of days in a month, or `None` for an invalid month.
///
/// # Example
///
/// ```
/// use overtime_engine::models::days_in_month;
///
/// assert_eq!(days_in_month(2026, 2), Some(28));
/// assert_eq!(days_in_month(2028, 2), Some(29));
/// assert_eq!(days_in_month(2026, 13), None);
/// ```
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

#[derive(Deserialize)]
struct RawQueryPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawQueryPeriod> for QueryPeriod {
    type Error = EngineError;

    fn try_from(raw: RawQueryPeriod) -> EngineResult<Self> {
        QueryPeriod::new(raw.year, raw.month)
    }
}

/// A calendar month queried for overtime.
///
/// The period covers the closed range from the first to the last day of the
/// month. It can only be built for a valid month, so the range is always
/// available.
///
/// # Example
///
/// ```
/// use overtime_engine::models::QueryPeriod;
/// use chrono::NaiveDate;
///
/// let period = QueryPeriod::new(2026, 2).unwrap();
///
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(period.days_in_month(), 28);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQueryPeriod")]
pub struct QueryPeriod {
    year: i32,
    month: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl QueryPeriod {
    /// Creates the period for a year and month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `month` is outside 1-12 or the year is out of
    /// the supported date range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("{} is not between 1 and 12", month),
            ));
        }

        let out_of_range = || EngineError::invalid_input("year", format!("{} is out of range", year));
        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let length = days_in_month(year, month).ok_or_else(out_of_range)?;
        let end_date = NaiveDate::from_ymd_opt(year, month, length).ok_or_else(out_of_range)?;

        Ok(Self {
            year,
            month,
            start_date,
            end_date,
        })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the month (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.end_date.day()
    }

    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl std::fmt::Display for QueryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
