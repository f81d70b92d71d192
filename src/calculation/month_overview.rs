//! Month overview functionality.
//!
//! An overview reports the figures a roster planner looks at before any
//! leave is entered: the month's base hours and, for a chosen shift, its
//! scheduled duty dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{BaseHoursExplanation, QueryPeriod};

use super::base_hours::calculate_base_hours;
use super::duty_range::duty_dates;

/// Base hours and shift schedule for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    /// The month described.
    pub period: QueryPeriod,
    /// How the month's base hours are derived.
    pub base_hours_explanation: BaseHoursExplanation,
    /// The shift described, if one was requested.
    pub shift_id: Option<String>,
    /// Duty days of the shift in the month.
    pub duty_days: Option<u32>,
    /// Duty dates of the shift in the month; empty when no shift was requested.
    pub duty_dates: Vec<NaiveDate>,
}

/// Builds the overview for a month and, optionally, one shift.
///
/// # Errors
///
/// Returns `InvalidInput` for an invalid month, `UnknownShift` for an
/// unconfigured shift, and `UnsupportedYear` when the year has no calendar
/// and the roster rejects unsupported years.
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::month_overview;
/// use overtime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let overview = month_overview(2026, 3, Some("B"), loader.config())?;
///
/// assert_eq!(overview.duty_days, Some(15));
/// assert_eq!(overview.base_hours_explanation.workdays, 22);
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn month_overview(
    year: i32,
    month: u32,
    shift_id: Option<&str>,
    config: &EngineConfig,
) -> EngineResult<MonthOverview> {
    let period = QueryPeriod::new(year, month)?;
    let base = calculate_base_hours(&period, config, 1)?;

    let dates = match shift_id {
        Some(id) => {
            let shift = config.shift(id)?;
            duty_dates(period.start_date(), period.end_date(), shift.reference_start_date)?
        }
        None => Vec::new(),
    };
    let duty_days = match shift_id {
        Some(_) => Some(u32::try_from(dates.len()).unwrap_or(u32::MAX)),
        None => None,
    };

    Ok(MonthOverview {
        period,
        base_hours_explanation: base.explanation,
        shift_id: shift_id.map(str::to_string),
        duty_days,
        duty_dates: dates,
    })
}
