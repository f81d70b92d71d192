//! Duty-day detection for the one-on one-off rotation.
//!
//! A shift works its reference start date and every second calendar day after
//! it. Membership is decided from the parity of whole days elapsed since the
//! reference date, computed on [`NaiveDate`] so no time-of-day or daylight
//! saving offset can shift a day boundary.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Number of calendar days in one rotation cycle (one on, one off).
pub const ROTATION_CYCLE_DAYS: i64 = 2;

/// Returns the whole calendar days from `reference_start` to `date`.
///
/// Negative when `date` is before the reference date.
pub fn elapsed_days(date: NaiveDate, reference_start: NaiveDate) -> i64 {
    (date - reference_start).num_days()
}

/// Determines whether `date` is a duty day for a shift starting on `reference_start`.
///
/// The reference date is day 0 and always a duty day. Dates before it are
/// never duty days.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::is_duty_day;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
///
/// assert!(is_duty_day(reference, reference));
/// assert!(!is_duty_day(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(), reference));
/// assert!(is_duty_day(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(), reference));
/// assert!(!is_duty_day(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(), reference));
/// ```
pub fn is_duty_day(date: NaiveDate, reference_start: NaiveDate) -> bool {
    let elapsed = elapsed_days(date, reference_start);
    elapsed >= 0 && elapsed % ROTATION_CYCLE_DAYS == 0
}

/// Determines whether `date` is a duty day for a configured shift.
///
/// # Errors
///
/// Returns `UnknownShift` if `shift_id` is not in the roster.
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::is_shift_duty_day;
/// use overtime_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
/// let on_duty = is_shift_duty_day(date, "A", loader.config())?;
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn is_shift_duty_day(date: NaiveDate, shift_id: &str, config: &EngineConfig) -> EngineResult<bool> {
    let shift = config.shift(shift_id)?;
    Ok(is_duty_day(date, shift.reference_start_date))
}
