//! Duty-day aggregation over date ranges.
//!
//! This module counts and lists the duty days of a shift within a closed date
//! range, and aggregates a configured shift over a query month.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, QueryPeriod};

use super::duty_day::{ROTATION_CYCLE_DAYS, elapsed_days, is_duty_day};

/// The result of counting a shift's duty days in a query month.
#[derive(Debug, Clone)]
pub struct DutyDayCountResult {
    /// Number of duty days in the month.
    pub duty_days: u32,
    /// The reference start date of the shift.
    pub reference_start_date: NaiveDate,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

fn check_range(start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    if start > end {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(())
}

/// Lists the duty dates in `[start, end]` for a shift starting on `reference_start`.
///
/// # Errors
///
/// Returns `InvalidRange` if `start` is after `end`.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::duty_dates;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
/// let dates = duty_dates(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
///     reference,
/// )
/// .unwrap();
///
/// assert_eq!(dates.len(), 3); // Jan 2, 4, 6
/// ```
pub fn duty_dates(
    start: NaiveDate,
    end: NaiveDate,
    reference_start: NaiveDate,
) -> EngineResult<Vec<NaiveDate>> {
    check_range(start, end)?;
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_duty_day(*d, reference_start))
        .collect())
}

/// Counts duty days in `[start, end]`, inclusive of both endpoints.
///
/// Every date in the range is checked with [`is_duty_day`].
///
/// # Errors
///
/// Returns `InvalidRange` if `start` is after `end`.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::count_duty_days;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
/// let count = count_duty_days(
///     NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
///     reference,
/// )
/// .unwrap();
///
/// assert_eq!(count, 14);
/// ```
pub fn count_duty_days(
    start: NaiveDate,
    end: NaiveDate,
    reference_start: NaiveDate,
) -> EngineResult<u32> {
    check_range(start, end)?;
    let count = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_duty_day(*d, reference_start))
        .count();
    u32::try_from(count).map_err(|_| EngineError::CalculationError {
        message: format!("duty day count {} overflows", count),
    })
}

/// Counts duty days in `[start, end]` without visiting each date.
///
/// Finds the first duty date at or after `start` and counts every second day
/// from there. Always agrees with [`count_duty_days`].
///
/// # Errors
///
/// Returns `InvalidRange` if `start` is after `end`.
pub fn count_duty_days_closed_form(
    start: NaiveDate,
    end: NaiveDate,
    reference_start: NaiveDate,
) -> EngineResult<u32> {
    check_range(start, end)?;

    let first_offset = if start <= reference_start {
        elapsed_days(reference_start, start)
    } else {
        elapsed_days(start, reference_start).rem_euclid(ROTATION_CYCLE_DAYS)
    };
    let span = elapsed_days(end, start);
    if first_offset > span {
        return Ok(0);
    }

    let count = (span - first_offset) / ROTATION_CYCLE_DAYS + 1;
    u32::try_from(count).map_err(|_| EngineError::CalculationError {
        message: format!("duty day count {} overflows", count),
    })
}

/// Counts the duty days of a configured shift in a query month.
///
/// # Errors
///
/// Returns `UnknownShift` if `shift_id` is not in the roster.
pub fn count_shift_duty_days(
    period: &QueryPeriod,
    shift_id: &str,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<DutyDayCountResult> {
    let shift = config.shift(shift_id)?;
    let reference = shift.reference_start_date;
    let duty_days = count_duty_days(period.start_date(), period.end_date(), reference)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "duty_day_count".to_string(),
        rule_name: "Scheduled Duty Days".to_string(),
        source: format!("roster:{}", shift_id),
        input: serde_json::json!({
            "shift_id": shift_id,
            "reference_start_date": reference.to_string(),
            "start_date": period.start_date().to_string(),
            "end_date": period.end_date().to_string()
        }),
        output: serde_json::json!({
            "duty_days": duty_days
        }),
        reasoning: format!(
            "{} works every second day from {}: {} duty days between {} and {}",
            shift.name,
            reference,
            duty_days,
            period.start_date(),
            period.end_date()
        ),
    };

    Ok(DutyDayCountResult {
        duty_days,
        reference_start_date: reference,
        audit_step,
    })
}
