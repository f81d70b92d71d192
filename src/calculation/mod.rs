//! Calculation logic for the overtime engine.
//!
//! This module contains the calculation stages for monthly overtime: duty-day
//! detection for the one-on one-off rotation, duty-day counts over date
//! ranges, base hours from the workday calendar, overtime hours with leave
//! credits, hourly rate lookup, and the monthly pay cap. [`compute_overtime`]
//! and [`calculate`] run them as one pipeline.

mod base_hours;
mod duty_day;
mod duty_range;
mod engine;
mod hourly_rate;
mod month_overview;
mod overtime_hours;
mod pay_cap;

pub use base_hours::{BaseHoursResult, UNSUPPORTED_YEAR_WARNING, calculate_base_hours};
pub use duty_day::{ROTATION_CYCLE_DAYS, elapsed_days, is_duty_day, is_shift_duty_day};
pub use duty_range::{
    DutyDayCountResult, count_duty_days, count_duty_days_closed_form, count_shift_duty_days,
    duty_dates,
};
pub use engine::{OvertimeCalculation, calculate, compute_overtime};
pub use hourly_rate::{HourlyRateLookup, MISSING_HOURLY_RATE_WARNING, lookup_hourly_rate};
pub use month_overview::{MonthOverview, month_overview};
pub use overtime_hours::{
    LEAVE_EXCEEDS_SCHEDULE_WARNING, OvertimeHoursResult, calculate_overtime_hours,
};
pub use pay_cap::{PayCapResult, apply_pay_cap};
