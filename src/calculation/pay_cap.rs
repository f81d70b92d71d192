//! Overtime pay and monthly cap functionality.
//!
//! This module converts overtime hours into pay at the employee's hourly rate
//! and applies the policy's monthly pay cap. When the cap bites, the hours it
//! covers are rounded up to whole hours and the rest are reported as
//! remaining hours for rollover.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, OvertimePay, RateSource};

/// The result of applying the monthly pay cap, including the audit step.
#[derive(Debug, Clone)]
pub struct PayCapResult {
    /// The pay outcome.
    pub pay: OvertimePay,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay and applies the monthly cap.
///
/// - `uncapped_pay = overtime_hours × hourly_rate`
/// - `overtime_pay = min(uncapped_pay, monthly_cap)`
/// - when the cap bites and the rate is positive, `paid_hours =
///   ceil(monthly_cap / hourly_rate)` and `remaining_hours = max(0,
///   overtime_hours - paid_hours)`; otherwise all hours are paid.
///
/// # Arguments
///
/// * `overtime_hours` - Overtime hours for the month
/// * `hourly_rate` - The hourly overtime rate
/// * `rate_source` - Whether the rate was configured or defaulted
/// * `monthly_cap` - The monthly ceiling on pay; uncapped when `None`
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` on decimal overflow.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::apply_pay_cap;
/// use overtime_engine::models::RateSource;
/// use rust_decimal::Decimal;
///
/// let result = apply_pay_cap(
///     Decimal::from(120),
///     Decimal::from(182),
///     RateSource::Configured,
///     Some(Decimal::from(19000)),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.pay.uncapped_pay, Decimal::from(21840));
/// assert_eq!(result.pay.overtime_pay, Decimal::from(19000));
/// assert_eq!(result.pay.paid_hours, Decimal::from(105));
/// assert_eq!(result.pay.remaining_hours, Decimal::from(15));
/// ```
pub fn apply_pay_cap(
    overtime_hours: Decimal,
    hourly_rate: Decimal,
    rate_source: RateSource,
    monthly_cap: Option<Decimal>,
    step_number: u32,
) -> EngineResult<PayCapResult> {
    let uncapped_pay =
        overtime_hours
            .checked_mul(hourly_rate)
            .ok_or_else(|| EngineError::CalculationError {
                message: "overtime pay overflows decimal range".to_string(),
            })?;

    let cap = monthly_cap.filter(|cap| uncapped_pay > *cap);
    let (overtime_pay, paid_hours, remaining_hours) = match cap {
        Some(cap) if hourly_rate > Decimal::ZERO => {
            let paid_hours = cap
                .checked_div(hourly_rate)
                .ok_or_else(|| EngineError::CalculationError {
                    message: "paid hours overflow decimal range".to_string(),
                })?
                .ceil();
            let remaining_hours = (overtime_hours - paid_hours).max(Decimal::ZERO);
            (cap, paid_hours, remaining_hours)
        }
        Some(cap) => (cap, overtime_hours, Decimal::ZERO),
        None => (uncapped_pay, overtime_hours, Decimal::ZERO),
    };
    let cap_applied = cap.is_some();

    let reasoning = match monthly_cap {
        Some(limit) if cap_applied => format!(
            "{} h × {} = {} (capped at monthly maximum {}; {} h paid, {} h remaining)",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            uncapped_pay.normalize(),
            limit.normalize(),
            paid_hours.normalize(),
            remaining_hours.normalize()
        ),
        Some(limit) => format!(
            "{} h × {} = {} (within monthly maximum {})",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            uncapped_pay.normalize(),
            limit.normalize()
        ),
        None => format!(
            "{} h × {} = {} (no monthly cap)",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            uncapped_pay.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay_cap".to_string(),
        rule_name: "Overtime Pay and Monthly Cap".to_string(),
        source: "policy:pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "monthly_cap": monthly_cap.map(|c| c.normalize().to_string())
        }),
        output: serde_json::json!({
            "uncapped_pay": uncapped_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "cap_applied": cap_applied,
            "paid_hours": paid_hours.normalize().to_string(),
            "remaining_hours": remaining_hours.normalize().to_string()
        }),
        reasoning,
    };

    let pay = OvertimePay {
        hourly_rate,
        rate_source,
        uncapped_pay,
        monthly_cap,
        overtime_pay,
        cap_applied,
        paid_hours,
        remaining_hours,
    };

    Ok(PayCapResult { pay, audit_step })
}
