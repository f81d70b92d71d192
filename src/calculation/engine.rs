//! Monthly overtime calculation pipeline.
//!
//! [`compute_overtime`] runs every stage of a calculation against a loaded
//! [`EngineConfig`] and is deterministic for a given request and
//! configuration. [`calculate`] wraps it with a calculation id, timestamp,
//! engine version and duration.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, OvertimeRequest, OvertimeResult,
};

use super::base_hours::calculate_base_hours;
use super::duty_range::count_shift_duty_days;
use super::hourly_rate::lookup_hourly_rate;
use super::overtime_hours::calculate_overtime_hours;
use super::pay_cap::apply_pay_cap;

/// The outcome of [`compute_overtime`] before it is stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeCalculation {
    /// The leave policy applied.
    pub policy: String,
    /// The numeric outcome.
    pub result: OvertimeResult,
    /// Audit steps in the order they were applied.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Computes monthly overtime hours, and pay when the policy has a pay stage.
///
/// Stages run in order: input validation, base hours, scheduled duty days,
/// overtime hours, then hourly rate lookup and the monthly pay cap.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed requests, `UnknownPolicy`,
/// `UnknownShift` or `UnknownLeaveCategory` for references the configuration
/// does not define, and `UnsupportedYear` when the year has no calendar and
/// the roster rejects unsupported years. No partial result is returned.
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::compute_overtime;
/// use overtime_engine::config::ConfigLoader;
/// use overtime_engine::models::OvertimeRequest;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let request = OvertimeRequest::new("FF-001", "A", 2026, 2, Decimal::from(24))
///     .with_leave("vacation", 2);
///
/// let calculation = compute_overtime(&request, loader.config())?;
/// assert_eq!(calculation.result.overtime_hours, Decimal::from(192));
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn compute_overtime(
    request: &OvertimeRequest,
    config: &EngineConfig,
) -> EngineResult<OvertimeCalculation> {
    let period = request.validate()?;
    let policy = config.policy(request.policy.as_deref())?;
    config.shift(&request.shift_id)?;

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let base = calculate_base_hours(&period, config, step_number)?;
    audit_steps.push(base.audit_step);
    warnings.extend(base.warning);
    step_number += 1;

    let duty = count_shift_duty_days(&period, &request.shift_id, config, step_number)?;
    audit_steps.push(duty.audit_step);
    step_number += 1;

    debug!(
        employee_id = %request.employee_id,
        shift_id = %request.shift_id,
        period = %period,
        base_hours = %base.base_hours,
        duty_days = duty.duty_days,
        "Base hours and duty days resolved"
    );

    let hours = calculate_overtime_hours(
        duty.duty_days,
        &request.leave,
        request.duty_hours_per_shift,
        base.base_hours,
        policy,
        step_number,
    )?;
    audit_steps.push(hours.audit_step);
    warnings.extend(hours.warning);
    step_number += 1;

    let pay = match &policy.pay {
        Some(pay_policy) => {
            let rate = lookup_hourly_rate(&request.employee_id, config, step_number);
            audit_steps.push(rate.audit_step);
            warnings.extend(rate.warning);
            step_number += 1;

            let capped = apply_pay_cap(
                hours.overtime_hours,
                rate.rate,
                rate.source,
                pay_policy.monthly_cap,
                step_number,
            )?;
            audit_steps.push(capped.audit_step);
            Some(capped.pay)
        }
        None => None,
    };

    let result = OvertimeResult {
        period,
        shift_id: request.shift_id.clone(),
        total_scheduled_days: duty.duty_days,
        total_leave_days: hours.total_leave_days,
        actual_worked_days: hours.actual_worked_days,
        duty_hours_per_shift: request.duty_hours_per_shift,
        total_hours: hours.total_hours,
        base_hours: base.base_hours,
        overtime_hours: hours.overtime_hours,
        base_hours_explanation: base.explanation,
        overtime_formula: hours.formula,
        pay,
    };

    Ok(OvertimeCalculation {
        policy: policy.name.clone(),
        result,
        audit_steps,
        warnings,
    })
}

/// Computes overtime and stamps the result with id, timestamp and duration.
///
/// # Errors
///
/// Fails exactly when [`compute_overtime`] fails.
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::calculate;
/// use overtime_engine::config::ConfigLoader;
/// use overtime_engine::models::OvertimeRequest;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let request = OvertimeRequest::new("FF-001", "A", 2026, 2, Decimal::from(24));
///
/// let result = calculate(&request, loader.config())?;
/// assert_eq!(result.employee_id, "FF-001");
/// assert_eq!(result.audit_trace.steps.len(), 5);
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn calculate(
    request: &OvertimeRequest,
    config: &EngineConfig,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    let calculation = compute_overtime(request, config)?;
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    info!(
        employee_id = %request.employee_id,
        shift_id = %request.shift_id,
        period = %calculation.result.period,
        policy = %calculation.policy,
        overtime_hours = %calculation.result.overtime_hours,
        warnings = calculation.warnings.len(),
        duration_us,
        "Overtime calculation completed"
    );

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: request.employee_id.clone(),
        policy: calculation.policy,
        result: calculation.result,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}
