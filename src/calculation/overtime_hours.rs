//! Overtime hours calculation functionality.
//!
//! This module turns scheduled duty days, leave taken and base hours into
//! monthly overtime hours, crediting each leave category as the leave policy
//! directs.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, LeaveBreakdown, LeaveTerm, OvertimeFormula};

/// Warning code attached when recorded leave exceeds the scheduled duty days.
pub const LEAVE_EXCEEDS_SCHEDULE_WARNING: &str = "LEAVE_EXCEEDS_SCHEDULE";

/// The result of an overtime hours calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct OvertimeHoursResult {
    /// Sum of all leave days.
    pub total_leave_days: u64,
    /// Scheduled days less leave, floored at zero.
    pub actual_worked_days: u32,
    /// `actual_worked_days × duty_hours`.
    pub total_hours: Decimal,
    /// Overtime hours, never negative.
    pub overtime_hours: Decimal,
    /// The expanded formula.
    pub formula: OvertimeFormula,
    /// Set when leave days exceed the scheduled days.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflows decimal range", what),
    }
}

/// Calculates overtime hours for a month.
///
/// `overtime = max(0, (scheduled - Σ leave) × duty + Σ days × credit - base)`
///
/// where each category's credit is taken from `policy`. Leave beyond the
/// scheduled days is still subtracted in the duty term, so the result can be
/// floored to zero; `actual_worked_days` never goes below zero.
///
/// # Arguments
///
/// * `scheduled_days` - Duty days scheduled for the shift in the month
/// * `leave` - Leave days taken, by category code
/// * `duty_hours` - Length of one duty shift in hours
/// * `base_hours` - Statutory base hours for the month
/// * `policy` - The leave policy deciding each category's credit
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `UnknownLeaveCategory` if `leave` names a code the policy does not
/// define, or `CalculationError` on decimal overflow.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::calculate_overtime_hours;
/// use overtime_engine::config::{LeaveCategory, LeaveCredit, LeavePolicy};
/// use overtime_engine::models::LeaveBreakdown;
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy {
///     name: "standard".to_string(),
///     description: String::new(),
///     categories: vec![LeaveCategory {
///         code: "vacation".to_string(),
///         name: "Vacation leave".to_string(),
///         credit: LeaveCredit::FixedHours { hours: Decimal::from(8) },
///     }],
///     pay: None,
/// };
/// let leave = LeaveBreakdown::new().with("vacation", 2);
///
/// let result = calculate_overtime_hours(
///     14,
///     &leave,
///     Decimal::from(24),
///     Decimal::from(112),
///     &policy,
///     1,
/// )
/// .unwrap();
///
/// // (14 - 2) × 24 + 2 × 8 - 112
/// assert_eq!(result.overtime_hours, Decimal::from(192));
/// ```
pub fn calculate_overtime_hours(
    scheduled_days: u32,
    leave: &LeaveBreakdown,
    duty_hours: Decimal,
    base_hours: Decimal,
    policy: &LeavePolicy,
    step_number: u32,
) -> EngineResult<OvertimeHoursResult> {
    if let Some((code, _)) = leave.iter().find(|(code, _)| policy.category(code).is_none()) {
        return Err(EngineError::UnknownLeaveCategory {
            policy: policy.name.clone(),
            category: code.to_string(),
        });
    }

    let mut leave_terms = Vec::with_capacity(policy.categories.len());
    let mut credited_hours = Decimal::ZERO;
    for category in &policy.categories {
        let days = leave.days(&category.code);
        let credit_hours_per_day = category.credit.hours_per_day(duty_hours);
        let term_hours = Decimal::from(days)
            .checked_mul(credit_hours_per_day)
            .ok_or_else(|| overflow("leave credit"))?;
        credited_hours = credited_hours
            .checked_add(term_hours)
            .ok_or_else(|| overflow("leave credit"))?;
        leave_terms.push(LeaveTerm {
            code: category.code.clone(),
            name: category.name.clone(),
            days,
            credit_hours_per_day,
            credited: credit_hours_per_day > Decimal::ZERO,
            credited_hours: term_hours,
        });
    }

    let total_leave_days = leave.total_days();
    let net_duty_days = i64::from(scheduled_days)
        - i64::try_from(total_leave_days).map_err(|_| overflow("leave day total"))?;
    let actual_worked_days = u32::try_from(net_duty_days.max(0)).unwrap_or(0);

    let duty_term_hours = Decimal::from(net_duty_days)
        .checked_mul(duty_hours)
        .ok_or_else(|| overflow("duty hours"))?;
    let total_hours = Decimal::from(actual_worked_days)
        .checked_mul(duty_hours)
        .ok_or_else(|| overflow("total hours"))?;
    let unclamped_hours = duty_term_hours
        .checked_add(credited_hours)
        .and_then(|h| h.checked_sub(base_hours))
        .ok_or_else(|| overflow("overtime hours"))?;
    let overtime_hours = unclamped_hours.max(Decimal::ZERO);

    debug!(
        scheduled_days,
        total_leave_days,
        %duty_term_hours,
        %credited_hours,
        %unclamped_hours,
        "Overtime formula evaluated"
    );

    let warning = (net_duty_days < 0).then(|| AuditWarning {
        code: LEAVE_EXCEEDS_SCHEDULE_WARNING.to_string(),
        message: format!(
            "{} leave days recorded against {} scheduled duty days; actual worked days set to 0",
            total_leave_days, scheduled_days
        ),
        severity: "low".to_string(),
    });

    let formula = OvertimeFormula {
        scheduled_days,
        duty_hours,
        leave_terms,
        net_duty_days,
        duty_term_hours,
        credited_hours,
        base_hours,
        unclamped_hours,
        overtime_hours,
    };

    let leave_input: serde_json::Map<String, serde_json::Value> = formula
        .leave_terms
        .iter()
        .map(|t| (t.code.clone(), serde_json::json!(t.days)))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_hours".to_string(),
        rule_name: "Overtime Hours Calculation".to_string(),
        source: format!("policy:{}", policy.name),
        input: serde_json::json!({
            "scheduled_days": scheduled_days,
            "leave": leave_input,
            "duty_hours": duty_hours.normalize().to_string(),
            "base_hours": base_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "actual_worked_days": actual_worked_days,
            "total_hours": total_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning: formula.to_string(),
    };

    Ok(OvertimeHoursResult {
        total_leave_days,
        actual_worked_days,
        total_hours,
        overtime_hours,
        formula,
        warning,
        audit_step,
    })
}
