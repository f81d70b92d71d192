//! Calculation result models for the overtime engine.
//!
//! This module contains the [`OvertimeResult`] type and the structures it is
//! built from: the structured base-hours explanation, the expanded overtime
//! formula, the pay outcome, and the audit trace wrapped around them in a
//! [`CalculationResult`].
//!
//! Explanations are kept as numbers and labels. Their `Display` impls give an
//! English rendering for logs and audit text; presentation layers are free to
//! render the same fields in another language.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::QueryPeriod;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The configuration table or policy that drove this step (e.g. "calendar:2026").
    pub source: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that were computed but deserve attention, such as
/// zero pay caused by a missing hourly rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// How base hours for a month were derived.
///
/// # Example
///
/// ```
/// use overtime_engine::models::BaseHoursExplanation;
/// use rust_decimal::Decimal;
///
/// let explanation = BaseHoursExplanation {
///     year: 2026,
///     month: 2,
///     days_in_month: 28,
///     workdays: 14,
///     rest_days: 14,
///     hours_per_workday: Decimal::from(8),
///     base_hours: Decimal::from(112),
///     calendar_supported: true,
/// };
///
/// assert_eq!(
///     explanation.to_string(),
///     "2026-02: 28 days - 14 rest days = 14 workdays × 8 h = 112 h"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseHoursExplanation {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// Government workdays in the month.
    pub workdays: u32,
    /// Weekend and holiday days (`days_in_month - workdays`).
    pub rest_days: u32,
    /// Statutory hours per workday.
    pub hours_per_workday: Decimal,
    /// Resulting base hours.
    pub base_hours: Decimal,
    /// False when no calendar exists for the year and base hours fell back to zero.
    pub calendar_supported: bool,
}

impl std::fmt::Display for BaseHoursExplanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.calendar_supported {
            return write!(
                f,
                "{:04}-{:02}: no workday calendar for {}, base hours {} h",
                self.year,
                self.month,
                self.year,
                self.base_hours.normalize()
            );
        }
        write!(
            f,
            "{:04}-{:02}: {} days - {} rest days = {} workdays × {} h = {} h",
            self.year,
            self.month,
            self.days_in_month,
            self.rest_days,
            self.workdays,
            self.hours_per_workday.normalize(),
            self.base_hours.normalize()
        )
    }
}

/// One leave category's contribution to the overtime formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTerm {
    /// Category code.
    pub code: String,
    /// Category display name.
    pub name: String,
    /// Days of this leave taken.
    pub days: u32,
    /// Hours credited per day of this leave (0 for excluded categories).
    pub credit_hours_per_day: Decimal,
    /// Whether the category credits hours at all.
    pub credited: bool,
    /// `days * credit_hours_per_day`.
    pub credited_hours: Decimal,
}

/// The fully expanded overtime formula for a month.
///
/// `overtime = max(0, (scheduled - Σ leave) × duty + Σ credited - base)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeFormula {
    /// Duty days scheduled for the shift in the month.
    pub scheduled_days: u32,
    /// Hours per duty shift.
    pub duty_hours: Decimal,
    /// Per-category terms in policy order.
    pub leave_terms: Vec<LeaveTerm>,
    /// `scheduled - Σ leave`; negative when leave exceeds the schedule.
    pub net_duty_days: i64,
    /// `net_duty_days × duty_hours`.
    pub duty_term_hours: Decimal,
    /// Sum of all credited leave hours.
    pub credited_hours: Decimal,
    /// Base hours subtracted.
    pub base_hours: Decimal,
    /// Value before flooring at zero.
    pub unclamped_hours: Decimal,
    /// Final overtime hours.
    pub overtime_hours: Decimal,
}

impl std::fmt::Display for OvertimeFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.scheduled_days)?;
        for term in &self.leave_terms {
            write!(f, " - {}", term.days)?;
        }
        write!(f, ") × {}", self.duty_hours.normalize())?;
        for term in self.leave_terms.iter().filter(|t| t.credited) {
            write!(
                f,
                " + {} × {}",
                term.days,
                term.credit_hours_per_day.normalize()
            )?;
        }
        write!(
            f,
            " - {} = {} h",
            self.base_hours.normalize(),
            self.unclamped_hours.normalize()
        )?;
        if self.unclamped_hours != self.overtime_hours {
            write!(f, ", floored to {} h", self.overtime_hours.normalize())?;
        }
        Ok(())
    }
}

/// Where an hourly rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The employee has a rate in the rate table.
    Configured,
    /// The employee has no rate; a zero rate was used.
    Missing,
}

/// Overtime pay after the monthly cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePay {
    /// Hourly overtime rate used.
    pub hourly_rate: Decimal,
    /// Whether the rate was configured or defaulted to zero.
    pub rate_source: RateSource,
    /// `overtime_hours × hourly_rate` before the cap.
    pub uncapped_pay: Decimal,
    /// Monthly cap in force, if any.
    pub monthly_cap: Option<Decimal>,
    /// Pay after the cap.
    pub overtime_pay: Decimal,
    /// Whether the cap reduced the pay.
    pub cap_applied: bool,
    /// Overtime hours covered by the pay.
    pub paid_hours: Decimal,
    /// Overtime hours left unpaid by the cap, to be rolled over.
    pub remaining_hours: Decimal,
}

/// The numeric outcome of a monthly overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// The month calculated.
    pub period: QueryPeriod,
    /// The shift calculated.
    pub shift_id: String,
    /// Duty days the shift is scheduled for in the month.
    pub total_scheduled_days: u32,
    /// Sum of all leave days.
    pub total_leave_days: u64,
    /// `max(0, scheduled - leave)`.
    pub actual_worked_days: u32,
    /// Hours per duty shift.
    pub duty_hours_per_shift: Decimal,
    /// `actual_worked_days × duty_hours_per_shift`.
    pub total_hours: Decimal,
    /// Statutory base hours for the month.
    pub base_hours: Decimal,
    /// Overtime hours, never negative.
    pub overtime_hours: Decimal,
    /// How base hours were derived.
    pub base_hours_explanation: BaseHoursExplanation,
    /// The expanded overtime formula.
    pub overtime_formula: OvertimeFormula,
    /// Pay outcome; absent when the policy reports hours only.
    pub pay: Option<OvertimePay>,
}

/// The complete, stamped result of an overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The leave policy applied.
    pub policy: String,
    /// The numeric outcome.
    pub result: OvertimeResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
