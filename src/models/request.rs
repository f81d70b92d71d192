//! Overtime request model.
//!
//! This module defines [`OvertimeRequest`], the parsed input a presentation
//! layer hands to the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{LeaveBreakdown, QueryPeriod};

/// Input for a single monthly overtime calculation.
///
/// # Example
///
/// ```
/// use overtime_engine::models::OvertimeRequest;
/// use rust_decimal::Decimal;
///
/// let request = OvertimeRequest::new("FF-001", "A", 2026, 2, Decimal::from(24))
///     .with_leave("vacation", 2);
///
/// let period = request.validate().unwrap();
/// assert_eq!(period.days_in_month(), 28);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Identifier used to look up the hourly rate.
    pub employee_id: String,
    /// The shift the employee works on.
    pub shift_id: String,
    /// Calendar year of the query month.
    pub year: i32,
    /// Query month (1-12).
    pub month: u32,
    /// Length of one duty shift in hours.
    pub duty_hours_per_shift: Decimal,
    /// Leave days taken in the month, by category.
    #[serde(default)]
    pub leave: LeaveBreakdown,
    /// Leave policy to apply; the roster default when absent.
    #[serde(default)]
    pub policy: Option<String>,
}

impl OvertimeRequest {
    /// Creates a request with no leave and the default policy.
    pub fn new(
        employee_id: impl Into<String>,
        shift_id: impl Into<String>,
        year: i32,
        month: u32,
        duty_hours_per_shift: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            shift_id: shift_id.into(),
            year,
            month,
            duty_hours_per_shift,
            leave: LeaveBreakdown::new(),
            policy: None,
        }
    }

    /// Returns the request with `days` of leave recorded for `code`.
    pub fn with_leave(mut self, code: impl Into<String>, days: u32) -> Self {
        self.leave.set(code, days);
        self
    }

    /// Returns the request with an explicit leave policy.
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Checks the request fields and returns the query period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when an identifier is blank, the duty length is
    /// not positive, or the month is invalid.
    pub fn validate(&self) -> EngineResult<QueryPeriod> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::invalid_input("employee_id", "must not be empty"));
        }
        if self.shift_id.trim().is_empty() {
            return Err(EngineError::invalid_input("shift_id", "must not be empty"));
        }
        if self.duty_hours_per_shift <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "duty_hours_per_shift",
                format!("must be greater than zero, got {}", self.duty_hours_per_shift),
            ));
        }
        QueryPeriod::new(self.year, self.month)
    }
}
