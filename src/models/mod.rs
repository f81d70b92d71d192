//! Core data models for the overtime engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod leave;
mod query_period;
mod request;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BaseHoursExplanation, CalculationResult, LeaveTerm,
    OvertimeFormula, OvertimePay, OvertimeResult, RateSource,
};
pub use leave::LeaveBreakdown;
pub use query_period::{QueryPeriod, days_in_month};
pub use request::OvertimeRequest;
