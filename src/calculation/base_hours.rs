//! Base hours calculation functionality.
//!
//! Base hours are the statutory working hours for a month: the government
//! workday count multiplied by the hours per workday.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{DEFAULT_HOURS_PER_WORKDAY, EngineConfig, UnsupportedYearPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, BaseHoursExplanation, QueryPeriod};

/// Warning code attached when base hours fall back to zero.
pub const UNSUPPORTED_YEAR_WARNING: &str = "UNSUPPORTED_YEAR";

/// The result of calculating base hours, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseHoursResult {
    /// Base hours for the month.
    pub base_hours: Decimal,
    /// How the base hours were derived.
    pub explanation: BaseHoursExplanation,
    /// Set when the year had no calendar and the zero fallback was used.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates base hours for a query month.
///
/// `base_hours = workdays(year, month) × hours_per_workday`
///
/// # Arguments
///
/// * `period` - The month to calculate for
/// * `config` - The engine configuration containing workday calendars
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `BaseHoursResult`, or `UnsupportedYear` if the year has no
/// calendar and the roster's unsupported-year policy is `reject`. Under
/// `zero_base_hours` the result carries zero base hours and a warning instead.
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::calculate_base_hours;
/// use overtime_engine::config::ConfigLoader;
/// use overtime_engine::models::QueryPeriod;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let period = QueryPeriod::new(2026, 2)?;
/// let result = calculate_base_hours(&period, loader.config(), 1)?;
/// assert_eq!(result.base_hours, Decimal::from(112));
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn calculate_base_hours(
    period: &QueryPeriod,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<BaseHoursResult> {
    let year = period.year();
    let month = period.month();
    let days_in_month = period.days_in_month();

    let Some(calendar) = config.calendar(year) else {
        return match config.unsupported_year_policy() {
            UnsupportedYearPolicy::Reject => Err(EngineError::UnsupportedYear { year }),
            UnsupportedYearPolicy::ZeroBaseHours => {
                warn!(year, month, "No workday calendar for year, using zero base hours");
                Ok(zero_base_hours(period, step_number))
            }
        };
    };

    // Calendars are validated to list all twelve months at load time.
    let workdays = calendar
        .workdays_for(month)
        .ok_or(EngineError::UnsupportedYear { year })?;
    let hours_per_workday = calendar.hours_per_workday;
    let base_hours = Decimal::from(workdays) * hours_per_workday;

    let explanation = BaseHoursExplanation {
        year,
        month,
        days_in_month,
        workdays,
        rest_days: days_in_month.saturating_sub(workdays),
        hours_per_workday,
        base_hours,
        calendar_supported: true,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_hours".to_string(),
        rule_name: "Base Hours Calculation".to_string(),
        source: format!("calendar:{}", year),
        input: serde_json::json!({
            "year": year,
            "month": month,
            "days_in_month": days_in_month,
            "workdays": workdays,
            "hours_per_workday": hours_per_workday.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_hours": base_hours.normalize().to_string()
        }),
        reasoning: explanation.to_string(),
    };

    Ok(BaseHoursResult {
        base_hours,
        explanation,
        warning: None,
        audit_step,
    })
}

fn zero_base_hours(period: &QueryPeriod, step_number: u32) -> BaseHoursResult {
    let days_in_month = period.days_in_month();
    let explanation = BaseHoursExplanation {
        year: period.year(),
        month: period.month(),
        days_in_month,
        workdays: 0,
        rest_days: days_in_month,
        hours_per_workday: DEFAULT_HOURS_PER_WORKDAY,
        base_hours: Decimal::ZERO,
        calendar_supported: false,
    };

    let warning = AuditWarning {
        code: UNSUPPORTED_YEAR_WARNING.to_string(),
        message: format!(
            "No workday calendar for {}; base hours set to 0, overtime is overstated",
            period.year()
        ),
        severity: "high".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_hours".to_string(),
        rule_name: "Base Hours Calculation".to_string(),
        source: "roster:unsupported_year".to_string(),
        input: serde_json::json!({
            "year": period.year(),
            "month": period.month(),
            "days_in_month": days_in_month
        }),
        output: serde_json::json!({
            "base_hours": "0",
            "calendar_supported": false
        }),
        reasoning: explanation.to_string(),
    };

    BaseHoursResult {
        base_hours: Decimal::ZERO,
        explanation,
        warning: Some(warning),
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        LeavePolicy, RateTable, RosterConfig, ShiftDefinition, WorkdayCalendar,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    const WORKDAYS_2026: [u32; 12] = [20, 14, 22, 20, 20, 21, 23, 21, 20, 20, 21, 22];

    fn create_test_config(unsupported_year: UnsupportedYearPolicy) -> EngineConfig {
        let mut shifts = BTreeMap::new();
        shifts.insert(
            "A".to_string(),
            ShiftDefinition {
                name: "A-shift".to_string(),
                reference_start_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            },
        );
        let roster = RosterConfig {
            unit: "Test Station".to_string(),
            default_policy: "hours_only".to_string(),
            unsupported_year,
            shifts,
        };
        let calendar = WorkdayCalendar {
            year: 2026,
            hours_per_workday: DEFAULT_HOURS_PER_WORKDAY,
            workdays: (1..=12).zip(WORKDAYS_2026).collect(),
        };
        let policy = LeavePolicy {
            name: "hours_only".to_string(),
            description: String::new(),
            categories: vec![],
            pay: None,
        };
        EngineConfig::new(roster, vec![calendar], RateTable::default(), vec![policy]).unwrap()
    }

    /// BH-001: February 2026 has 14 workdays
    #[test]
    fn test_bh_001_february_2026() {
        let config = create_test_config(UnsupportedYearPolicy::Reject);
        let period = QueryPeriod::new(2026, 2).unwrap();

        let result = calculate_base_hours(&period, &config, 1).unwrap();

        assert_eq!(result.base_hours, Decimal::from(112));
        assert_eq!(result.explanation.workdays, 14);
        assert_eq!(result.explanation.rest_days, 14);
        assert_eq!(result.explanation.days_in_month, 28);
        assert!(result.warning.is_none());
        assert_eq!(result.audit_step.rule_id, "base_hours");
        assert_eq!(result.audit_step.source, "calendar:2026");
        assert_eq!(result.audit_step.output["base_hours"], "112");
    }

    /// BH-002: every month is workdays × 8
    #[test]
    fn test_bh_002_all_months_multiple_of_eight() {
        let config = create_test_config(UnsupportedYearPolicy::Reject);
        for (month, workdays) in (1..=12).zip(WORKDAYS_2026) {
            let period = QueryPeriod::new(2026, month).unwrap();
            let result = calculate_base_hours(&period, &config, 1).unwrap();
            assert_eq!(result.base_hours, Decimal::from(workdays * 8), "month {}", month);
        }
    }

    /// BH-003: an unsupported year fails by default
    #[test]
    fn test_bh_003_unsupported_year_rejected() {
        let config = create_test_config(UnsupportedYearPolicy::Reject);
        let period = QueryPeriod::new(2027, 1).unwrap();

        match calculate_base_hours(&period, &config, 1) {
            Err(EngineError::UnsupportedYear { year }) => assert_eq!(year, 2027),
            other => panic!("Expected UnsupportedYear error, got {:?}", other),
        }
    }

    /// BH-004: the zero fallback is opt-in and always warns
    #[test]
    fn test_bh_004_unsupported_year_zero_fallback() {
        let config = create_test_config(UnsupportedYearPolicy::ZeroBaseHours);
        let period = QueryPeriod::new(2027, 1).unwrap();

        let result = calculate_base_hours(&period, &config, 2).unwrap();

        assert_eq!(result.base_hours, Decimal::ZERO);
        assert!(!result.explanation.calendar_supported);
        assert_eq!(result.explanation.rest_days, 31);
        let warning = result.warning.unwrap();
        assert_eq!(warning.code, UNSUPPORTED_YEAR_WARNING);
        assert_eq!(warning.severity, "high");
        assert_eq!(result.audit_step.step_number, 2);
    }

    #[test]
    fn test_explanation_text_rederives_base_hours() {
        let config = create_test_config(UnsupportedYearPolicy::Reject);
        let period = QueryPeriod::new(2026, 7).unwrap();
        let result = calculate_base_hours(&period, &config, 1).unwrap();

        let text = result.explanation.to_string();
        assert_eq!(text, "2026-07: 31 days - 8 rest days = 23 workdays × 8 h = 184 h");
        assert_eq!(result.audit_step.reasoning, text);
    }

    #[test]
    fn test_custom_hours_per_workday() {
        let mut shifts = BTreeMap::new();
        shifts.insert(
            "A".to_string(),
            ShiftDefinition {
                name: "A-shift".to_string(),
                reference_start_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            },
        );
        let roster = RosterConfig {
            unit: "Test Station".to_string(),
            default_policy: "hours_only".to_string(),
            unsupported_year: UnsupportedYearPolicy::Reject,
            shifts,
        };
        let calendar = WorkdayCalendar {
            year: 2026,
            hours_per_workday: Decimal::new(75, 1),
            workdays: (1..=12).zip(WORKDAYS_2026).collect(),
        };
        let policy = LeavePolicy {
            name: "hours_only".to_string(),
            description: String::new(),
            categories: vec![],
            pay: None,
        };
        let config =
            EngineConfig::new(roster, vec![calendar], RateTable::default(), vec![policy]).unwrap();

        let period = QueryPeriod::new(2026, 2).unwrap();
        let result = calculate_base_hours(&period, &config, 1).unwrap();
        assert_eq!(result.base_hours, Decimal::from(105));
    }
}
