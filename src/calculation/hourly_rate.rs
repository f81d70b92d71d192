//! Hourly rate lookup functionality.
//!
//! This module resolves an employee's hourly overtime rate from the rate
//! table. A missing rate is not an error: the rate defaults to zero and the
//! lookup carries a warning so that zero pay can be told apart from zero
//! overtime.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::{AuditStep, AuditWarning, RateSource};

/// Warning code attached when an employee has no configured rate.
pub const MISSING_HOURLY_RATE_WARNING: &str = "MISSING_HOURLY_RATE";

/// The result of an hourly rate lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateLookup {
    /// The hourly rate, zero when missing.
    pub rate: Decimal,
    /// Whether the rate was configured.
    pub source: RateSource,
    /// Set when the rate was missing.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the hourly overtime rate for an employee.
///
/// # Arguments
///
/// * `employee_id` - The employee identifier
/// * `config` - The engine configuration containing the rate table
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```no_run
/// use overtime_engine::calculation::lookup_hourly_rate;
/// use overtime_engine::config::ConfigLoader;
/// use overtime_engine::models::RateSource;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/firefighters")?;
/// let lookup = lookup_hourly_rate("FF-001", loader.config(), 1);
///
/// assert_eq!(lookup.rate, Decimal::from(182));
/// assert_eq!(lookup.source, RateSource::Configured);
/// # Ok::<(), overtime_engine::error::EngineError>(())
/// ```
pub fn lookup_hourly_rate(
    employee_id: &str,
    config: &EngineConfig,
    step_number: u32,
) -> HourlyRateLookup {
    let (rate, source, warning, reasoning) = match config.hourly_rate(employee_id) {
        Some(rate) => (
            rate,
            RateSource::Configured,
            None,
            format!("Hourly rate for {}: {}", employee_id, rate.normalize()),
        ),
        None => {
            warn!(employee_id, "No hourly rate configured, using 0");
            let warning = AuditWarning {
                code: MISSING_HOURLY_RATE_WARNING.to_string(),
                message: format!(
                    "No hourly rate configured for {}; overtime pay is 0",
                    employee_id
                ),
                severity: "medium".to_string(),
            };
            (
                Decimal::ZERO,
                RateSource::Missing,
                Some(warning),
                format!("No hourly rate for {}, using 0", employee_id),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate_lookup".to_string(),
        rule_name: "Hourly Rate Lookup".to_string(),
        source: "rates".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id
        }),
        output: serde_json::json!({
            "hourly_rate": rate.normalize().to_string(),
            "rate_source": source
        }),
        reasoning,
    };

    HourlyRateLookup {
        rate,
        source,
        warning,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn load_config() -> EngineConfig {
        ConfigLoader::load("./config/firefighters").unwrap().into_config()
    }

    /// HR-001: configured rate is returned as-is
    #[test]
    fn test_hr_001_configured_rate() {
        let config = load_config();
        let lookup = lookup_hourly_rate("FF-001", &config, 1);

        assert_eq!(lookup.rate, Decimal::from(182));
        assert_eq!(lookup.source, RateSource::Configured);
        assert!(lookup.warning.is_none());
        assert_eq!(lookup.audit_step.output["hourly_rate"], "182");
        assert_eq!(lookup.audit_step.output["rate_source"], "configured");
    }

    /// HR-002: a missing rate defaults to zero with a warning
    #[test]
    fn test_hr_002_missing_rate() {
        let config = load_config();
        let lookup = lookup_hourly_rate("FF-999", &config, 5);

        assert_eq!(lookup.rate, Decimal::ZERO);
        assert_eq!(lookup.source, RateSource::Missing);
        let warning = lookup.warning.unwrap();
        assert_eq!(warning.code, MISSING_HOURLY_RATE_WARNING);
        assert!(warning.message.contains("FF-999"));
        assert_eq!(lookup.audit_step.step_number, 5);
        assert_eq!(lookup.audit_step.output["rate_source"], "missing");
    }
}
