//! Configuration types for overtime calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type also derives
//! `Serialize` so a loaded configuration can be written back out unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::days_in_month;

/// Hours credited per calendar workday when a calendar does not say otherwise.
pub const DEFAULT_HOURS_PER_WORKDAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

fn default_hours_per_workday() -> Decimal {
    DEFAULT_HOURS_PER_WORKDAY
}

/// What the base-hours calculator does for a year without a workday calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedYearPolicy {
    /// Fail the calculation with `UnsupportedYear`.
    #[default]
    Reject,
    /// Use zero base hours and attach a warning to the result.
    ZeroBaseHours,
}

/// A duty shift (platoon) on the one-on one-off rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Human-readable name of the shift (e.g. "A-shift").
    pub name: String,
    /// The first day guaranteed to be a duty day for this shift.
    pub reference_start_date: NaiveDate,
}

/// Roster configuration from roster.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Name of the unit the roster belongs to.
    pub unit: String,
    /// The leave policy used when a request does not name one.
    pub default_policy: String,
    /// Behaviour for years without a workday calendar.
    #[serde(default)]
    pub unsupported_year: UnsupportedYearPolicy,
    /// Map of shift identifier to shift definition.
    pub shifts: BTreeMap<String, ShiftDefinition>,
}

/// Government workday calendar for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayCalendar {
    /// The calendar year.
    pub year: i32,
    /// Statutory hours per workday.
    #[serde(default = "default_hours_per_workday")]
    pub hours_per_workday: Decimal,
    /// Map of month (1-12) to the number of workdays in that month.
    pub workdays: BTreeMap<u32, u32>,
}

impl WorkdayCalendar {
    /// Returns the workday count for a month, if listed.
    pub fn workdays_for(&self, month: u32) -> Option<u32> {
        self.workdays.get(&month).copied()
    }

    fn validate(&self) -> EngineResult<()> {
        if self.hours_per_workday <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "calendar {}: hours_per_workday must be positive",
                    self.year
                ),
            });
        }

        for month in 1..=12 {
            let workdays = self.workdays_for(month).ok_or_else(|| EngineError::InvalidConfig {
                message: format!("calendar {}: missing workday count for month {}", self.year, month),
            })?;
            let month_length =
                days_in_month(self.year, month).ok_or_else(|| EngineError::InvalidConfig {
                    message: format!("calendar {}: year out of range", self.year),
                })?;
            if workdays > month_length {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "calendar {}: month {} lists {} workdays but has only {} days",
                        self.year, month, workdays, month_length
                    ),
                });
            }
        }

        if let Some(extra) = self.workdays.keys().find(|m| !(1..=12).contains(*m)) {
            return Err(EngineError::InvalidConfig {
                message: format!("calendar {}: invalid month {}", self.year, extra),
            });
        }

        Ok(())
    }
}

/// Hourly overtime rates from rates.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Map of employee identifier to hourly overtime rate.
    #[serde(default)]
    pub hourly_rates: BTreeMap<String, Decimal>,
}

/// How a day of leave is credited in the overtime formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeaveCredit {
    /// The day is removed from worked hours and credits nothing.
    Excluded,
    /// The day credits a flat number of hours regardless of duty length.
    FixedHours {
        /// Hours credited per day.
        hours: Decimal,
    },
    /// The day credits a full duty shift.
    DutyHours,
}

impl LeaveCredit {
    /// Hours credited for one day of this leave at the given duty length.
    ///
    /// # Example
    ///
    /// ```
    /// use overtime_engine::config::LeaveCredit;
    /// use rust_decimal::Decimal;
    ///
    /// let duty = Decimal::from(24);
    /// assert_eq!(LeaveCredit::Excluded.hours_per_day(duty), Decimal::ZERO);
    /// assert_eq!(
    ///     LeaveCredit::FixedHours { hours: Decimal::from(8) }.hours_per_day(duty),
    ///     Decimal::from(8)
    /// );
    /// assert_eq!(LeaveCredit::DutyHours.hours_per_day(duty), duty);
    /// ```
    pub fn hours_per_day(&self, duty_hours: Decimal) -> Decimal {
        match self {
            LeaveCredit::Excluded => Decimal::ZERO,
            LeaveCredit::FixedHours { hours } => *hours,
            LeaveCredit::DutyHours => duty_hours,
        }
    }
}

/// A leave category within a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCategory {
    /// Code used in requests (e.g. "vacation").
    pub code: String,
    /// Human-readable name of the category.
    pub name: String,
    /// Hour-credit rule for days of this category.
    pub credit: LeaveCredit,
}

/// Pay stage settings of a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Monthly ceiling on overtime pay; uncapped when absent.
    #[serde(default)]
    pub monthly_cap: Option<Decimal>,
}

/// A leave policy from the policies directory.
///
/// A policy selects which leave categories a request may use, how each is
/// credited, and whether overtime is converted into pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique policy name.
    pub name: String,
    /// A description of the policy.
    #[serde(default)]
    pub description: String,
    /// Leave categories in display order.
    pub categories: Vec<LeaveCategory>,
    /// Pay stage; overtime is reported in hours only when absent.
    #[serde(default)]
    pub pay: Option<PayPolicy>,
}

impl LeavePolicy {
    /// Looks up a category by code.
    pub fn category(&self, code: &str) -> Option<&LeaveCategory> {
        self.categories.iter().find(|c| c.code == code)
    }

    fn validate(&self) -> EngineResult<()> {
        let mut seen = BTreeSet::new();
        for category in &self.categories {
            if !seen.insert(category.code.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "policy '{}': duplicate leave category '{}'",
                        self.name, category.code
                    ),
                });
            }
            if let LeaveCredit::FixedHours { hours } = category.credit {
                if hours < Decimal::ZERO {
                    return Err(EngineError::InvalidConfig {
                        message: format!(
                            "policy '{}': category '{}' credits negative hours",
                            self.name, category.code
                        ),
                    });
                }
            }
        }

        if let Some(cap) = self.pay.as_ref().and_then(|p| p.monthly_cap) {
            if cap < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!("policy '{}': monthly_cap must not be negative", self.name),
                });
            }
        }

        Ok(())
    }
}

/// The complete engine configuration loaded from YAML files.
///
/// Built once, then shared read-only by every calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Roster with shifts and defaults.
    roster: RosterConfig,
    /// Workday calendars keyed by year.
    calendars: BTreeMap<i32, WorkdayCalendar>,
    /// Hourly rates keyed by employee.
    rates: RateTable,
    /// Leave policies keyed by name.
    policies: BTreeMap<String, LeavePolicy>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the parts are inconsistent: no shifts, a
    /// missing default policy, duplicate calendar years or policy names, an
    /// incomplete calendar, or negative rates, credits or caps.
    pub fn new(
        roster: RosterConfig,
        calendars: Vec<WorkdayCalendar>,
        rates: RateTable,
        policies: Vec<LeavePolicy>,
    ) -> EngineResult<Self> {
        if roster.shifts.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "roster defines no shifts".to_string(),
            });
        }

        let mut calendar_map = BTreeMap::new();
        for calendar in calendars {
            calendar.validate()?;
            let year = calendar.year;
            if calendar_map.insert(year, calendar).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate calendar for year {}", year),
                });
            }
        }

        if let Some((employee, _)) = rates.hourly_rates.iter().find(|(_, r)| **r < Decimal::ZERO) {
            return Err(EngineError::InvalidConfig {
                message: format!("negative hourly rate for employee '{}'", employee),
            });
        }

        let mut policy_map = BTreeMap::new();
        for policy in policies {
            policy.validate()?;
            let name = policy.name.clone();
            if policy_map.insert(name.clone(), policy).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate leave policy '{}'", name),
                });
            }
        }

        if !policy_map.contains_key(&roster.default_policy) {
            return Err(EngineError::InvalidConfig {
                message: format!("default policy '{}' is not defined", roster.default_policy),
            });
        }

        Ok(Self {
            roster,
            calendars: calendar_map,
            rates,
            policies: policy_map,
        })
    }

    /// Returns the roster configuration.
    pub fn roster(&self) -> &RosterConfig {
        &self.roster
    }

    /// Returns all workday calendars keyed by year.
    pub fn calendars(&self) -> &BTreeMap<i32, WorkdayCalendar> {
        &self.calendars
    }

    /// Returns the hourly rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns all leave policies keyed by name.
    pub fn policies(&self) -> &BTreeMap<String, LeavePolicy> {
        &self.policies
    }

    /// Gets a shift by its identifier.
    pub fn shift(&self, shift_id: &str) -> EngineResult<&ShiftDefinition> {
        self.roster
            .shifts
            .get(shift_id)
            .ok_or_else(|| EngineError::UnknownShift {
                shift_id: shift_id.to_string(),
            })
    }

    /// Gets the workday calendar for a year, if one is configured.
    pub fn calendar(&self, year: i32) -> Option<&WorkdayCalendar> {
        self.calendars.get(&year)
    }

    /// Gets the hourly rate for an employee, if one is configured.
    pub fn hourly_rate(&self, employee_id: &str) -> Option<Decimal> {
        self.rates.hourly_rates.get(employee_id).copied()
    }

    /// Gets a leave policy by name, falling back to the roster default.
    pub fn policy(&self, name: Option<&str>) -> EngineResult<&LeavePolicy> {
        let name = name.unwrap_or(&self.roster.default_policy);
        self.policies
            .get(name)
            .ok_or_else(|| EngineError::UnknownPolicy {
                name: name.to_string(),
            })
    }

    /// Returns the configured behaviour for years without a calendar.
    pub fn unsupported_year_policy(&self) -> UnsupportedYearPolicy {
        self.roster.unsupported_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn roster() -> RosterConfig {
        let mut shifts = BTreeMap::new();
        shifts.insert(
            "A".to_string(),
            ShiftDefinition {
                name: "A-shift".to_string(),
                reference_start_date: date(2026, 1, 2),
            },
        );
        RosterConfig {
            unit: "Test Station".to_string(),
            default_policy: "standard".to_string(),
            unsupported_year: UnsupportedYearPolicy::Reject,
            shifts,
        }
    }

    fn calendar_2026() -> WorkdayCalendar {
        let counts = [20, 14, 22, 20, 20, 21, 23, 21, 20, 20, 21, 22];
        WorkdayCalendar {
            year: 2026,
            hours_per_workday: DEFAULT_HOURS_PER_WORKDAY,
            workdays: (1..=12).zip(counts).collect(),
        }
    }

    fn standard_policy() -> LeavePolicy {
        LeavePolicy {
            name: "standard".to_string(),
            description: String::new(),
            categories: vec![
                LeaveCategory {
                    code: "rotation".to_string(),
                    name: "Rotation leave".to_string(),
                    credit: LeaveCredit::Excluded,
                },
                LeaveCategory {
                    code: "vacation".to_string(),
                    name: "Vacation".to_string(),
                    credit: LeaveCredit::FixedHours {
                        hours: Decimal::from(8),
                    },
                },
            ],
            pay: Some(PayPolicy {
                monthly_cap: Some(Decimal::from(19000)),
            }),
        }
    }

    #[test]
    fn test_new_accepts_consistent_parts() {
        let config = EngineConfig::new(
            roster(),
            vec![calendar_2026()],
            RateTable::default(),
            vec![standard_policy()],
        )
        .unwrap();

        assert_eq!(config.shift("A").unwrap().reference_start_date, date(2026, 1, 2));
        assert_eq!(config.calendar(2026).unwrap().workdays_for(2), Some(14));
        assert!(config.calendar(2027).is_none());
        assert_eq!(config.policy(None).unwrap().name, "standard");
    }

    #[test]
    fn test_unknown_shift_returns_error() {
        let config = EngineConfig::new(
            roster(),
            vec![calendar_2026()],
            RateTable::default(),
            vec![standard_policy()],
        )
        .unwrap();

        match config.shift("Z") {
            Err(EngineError::UnknownShift { shift_id }) => assert_eq!(shift_id, "Z"),
            other => panic!("Expected UnknownShift error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_policy_returns_error() {
        let config = EngineConfig::new(
            roster(),
            vec![calendar_2026()],
            RateTable::default(),
            vec![standard_policy()],
        )
        .unwrap();

        assert!(matches!(
            config.policy(Some("legacy")),
            Err(EngineError::UnknownPolicy { .. })
        ));
    }

    #[test]
    fn test_missing_default_policy_rejected() {
        let mut roster = roster();
        roster.default_policy = "missing".to_string();

        let result = EngineConfig::new(
            roster,
            vec![calendar_2026()],
            RateTable::default(),
            vec![standard_policy()],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_incomplete_calendar_rejected() {
        let mut calendar = calendar_2026();
        calendar.workdays.remove(&7);

        let result = EngineConfig::new(
            roster(),
            vec![calendar],
            RateTable::default(),
            vec![standard_policy()],
        );
        match result {
            Err(EngineError::InvalidConfig { message }) => assert!(message.contains("month 7")),
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_with_more_workdays_than_days_rejected() {
        let mut calendar = calendar_2026();
        calendar.workdays.insert(2, 29);

        let result = EngineConfig::new(
            roster(),
            vec![calendar],
            RateTable::default(),
            vec![standard_policy()],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_duplicate_calendar_year_rejected() {
        let result = EngineConfig::new(
            roster(),
            vec![calendar_2026(), calendar_2026()],
            RateTable::default(),
            vec![standard_policy()],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_duplicate_leave_category_rejected() {
        let mut policy = standard_policy();
        policy.categories.push(policy.categories[0].clone());

        let result = EngineConfig::new(
            roster(),
            vec![calendar_2026()],
            RateTable::default(),
            vec![policy],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut rates = RateTable::default();
        rates
            .hourly_rates
            .insert("E001".to_string(), Decimal::from(-1));

        let result = EngineConfig::new(
            roster(),
            vec![calendar_2026()],
            rates,
            vec![standard_policy()],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_leave_credit_deserializes_tagged() {
        let yaml = "kind: fixed_hours\nhours: 12\n";
        let credit: LeaveCredit = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            credit,
            LeaveCredit::FixedHours {
                hours: Decimal::from(12)
            }
        );

        let credit: LeaveCredit = serde_yaml::from_str("kind: excluded\n").unwrap();
        assert_eq!(credit, LeaveCredit::Excluded);
    }

    #[test]
    fn test_calendar_defaults_hours_per_workday() {
        let yaml = "year: 2026\nworkdays:\n  1: 20\n";
        let calendar: WorkdayCalendar = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(calendar.hours_per_workday, Decimal::from(8));
        assert_eq!(calendar.workdays_for(1), Some(20));
    }

    #[test]
    fn test_unsupported_year_defaults_to_reject() {
        let yaml = r#"
unit: Test Station
default_policy: standard
shifts:
  A:
    name: A-shift
    reference_start_date: 2026-01-02
"#;
        let roster: RosterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(roster.unsupported_year, UnsupportedYearPolicy::Reject);
    }

    #[test]
    fn test_policy_round_trips_through_yaml() {
        let policy = standard_policy();
        let yaml = serde_yaml::to_string(&policy).unwrap();
        let parsed: LeavePolicy = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, policy);
    }
}
