//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineConfig, LeavePolicy, RateTable, RosterConfig, ShiftDefinition, WorkdayCalendar,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them once, and hands out the resulting [`EngineConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/firefighters/
/// ├── roster.yaml         # Unit, shifts and their reference dates
/// ├── rates.yaml          # Hourly overtime rates per employee
/// ├── calendars/
/// │   └── 2026.yaml       # Workdays per month for one year
/// └── policies/
///     ├── standard.yaml   # Leave categories, credits and pay cap
///     └── hours_only.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use overtime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/firefighters").unwrap();
///
/// let shift = loader.get_shift("A").unwrap();
/// println!("{} starts on {}", shift.name, shift.reference_start_date);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/firefighters")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file or directory is missing
    /// - Any file contains invalid YAML
    /// - The files are inconsistent with each other (see [`EngineConfig::new`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use overtime_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/firefighters")?;
    /// # Ok::<(), overtime_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let roster = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?;
        let rates = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;
        let calendars = Self::load_dir::<WorkdayCalendar>(&path.join("calendars"))?;
        let policies = Self::load_dir::<LeavePolicy>(&path.join("policies"))?;

        let config = EngineConfig::new(roster, calendars, rates, policies)?;

        info!(
            path = %path.display(),
            unit = %config.roster().unit,
            shifts = config.roster().shifts.len(),
            calendars = config.calendars().len(),
            policies = config.policies().len(),
            "Loaded overtime configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every `.yaml` file in a directory, in file name order.
    fn load_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> EngineResult<Vec<T>> {
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no yaml files found)", dir_str),
            });
        }

        let mut items = Vec::with_capacity(paths.len());
        for path in &paths {
            debug!(path = %path.display(), "Loading configuration file");
            items.push(Self::load_yaml::<T>(path)?);
        }

        Ok(items)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the engine configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Gets a shift by its identifier.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use overtime_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/firefighters")?;
    /// let shift = loader.get_shift("B")?;
    /// println!("Shift: {}", shift.name);
    /// # Ok::<(), overtime_engine::error::EngineError>(())
    /// ```
    pub fn get_shift(&self, shift_id: &str) -> EngineResult<&ShiftDefinition> {
        self.config.shift(shift_id)
    }

    /// Gets the hourly overtime rate for an employee.
    ///
    /// Employees without a configured rate yield `None`; the engine treats
    /// that as a zero rate rather than an error.
    pub fn get_hourly_rate(&self, employee_id: &str) -> Option<Decimal> {
        self.config.hourly_rate(employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LeaveCredit, UnsupportedYearPolicy};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/firefighters"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().roster().default_policy, "standard");
        assert_eq!(
            loader.config().unsupported_year_policy(),
            UnsupportedYearPolicy::Reject
        );
    }

    #[test]
    fn test_get_shift_reference_dates() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let a = loader.get_shift("A").unwrap();
        assert_eq!(
            a.reference_start_date,
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        );

        let b = loader.get_shift("B").unwrap();
        assert_eq!(
            b.reference_start_date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_get_shift_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_shift("C") {
            Err(EngineError::UnknownShift { shift_id }) => assert_eq!(shift_id, "C"),
            other => panic!("Expected UnknownShift error, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_2026_workdays() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let calendar = loader.config().calendar(2026).unwrap();

        let expected = [20, 14, 22, 20, 20, 21, 23, 21, 20, 20, 21, 22];
        for (month, workdays) in (1..=12).zip(expected) {
            assert_eq!(calendar.workdays_for(month), Some(workdays), "month {}", month);
        }
        assert_eq!(calendar.hours_per_workday, dec("8"));
    }

    #[test]
    fn test_get_hourly_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.get_hourly_rate("FF-001"), Some(dec("182")));
        assert_eq!(loader.get_hourly_rate("nobody"), None);
    }

    #[test]
    fn test_standard_policy_credits() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.config().policy(Some("standard")).unwrap();

        let codes: Vec<&str> = policy.categories.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["rotation", "vacation", "compensatory", "overnight"]);

        assert_eq!(policy.category("rotation").unwrap().credit, LeaveCredit::Excluded);
        assert_eq!(
            policy.category("vacation").unwrap().credit,
            LeaveCredit::FixedHours { hours: dec("8") }
        );
        assert_eq!(policy.category("compensatory").unwrap().credit, LeaveCredit::Excluded);
        assert_eq!(
            policy.category("overnight").unwrap().credit,
            LeaveCredit::FixedHours { hours: dec("12") }
        );
        assert_eq!(policy.pay.as_ref().unwrap().monthly_cap, Some(dec("19000")));
    }

    #[test]
    fn test_hours_only_policy_has_no_pay_stage() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.config().policy(Some("hours_only")).unwrap();

        assert_eq!(policy.categories.len(), 1);
        assert_eq!(policy.categories[0].credit, LeaveCredit::Excluded);
        assert!(policy.pay.is_none());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("roster.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_loaded_tables_round_trip_through_yaml() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();

        let roster_yaml = serde_yaml::to_string(config.roster()).unwrap();
        let roster: RosterConfig = serde_yaml::from_str(&roster_yaml).unwrap();
        assert_eq!(&roster, config.roster());

        let rates_yaml = serde_yaml::to_string(config.rates()).unwrap();
        let rates: RateTable = serde_yaml::from_str(&rates_yaml).unwrap();
        assert_eq!(&rates, config.rates());

        for calendar in config.calendars().values() {
            let yaml = serde_yaml::to_string(calendar).unwrap();
            let parsed: WorkdayCalendar = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(&parsed, calendar);
        }

        for policy in config.policies().values() {
            let yaml = serde_yaml::to_string(policy).unwrap();
            let parsed: LeavePolicy = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(&parsed, policy);
        }
    }
}
