//! Error types for the overtime engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! computing overtime.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the overtime engine.
///
/// All fallible operations in the engine return this error type. None of the
/// variants are transient: every failure is a configuration problem or a
/// request the caller has to correct.
///
/// # Example
///
/// ```
/// use overtime_engine::error::EngineError;
///
/// let error = EngineError::UnknownShift {
///     shift_id: "C".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown shift: C");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is semantically inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The shift identifier is not defined in the roster.
    #[error("Unknown shift: {shift_id}")]
    UnknownShift {
        /// The shift identifier that was not found.
        shift_id: String,
    },

    /// No workday calendar is configured for the requested year.
    #[error("Unsupported year: no workday calendar configured for {year}")]
    UnsupportedYear {
        /// The requested year.
        year: i32,
    },

    /// A date range was given with its start after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A request field failed validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave category is not defined by the selected policy.
    #[error("Leave category '{category}' is not defined by policy '{policy}'")]
    UnknownLeaveCategory {
        /// The policy that was used.
        policy: String,
        /// The category code that was not found.
        category: String,
    },

    /// The requested leave policy is not configured.
    #[error("Unknown leave policy: {name}")]
    UnknownPolicy {
        /// The policy name that was not found.
        name: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Returns a stable machine-readable code for this error.
    ///
    /// Presentation layers use this to pick a localized message instead of
    /// showing the English `Display` text.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::InvalidConfig { .. } => "INVALID_CONFIG",
            EngineError::UnknownShift { .. } => "UNKNOWN_SHIFT",
            EngineError::UnsupportedYear { .. } => "UNSUPPORTED_YEAR",
            EngineError::InvalidRange { .. } => "INVALID_RANGE",
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
            EngineError::UnknownLeaveCategory { .. } => "UNKNOWN_LEAVE_CATEGORY",
            EngineError::UnknownPolicy { .. } => "UNKNOWN_POLICY",
            EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/roster.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/roster.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_unknown_shift_displays_id() {
        let error = EngineError::UnknownShift {
            shift_id: "C".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown shift: C");
        assert_eq!(error.code(), "UNKNOWN_SHIFT");
    }

    #[test]
    fn test_unsupported_year_displays_year() {
        let error = EngineError::UnsupportedYear { year: 2027 };
        assert_eq!(
            error.to_string(),
            "Unsupported year: no workday calendar configured for 2027"
        );
        assert_eq!(error.code(), "UNSUPPORTED_YEAR");
    }

    #[test]
    fn test_invalid_range_displays_dates() {
        let error = EngineError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2026-03-01 is after end 2026-02-01"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("duty_hours_per_shift", "must be greater than zero");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'duty_hours_per_shift': must be greater than zero"
        );
        assert_eq!(error.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_leave_category_displays_policy_and_category() {
        let error = EngineError::UnknownLeaveCategory {
            policy: "standard".to_string(),
            category: "sick".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Leave category 'sick' is not defined by policy 'standard'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_policy() -> EngineResult<()> {
            Err(EngineError::UnknownPolicy {
                name: "legacy".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_policy()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
