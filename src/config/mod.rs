//! Configuration loading and management for the overtime engine.
//!
//! This module loads the roster (shifts and their reference dates), the
//! per-year workday calendars, the hourly rate table and the leave policies
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use overtime_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/firefighters").unwrap();
//! println!("Loaded roster for: {}", loader.config().roster().unit);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_HOURS_PER_WORKDAY, EngineConfig, LeaveCategory, LeaveCredit, LeavePolicy, PayPolicy,
    RateTable, RosterConfig, ShiftDefinition, UnsupportedYearPolicy, WorkdayCalendar,
};
