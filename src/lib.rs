//! Overtime Engine for rotating one-on one-off duty rosters
//!
//! This crate calculates monthly overtime hours and capped overtime pay for
//! employees who work every second calendar day, such as firefighter shifts,
//! from a roster, a government workday calendar, hourly rates and a leave
//! policy loaded as YAML configuration.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
