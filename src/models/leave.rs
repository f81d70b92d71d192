//! Leave breakdown model.
//!
//! This module defines [`LeaveBreakdown`], the per-category count of leave
//! days taken within a query period.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Leave days taken in a month, keyed by leave category code.
///
/// Counts are unsigned, so a negative count cannot be represented and is
/// rejected when a request is deserialized. Which codes are allowed, and how
/// each is credited, is decided by the leave policy used for the calculation.
///
/// # Example
///
/// ```
/// use overtime_engine::models::LeaveBreakdown;
///
/// let leave = LeaveBreakdown::new()
///     .with("vacation", 2)
///     .with("overnight", 1);
///
/// assert_eq!(leave.days("vacation"), 2);
/// assert_eq!(leave.days("rotation"), 0);
/// assert_eq!(leave.total_days(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveBreakdown {
    days: BTreeMap<String, u32>,
}

impl LeaveBreakdown {
    /// Creates an empty breakdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the breakdown with `days` set for `code`.
    pub fn with(mut self, code: impl Into<String>, days: u32) -> Self {
        self.set(code, days);
        self
    }

    /// Sets the day count for a category, replacing any previous count.
    pub fn set(&mut self, code: impl Into<String>, days: u32) {
        self.days.insert(code.into(), days);
    }

    /// Returns the day count for a category (0 if absent).
    pub fn days(&self, code: &str) -> u32 {
        self.days.get(code).copied().unwrap_or(0)
    }

    /// Returns the sum of all category counts.
    pub fn total_days(&self) -> u64 {
        self.days.values().map(|d| u64::from(*d)).sum()
    }

    /// Iterates over `(code, days)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.days.iter().map(|(code, days)| (code.as_str(), *days))
    }

    /// Returns true if no leave is recorded.
    pub fn is_empty(&self) -> bool {
        self.total_days() == 0
    }
}
