//! Billing period model
//!
//! A billing period is a calendar month for which one bill accumulates cost.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;

use crate::{BillingError, BillingResult};

/// A `(month, year)` pair
///
/// Field order matters: periods compare by year first, then by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Create a period, rejecting months outside `1..=12`
    pub fn new(month: u32, year: i32) -> BillingResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(BillingError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Period containing the given date
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Check if a date falls inside this period
    pub fn contains<D: Datelike>(&self, date: &D) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
