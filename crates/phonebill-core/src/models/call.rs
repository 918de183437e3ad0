//! Call record model
//!
//! Already-parsed call detail records handed to the billing rules.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::BillingPeriod;

/// A completed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Calling number
    pub src_number: String,

    /// Called number
    pub dst_number: String,

    /// Call start timestamp
    pub time: NaiveDateTime,

    /// Call duration in seconds
    pub duration: u32,
}

impl Call {
    pub fn new(
        src_number: impl Into<String>,
        dst_number: impl Into<String>,
        time: NaiveDateTime,
        duration: u32,
    ) -> Self {
        Self {
            src_number: src_number.into(),
            dst_number: dst_number.into(),
            time,
            duration,
        }
    }

    /// Duration rounded up to whole minutes
    #[inline]
    pub fn billable_minutes(&self) -> u32 {
        self.duration.div_ceil(60)
    }

    /// Billing period the call belongs to
    #[inline]
    pub fn period(&self) -> BillingPeriod {
        BillingPeriod::from_date(&self.time)
    }
}
