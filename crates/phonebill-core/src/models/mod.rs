//! Domain models for PhoneBill
//!
//! This module contains the records exchanged between the billing rules and
//! the monthly driver.

pub mod bill;
pub mod call;
pub mod period;

pub use bill::{Bill, BillSummary, RatePlan};
pub use call::Call;
pub use period::BillingPeriod;
