//! PhoneBill Core Library
//!
//! This crate provides the foundational types, configuration, and error
//! handling for the PhoneBill system. It includes:
//!
//! - Domain models (Bill, Call, BillingPeriod)
//! - Rate schedule configuration
//! - Unified error handling

pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, MtmRates, PrepaidRates, RateSchedule, TermRates};
pub use error::BillingError;

/// Result type alias using BillingError
pub type BillingResult<T> = Result<T, BillingError>;

/// Default tariff constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Month-to-month monthly fee
    pub const MTM_MONTHLY_FEE: Decimal = dec!(50.00);

    /// Month-to-month cost per minute
    pub const MTM_MINS_COST: Decimal = dec!(0.05);

    /// Term contract monthly fee
    pub const TERM_MONTHLY_FEE: Decimal = dec!(20.00);

    /// Term contract one-time deposit, charged in the start month
    pub const TERM_DEPOSIT: Decimal = dec!(300.00);

    /// Term contract cost per minute beyond the free allowance
    pub const TERM_MINS_COST: Decimal = dec!(0.10);

    /// Term contract included minutes per month
    pub const TERM_MINS: u32 = 100;

    /// Prepaid cost per minute
    pub const PREPAID_MINS_COST: Decimal = dec!(0.025);

    /// Balance above which a prepaid account is topped up at month start
    pub const PREPAID_LOW_BALANCE: Decimal = dec!(-10);

    /// Prepaid monthly top-up amount
    pub const PREPAID_TOP_UP: Decimal = dec!(25.00);
}
