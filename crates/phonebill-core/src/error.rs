//! Unified error handling for PhoneBill
//!
//! Every billing operation reports precondition violations through
//! [`BillingError`] instead of producing wrong numbers.

use thiserror::Error;

/// Main billing error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    // ==================== Lifecycle Errors ====================
    #[error("No active bill for current billing period")]
    NoActiveBill,

    #[error("Call placed in {actual} but the active billing period is {expected}")]
    PeriodMismatch { expected: String, actual: String },

    #[error("Contract has been cancelled")]
    ContractCancelled,

    #[error("Billing period {0} is already closed")]
    PeriodClosed(String),

    // ==================== Validation Errors ====================
    #[error("Invalid billing period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BillingError {
    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BillingError::NoActiveBill => "no_active_bill",
            BillingError::PeriodMismatch { .. } => "period_mismatch",
            BillingError::ContractCancelled => "contract_cancelled",
            BillingError::PeriodClosed(_) => "period_closed",
            BillingError::InvalidPeriod(_) => "invalid_period",
            BillingError::InvalidContract(_) => "invalid_contract",
            BillingError::Config(_) => "config_error",
        }
    }

    /// True for errors caused by calling operations out of order
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            BillingError::NoActiveBill
                | BillingError::PeriodMismatch { .. }
                | BillingError::ContractCancelled
                | BillingError::PeriodClosed(_)
        )
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for BillingError {
    fn from(err: config::ConfigError) -> Self {
        BillingError::Config(err.to_string())
    }
}
