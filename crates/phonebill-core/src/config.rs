//! Application configuration
//!
//! Tariffs are loaded through the `config` crate so that fees and per-minute
//! rates can be overridden from files or environment variables. Every value
//! falls back to the constants in [`crate::constants`].

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::constants::{
    MTM_MINS_COST, MTM_MONTHLY_FEE, PREPAID_LOW_BALANCE, PREPAID_MINS_COST, PREPAID_TOP_UP,
    TERM_DEPOSIT, TERM_MINS, TERM_MINS_COST, TERM_MONTHLY_FEE,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub rates: RateSchedule,
}

/// Tariffs for every contract type
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RateSchedule {
    #[serde(default)]
    pub term: TermRates,

    #[serde(default)]
    pub mtm: MtmRates,

    #[serde(default)]
    pub prepaid: PrepaidRates,
}

/// Term contract tariff
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TermRates {
    /// Fixed monthly fee
    #[serde(default = "default_term_monthly_fee")]
    pub monthly_fee: Decimal,

    /// Cost per minute once the free allowance is used up
    #[serde(default = "default_term_per_minute")]
    pub per_minute: Decimal,

    /// Included minutes per month
    #[serde(default = "default_term_free_minutes")]
    pub free_minutes: u32,

    /// One-time deposit charged in the first month
    #[serde(default = "default_term_deposit")]
    pub deposit: Decimal,
}

fn default_term_monthly_fee() -> Decimal {
    TERM_MONTHLY_FEE
}

fn default_term_per_minute() -> Decimal {
    TERM_MINS_COST
}

fn default_term_free_minutes() -> u32 {
    TERM_MINS
}

fn default_term_deposit() -> Decimal {
    TERM_DEPOSIT
}

/// Month-to-month tariff
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MtmRates {
    /// Fixed monthly fee
    #[serde(default = "default_mtm_monthly_fee")]
    pub monthly_fee: Decimal,

    /// Cost per minute
    #[serde(default = "default_mtm_per_minute")]
    pub per_minute: Decimal,
}

fn default_mtm_monthly_fee() -> Decimal {
    MTM_MONTHLY_FEE
}

fn default_mtm_per_minute() -> Decimal {
    MTM_MINS_COST
}

/// Prepaid tariff
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PrepaidRates {
    /// Cost per minute
    #[serde(default = "default_prepaid_per_minute")]
    pub per_minute: Decimal,

    /// A balance above this value triggers a top-up at month start
    #[serde(default = "default_prepaid_low_balance")]
    pub low_balance_threshold: Decimal,

    /// Credit added by a top-up
    #[serde(default = "default_prepaid_top_up")]
    pub top_up_amount: Decimal,
}

fn default_prepaid_per_minute() -> Decimal {
    PREPAID_MINS_COST
}

fn default_prepaid_low_balance() -> Decimal {
    PREPAID_LOW_BALANCE
}

fn default_prepaid_top_up() -> Decimal {
    PREPAID_TOP_UP
}

impl Default for TermRates {
    fn default() -> Self {
        Self {
            monthly_fee: TERM_MONTHLY_FEE,
            per_minute: TERM_MINS_COST,
            free_minutes: TERM_MINS,
            deposit: TERM_DEPOSIT,
        }
    }
}

impl Default for MtmRates {
    fn default() -> Self {
        Self {
            monthly_fee: MTM_MONTHLY_FEE,
            per_minute: MTM_MINS_COST,
        }
    }
}

impl Default for PrepaidRates {
    fn default() -> Self {
        Self {
            per_minute: PREPAID_MINS_COST,
            low_balance_threshold: PREPAID_LOW_BALANCE,
            top_up_amount: PREPAID_TOP_UP,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!("Loading rate configuration for run mode {}", run_mode);

        let config = Config::builder()
            // Start with default values
            .set_default("rates.term.monthly_fee", TERM_MONTHLY_FEE.to_string())?
            .set_default("rates.term.per_minute", TERM_MINS_COST.to_string())?
            .set_default("rates.term.free_minutes", i64::from(TERM_MINS))?
            .set_default("rates.term.deposit", TERM_DEPOSIT.to_string())?
            .set_default("rates.mtm.monthly_fee", MTM_MONTHLY_FEE.to_string())?
            .set_default("rates.mtm.per_minute", MTM_MINS_COST.to_string())?
            .set_default("rates.prepaid.per_minute", PREPAID_MINS_COST.to_string())?
            .set_default(
                "rates.prepaid.low_balance_threshold",
                PREPAID_LOW_BALANCE.to_string(),
            )?
            .set_default("rates.prepaid.top_up_amount", PREPAID_TOP_UP.to_string())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with PHONEBILL_ prefix
            .add_source(
                Environment::with_prefix("PHONEBILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("PHONEBILL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rate_schedule() {
        let rates = RateSchedule::default();
        assert_eq!(rates.term.monthly_fee, dec!(20.00));
        assert_eq!(rates.term.per_minute, dec!(0.10));
        assert_eq!(rates.term.free_minutes, 100);
        assert_eq!(rates.term.deposit, dec!(300.00));
        assert_eq!(rates.mtm.monthly_fee, dec!(50.00));
        assert_eq!(rates.mtm.per_minute, dec!(0.05));
        assert_eq!(rates.prepaid.per_minute, dec!(0.025));
        assert_eq!(rates.prepaid.low_balance_threshold, dec!(-10));
        assert_eq!(rates.prepaid.top_up_amount, dec!(25));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.rates, RateSchedule::default());
    }

    #[test]
    fn test_sample_config_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = AppConfig::from_file(path).unwrap();
        assert_eq!(config.rates, RateSchedule::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[rates.mtm]\nmonthly_fee = \"45.50\"\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rates.mtm.monthly_fee, dec!(45.50));
        assert_eq!(config.rates.mtm.per_minute, dec!(0.05));
        assert_eq!(config.rates.term, TermRates::default());
    }
}
