//! Contract signup terms
//!
//! Describes which contract a customer signed so that the driver can build the
//! matching variant against a configured rate schedule.

use chrono::NaiveDate;
use phonebill_core::{models::RatePlan, BillingResult, RateSchedule};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Contract, MtmContract, PrepaidContract, TermContract};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContractTerms {
    Term { start: NaiveDate, end: NaiveDate },
    Mtm { start: NaiveDate },
    Prepaid { start: NaiveDate, prepayment: Decimal },
}

impl ContractTerms {
    pub fn plan(&self) -> RatePlan {
        match self {
            ContractTerms::Term { .. } => RatePlan::Term,
            ContractTerms::Mtm { .. } => RatePlan::Mtm,
            ContractTerms::Prepaid { .. } => RatePlan::Prepaid,
        }
    }

    /// Build the contract using the tariffs in `rates`
    pub fn build(&self, rates: &RateSchedule) -> BillingResult<Box<dyn Contract>> {
        let contract: Box<dyn Contract> = match self {
            ContractTerms::Term { start, end } => Box::new(TermContract::with_rates(
                *start,
                *end,
                rates.term.clone(),
            )?),
            ContractTerms::Mtm { start } => {
                Box::new(MtmContract::with_rates(*start, rates.mtm.clone()))
            }
            ContractTerms::Prepaid { start, prepayment } => Box::new(
                PrepaidContract::with_rates(*start, *prepayment, rates.prepaid.clone())?,
            ),
        };

        Ok(contract)
    }
}
