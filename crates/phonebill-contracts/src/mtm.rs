//! Month-to-month contract
//!
//! No end date, no deposit and no included minutes. Every minute is billed at
//! the month-to-month rate on top of a higher monthly fee.

use chrono::NaiveDate;
use phonebill_core::{
    models::{Bill, RatePlan},
    BillingResult, MtmRates,
};
use tracing::instrument;

use crate::contract::{Contract, ContractState};

#[derive(Debug, Clone)]
pub struct MtmContract {
    state: ContractState,
    rates: MtmRates,
}

impl MtmContract {
    /// Create a month-to-month contract with the default tariff
    pub fn new(start: NaiveDate) -> Self {
        Self::with_rates(start, MtmRates::default())
    }

    pub fn with_rates(start: NaiveDate, rates: MtmRates) -> Self {
        Self {
            state: ContractState::new(start),
            rates,
        }
    }
}

impl Contract for MtmContract {
    fn plan(&self) -> RatePlan {
        RatePlan::Mtm
    }

    fn state(&self) -> &ContractState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }

    #[instrument(skip(self, bill))]
    fn new_month(&mut self, month: u32, year: i32, mut bill: Bill) -> BillingResult<Option<Bill>> {
        let period = self.state.begin_month(month, year)?;

        bill.add_fixed_cost(self.rates.monthly_fee);
        bill.set_rates(RatePlan::Mtm, self.rates.per_minute);

        Ok(self.state.install(period, bill))
    }
}
