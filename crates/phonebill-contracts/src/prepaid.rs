//! Prepaid contract
//!
//! The customer prepays an arbitrary amount at signup. The balance is a signed
//! ledger carried across months: negative means credit, positive means the
//! customer owes money. When credit runs low at the start of a month the
//! account is topped up automatically.

use chrono::NaiveDate;
use phonebill_core::{
    models::{Bill, Call, RatePlan},
    BillingError, BillingResult, PrepaidRates,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::contract::{bill_minutes, Contract, ContractState};

#[derive(Debug, Clone)]
pub struct PrepaidContract {
    state: ContractState,
    balance: Decimal,
    rates: PrepaidRates,
}

impl PrepaidContract {
    /// Create a prepaid contract with the default tariff
    pub fn new(start: NaiveDate, prepayment: Decimal) -> BillingResult<Self> {
        Self::with_rates(start, prepayment, PrepaidRates::default())
    }

    pub fn with_rates(
        start: NaiveDate,
        prepayment: Decimal,
        rates: PrepaidRates,
    ) -> BillingResult<Self> {
        if prepayment < Decimal::ZERO {
            return Err(BillingError::InvalidContract(format!(
                "prepayment cannot be negative: {}",
                prepayment
            )));
        }

        Ok(Self {
            state: ContractState::new(start),
            balance: -prepayment,
            rates,
        })
    }

    /// Current balance; negative is credit
    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Contract for PrepaidContract {
    fn plan(&self) -> RatePlan {
        RatePlan::Prepaid
    }

    fn state(&self) -> &ContractState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }

    /// Start a month, topping up the balance if credit is low
    ///
    /// The resulting balance is carried into the bill as its fixed cost.
    #[instrument(skip(self, bill))]
    fn new_month(&mut self, month: u32, year: i32, mut bill: Bill) -> BillingResult<Option<Bill>> {
        let period = self.state.begin_month(month, year)?;

        bill.set_rates(RatePlan::Prepaid, self.rates.per_minute);

        if self.balance > self.rates.low_balance_threshold {
            self.balance -= self.rates.top_up_amount;
            info!(
                "Topped up prepaid balance by {} in {}: balance {}",
                self.rates.top_up_amount, period, self.balance
            );
        }
        bill.add_fixed_cost(self.balance);

        Ok(self.state.install(period, bill))
    }

    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        let minutes = bill_minutes(&mut self.state, call)?;
        self.balance += Decimal::from(minutes) * self.rates.per_minute;

        debug!("Prepaid balance after call: {}", self.balance);
        Ok(())
    }

    /// Close the contract; remaining credit is forfeited
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        let (period, _) = self.state.active_month()?;
        self.state.cancel();

        let owed = self.balance.max(Decimal::ZERO);
        info!(
            "Cancelled prepaid contract in {}: balance {}, owed {}",
            period, self.balance, owed
        );
        Ok(owed)
    }
}
