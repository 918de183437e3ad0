//! Term contract
//!
//! A term contract commits the customer until an end date. It includes a
//! monthly pool of free minutes and charges a large deposit in the first month,
//! which is refunded when the contract is cancelled within its term.

use chrono::NaiveDate;
use phonebill_core::{
    models::{Bill, BillingPeriod, Call, RatePlan},
    BillingError, BillingResult, TermRates,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::contract::{Contract, ContractState};

#[derive(Debug, Clone)]
pub struct TermContract {
    state: ContractState,
    end: NaiveDate,
    rates: TermRates,
}

impl TermContract {
    /// Create a term contract with the default tariff
    pub fn new(start: NaiveDate, end: NaiveDate) -> BillingResult<Self> {
        Self::with_rates(start, end, TermRates::default())
    }

    pub fn with_rates(start: NaiveDate, end: NaiveDate, rates: TermRates) -> BillingResult<Self> {
        if BillingPeriod::from_date(&end) < BillingPeriod::from_date(&start) {
            return Err(BillingError::InvalidContract(format!(
                "term ends {} before it starts {}",
                end, start
            )));
        }

        Ok(Self {
            state: ContractState::new(start),
            end,
            rates,
        })
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last month covered by the term
    pub fn end_period(&self) -> BillingPeriod {
        BillingPeriod::from_date(&self.end)
    }

    fn is_start_month(&self, period: BillingPeriod) -> bool {
        period.contains(&self.state.start())
    }
}

impl Contract for TermContract {
    fn plan(&self) -> RatePlan {
        RatePlan::Term
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
        bill.set_rates(RatePlan::Term, self.rates.per_minute);
        bill.add_free_minutes(0);

        if self.is_start_month(period) {
            debug!("Charging term deposit {} in {}", self.rates.deposit, period);
            bill.add_fixed_cost(self.rates.deposit);
        }

        Ok(self.state.install(period, bill))
    }

    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        let allowance = self.rates.free_minutes;
        let bill = self.state.bill_for_call(call)?;

        let minutes = call.billable_minutes();
        let remaining = allowance.saturating_sub(bill.free_min());
        let free = minutes.min(remaining);

        bill.add_free_minutes(free);
        bill.add_billed_minutes(minutes - free);

        debug!(
            "Term call of {} minutes: {} free, {} billed ({} free used)",
            minutes,
            free,
            minutes - free,
            bill.free_min()
        );
        Ok(())
    }

    /// Close the contract; the deposit is returned if cancelled within the term
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        let (period, bill) = self.state.active_month()?;
        let cost = bill.get_cost();
        let within_term = period <= self.end_period();

        self.state.cancel();

        let owed = if within_term {
            cost - self.rates.deposit
        } else {
            cost
        };

        info!(
            "Cancelled term contract in {} (term ends {}): deposit refunded: {}, owed {}",
            period,
            self.end_period(),
            within_term,
            owed
        );
        Ok(owed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn call(year: i32, month: u32, duration: u32) -> Call {
        let time = date(year, month, 12).and_hms_opt(8, 15, 0).unwrap();
        Call::new("416-555-0101", "647-555-0199", time, duration)
    }

    fn contract() -> TermContract {
        TermContract::new(date(2022, 1, 10), date(2022, 6, 30)).unwrap()
    }

    #[test]
    fn test_start_month_charges_deposit() {
        let mut term = contract();
        term.new_month(1, 2022, Bill::new()).unwrap();

        let bill = term.bill().unwrap();
        assert_eq!(bill.get_cost(), dec!(320.00));
        assert_eq!(bill.plan(), Some(RatePlan::Term));
        assert_eq!(bill.min_rate(), dec!(0.10));
        assert_eq!(bill.free_min(), 0);
    }

    #[test]
    fn test_later_month_charges_fee_only() {
        let mut term = contract();
        term.new_month(1, 2022, Bill::new()).unwrap();
        let january = term.new_month(2, 2022, Bill::new()).unwrap().unwrap();

        assert_eq!(january.get_cost(), dec!(320.00));
        assert_eq!(term.bill().unwrap().get_cost(), dec!(20.00));
    }

    #[test]
    fn test_deposit_requires_matching_year() {
        let mut term = TermContract::new(date(2021, 3, 1), date(2023, 3, 1)).unwrap();
        term.new_month(3, 2022, Bill::new()).unwrap();
        assert_eq!(term.bill().unwrap().get_cost(), dec!(20.00));
    }

    #[test]
    fn test_exactly_free_allowance() {
        let mut term = contract();
        term.new_month(2, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 2, 3000)).unwrap();
        term.bill_call(&call(2022, 2, 3000)).unwrap();

        let bill = term.bill().unwrap();
        assert_eq!(bill.free_min(), 100);
        assert_eq!(bill.billed_min(), 0);
        assert_eq!(bill.get_cost(), dec!(20.00));
    }

    #[test]
    fn test_overflow_bills_only_excess() {
        let mut term = contract();
        term.new_month(2, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 2, 3000)).unwrap();
        term.bill_call(&call(2022, 2, 6000)).unwrap();

        let bill = term.bill().unwrap();
        assert_eq!(bill.free_min(), 100);
        assert_eq!(bill.billed_min(), 50);
        assert_eq!(bill.get_cost(), dec!(25.00));
    }

    #[test]
    fn test_calls_after_pool_exhausted_fully_billed() {
        let mut term = contract();
        term.new_month(2, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 2, 6600)).unwrap(); // 110 minutes
        term.bill_call(&call(2022, 2, 61)).unwrap(); // 2 minutes

        let bill = term.bill().unwrap();
        assert_eq!(bill.free_min(), 100);
        assert_eq!(bill.billed_min(), 12);
    }

    #[test]
    fn test_free_pool_resets_each_month() {
        let mut term = contract();
        term.new_month(2, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 2, 6000)).unwrap();
        term.new_month(3, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 3, 600)).unwrap();

        let bill = term.bill().unwrap();
        assert_eq!(bill.free_min(), 10);
        assert_eq!(bill.billed_min(), 0);
    }

    #[test]
    fn test_cancel_in_end_month_refunds_deposit() {
        let mut term = contract();
        term.new_month(6, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 6, 6600)).unwrap();

        let cost = term.bill().unwrap().get_cost();
        assert_eq!(cost, dec!(21.00));
        assert_eq!(term.cancel_contract().unwrap(), dec!(-279.00));
    }

    #[test]
    fn test_cancel_in_earlier_year_refunds_deposit() {
        let mut term = TermContract::new(date(2021, 11, 1), date(2022, 2, 28)).unwrap();
        term.new_month(12, 2021, Bill::new()).unwrap();
        assert_eq!(term.cancel_contract().unwrap(), dec!(-280.00));
    }

    #[test]
    fn test_cancel_after_term_keeps_deposit() {
        let mut term = contract();
        term.new_month(7, 2022, Bill::new()).unwrap();
        assert_eq!(term.cancel_contract().unwrap(), dec!(20.00));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = TermContract::new(date(2022, 5, 1), date(2022, 4, 30)).unwrap_err();
        assert_eq!(err.error_code(), "invalid_contract");
    }

    #[test]
    fn test_custom_rates() {
        let rates = TermRates {
            monthly_fee: dec!(15.00),
            per_minute: dec!(0.20),
            free_minutes: 10,
            deposit: dec!(100.00),
        };
        let mut term = TermContract::with_rates(date(2022, 1, 1), date(2022, 12, 31), rates)
            .unwrap();
        term.new_month(1, 2022, Bill::new()).unwrap();
        term.bill_call(&call(2022, 1, 900)).unwrap(); // 15 minutes

        assert_eq!(term.bill().unwrap().get_cost(), dec!(116.00));
    }
}
