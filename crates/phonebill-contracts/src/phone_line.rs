//! Phone line driver
//!
//! A phone line pairs a number with its contract and drives the monthly
//! billing cycle: it supplies a fresh bill each month, forwards calls to the
//! contract and keeps the closed bills for later statements.

use phonebill_core::{
    models::{Bill, BillSummary, BillingPeriod, Call},
    BillingError, BillingResult,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

use crate::Contract;

#[derive(Debug)]
pub struct PhoneLine {
    number: String,
    contract: Box<dyn Contract>,
    bills: BTreeMap<BillingPeriod, Bill>,
    calls: BTreeMap<BillingPeriod, Vec<Call>>,
}

impl PhoneLine {
    pub fn new(number: impl Into<String>, contract: Box<dyn Contract>) -> Self {
        Self {
            number: number.into(),
            contract,
            bills: BTreeMap::new(),
            calls: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn contract(&self) -> &dyn Contract {
        self.contract.as_ref()
    }

    /// Start billing `month`/`year`
    ///
    /// Does nothing if that month is already the active one. Months that were
    /// already closed cannot be reopened.
    #[instrument(skip(self), fields(number = %self.number))]
    pub fn new_month(&mut self, month: u32, year: i32) -> BillingResult<()> {
        let period = BillingPeriod::new(month, year)?;
        if !self.contract.status().is_active() {
            return Err(BillingError::ContractCancelled);
        }

        let previous = self.contract.period();
        if previous == Some(period) {
            debug!("Billing period {} already active", period);
            return Ok(());
        }

        let closed = self.contract.new_month(month, year, Bill::new())?;
        if let (Some(previous), Some(closed)) = (previous, closed) {
            self.bills.insert(previous, closed);
        }
        Ok(())
    }

    /// Bill a call made from this line
    pub fn make_call(&mut self, call: Call) -> BillingResult<()> {
        self.contract.bill_call(&call)?;
        self.calls.entry(call.period()).or_default().push(call);
        Ok(())
    }

    /// Statement for a month, if that month was billed
    pub fn bill_summary(&self, month: u32, year: i32) -> Option<BillSummary> {
        let period = BillingPeriod::new(month, year).ok()?;
        if self.contract.period() == Some(period) {
            return self.contract.bill().map(Bill::summary);
        }
        self.bills.get(&period).map(Bill::summary)
    }

    /// Calls billed in a month
    pub fn calls_in(&self, month: u32, year: i32) -> &[Call] {
        BillingPeriod::new(month, year)
            .ok()
            .and_then(|period| self.calls.get(&period))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cancel the contract and return the amount owed to close the line
    #[instrument(skip(self), fields(number = %self.number))]
    pub fn cancel_line(&mut self) -> BillingResult<Decimal> {
        let owed = self.contract.cancel_contract()?;
        info!("Closed line {}: owed {}", self.number, owed);
        Ok(owed)
    }
}
