//! Base contract behaviour
//!
//! Every contract variant implements [`Contract`]. Starting a new month has no
//! sensible default and must be provided by each variant; billing a call and
//! cancelling fall back to the plain per-minute behaviour below.
//!
//! A contract owns the bill of its current month. Starting the next month
//! hands the previous bill back to the caller, so a bill is never shared
//! between months.

use chrono::NaiveDate;
use phonebill_core::{
    models::{Bill, BillingPeriod, Call, RatePlan},
    BillingError, BillingResult,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Contract lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Active,
    Cancelled,
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractStatus::Active => write!(f, "active"),
            ContractStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl ContractStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ContractStatus::Active)
    }
}

/// State shared by all contract variants
#[derive(Debug, Clone)]
pub struct ContractState {
    start: NaiveDate,
    status: ContractStatus,
    current: Option<(BillingPeriod, Bill)>,
}

impl ContractState {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            status: ContractStatus::Active,
            current: None,
        }
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn status(&self) -> ContractStatus {
        self.status
    }

    /// Most recently started billing month
    pub fn period(&self) -> Option<BillingPeriod> {
        self.current.as_ref().map(|(period, _)| *period)
    }

    /// Bill of the most recently started month
    pub fn bill(&self) -> Option<&Bill> {
        self.current.as_ref().map(|(_, bill)| bill)
    }

    fn ensure_active(&self) -> BillingResult<()> {
        if self.status.is_active() {
            Ok(())
        } else {
            warn!("Operation on cancelled contract started {}", self.start);
            Err(BillingError::ContractCancelled)
        }
    }

    /// Validate that a month may be started, without changing anything
    ///
    /// Months only move forward; a month at or before the current one is
    /// already closed.
    pub fn begin_month(&self, month: u32, year: i32) -> BillingResult<BillingPeriod> {
        let period = BillingPeriod::new(month, year)?;
        self.ensure_active()?;

        if let Some(current) = self.period() {
            if period <= current {
                warn!(
                    "Refusing to restart billing period {} (current {})",
                    period, current
                );
                return Err(BillingError::PeriodClosed(period.to_string()));
            }
        }
        Ok(period)
    }

    /// Make `bill` the current bill, returning the previous month's bill
    pub fn install(&mut self, period: BillingPeriod, bill: Bill) -> Option<Bill> {
        info!(
            "Started billing period {} ({} fixed)",
            period,
            bill.fixed_cost()
        );
        self.current
            .replace((period, bill))
            .map(|(_, previous)| previous)
    }

    /// Current period and bill of an active contract
    pub fn active_month(&self) -> BillingResult<(BillingPeriod, &Bill)> {
        self.ensure_active()?;
        match &self.current {
            Some((period, bill)) => Ok((*period, bill)),
            None => {
                warn!("No bill started for contract started {}", self.start);
                Err(BillingError::NoActiveBill)
            }
        }
    }

    /// Current bill, provided `call` was placed in the current period
    pub fn bill_for_call(&mut self, call: &Call) -> BillingResult<&mut Bill> {
        self.ensure_active()?;
        let start = self.start;
        let (period, bill) = self.current.as_mut().ok_or_else(|| {
            warn!("No bill started for contract started {}", start);
            BillingError::NoActiveBill
        })?;

        if !period.contains(&call.time) {
            warn!(
                "Call at {} does not belong to billing period {}",
                call.time, period
            );
            return Err(BillingError::PeriodMismatch {
                expected: period.to_string(),
                actual: call.period().to_string(),
            });
        }

        Ok(bill)
    }

    /// Mark the contract as terminated
    pub fn cancel(&mut self) {
        self.status = ContractStatus::Cancelled;
    }
}

/// Add the call's whole minutes to the bill at the current rate
///
/// Returns the number of minutes billed.
pub fn bill_minutes(state: &mut ContractState, call: &Call) -> BillingResult<u32> {
    let minutes = call.billable_minutes();
    state.bill_for_call(call)?.add_billed_minutes(minutes);
    debug!("Billed {} minutes for {}s call", minutes, call.duration);
    Ok(minutes)
}

/// A phone line contract
pub trait Contract: fmt::Debug + Send {
    /// Rate plan this contract bills under
    fn plan(&self) -> RatePlan;

    fn state(&self) -> &ContractState;

    fn state_mut(&mut self) -> &mut ContractState;

    /// Advance to a new month, which may be the first month of the contract
    ///
    /// Stores `bill` as the current bill after setting its rate and fixed
    /// costs, and returns the bill of the previous month.
    fn new_month(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<Option<Bill>>;

    /// Add a call to the current bill
    ///
    /// Fails unless a month was started and the call belongs to it.
    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        bill_minutes(self.state_mut(), call).map(|_| ())
    }

    /// Close the contract and return the amount owed
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        let (period, bill) = self.state().active_month()?;
        let owed = bill.get_cost();
        self.state_mut().cancel();
        info!("Cancelled {} contract in {}: owed {}", self.plan(), period, owed);
        Ok(owed)
    }

    fn start(&self) -> NaiveDate {
        self.state().start()
    }

    fn status(&self) -> ContractStatus {
        self.state().status()
    }

    fn period(&self) -> Option<BillingPeriod> {
        self.state().period()
    }

    fn bill(&self) -> Option<&Bill> {
        self.state().bill()
    }
}
