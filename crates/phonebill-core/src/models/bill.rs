//! Monthly bill model
//!
//! A bill accumulates the cost of one contract for one billing month. It is a
//! plain accumulator: the caps on free minutes are enforced by the contract
//! rules, not here.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Rate plan label applied to a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatePlan {
    Term,
    Mtm,
    Prepaid,
}

impl fmt::Display for RatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatePlan::Term => write!(f, "term"),
            RatePlan::Mtm => write!(f, "mtm"),
            RatePlan::Prepaid => write!(f, "prepaid"),
        }
    }
}

impl RatePlan {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "term" => Some(RatePlan::Term),
            "mtm" => Some(RatePlan::Mtm),
            "prepaid" => Some(RatePlan::Prepaid),
            _ => None,
        }
    }
}

/// Bill for one contract and one month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bill {
    plan: Option<RatePlan>,
    min_rate: Decimal,
    fixed_cost: Decimal,
    free_min: u32,
    billed_min: u32,
}

impl Bill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate plan and the per-minute rate
    pub fn set_rates(&mut self, plan: RatePlan, min_rate: Decimal) {
        self.plan = Some(plan);
        self.min_rate = min_rate;
    }

    pub fn add_fixed_cost(&mut self, amount: Decimal) {
        self.fixed_cost += amount;
    }

    pub fn add_free_minutes(&mut self, minutes: u32) {
        self.free_min = self.free_min.saturating_add(minutes);
    }

    pub fn add_billed_minutes(&mut self, minutes: u32) {
        self.billed_min = self.billed_min.saturating_add(minutes);
    }

    /// Fixed costs plus billed minutes at the current rate
    pub fn get_cost(&self) -> Decimal {
        self.fixed_cost + Decimal::from(self.billed_min) * self.min_rate
    }

    /// Free minutes consumed this month
    #[inline]
    pub fn free_min(&self) -> u32 {
        self.free_min
    }

    #[inline]
    pub fn billed_min(&self) -> u32 {
        self.billed_min
    }

    #[inline]
    pub fn fixed_cost(&self) -> Decimal {
        self.fixed_cost
    }

    #[inline]
    pub fn min_rate(&self) -> Decimal {
        self.min_rate
    }

    #[inline]
    pub fn plan(&self) -> Option<RatePlan> {
        self.plan
    }

    /// Monthly statement for this bill
    pub fn summary(&self) -> BillSummary {
        BillSummary {
            plan: self.plan,
            min_rate: self.min_rate,
            fixed: self.fixed_cost,
            free_mins: self.free_min,
            billed_mins: self.billed_min,
            total: self.get_cost(),
        }
    }
}

/// Serializable monthly statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    pub plan: Option<RatePlan>,
    pub min_rate: Decimal,
    pub fixed: Decimal,
    pub free_mins: u32,
    pub billed_mins: u32,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_bill_costs_nothing() {
        let bill = Bill::new();
        assert_eq!(bill.get_cost(), Decimal::ZERO);
        assert_eq!(bill.plan(), None);
    }

    #[test]
    fn test_cost_is_fixed_plus_billed_minutes() {
        let mut bill = Bill::new();
        bill.set_rates(RatePlan::Mtm, dec!(0.05));
        bill.add_fixed_cost(dec!(50.00));
        bill.add_billed_minutes(3);
        bill.add_free_minutes(7);

        assert_eq!(bill.get_cost(), dec!(50.15));
        assert_eq!(bill.free_min(), 7);
        assert_eq!(bill.billed_min(), 3);
    }

    #[test]
    fn test_additive_accumulators() {
        let mut bill = Bill::new();
        bill.set_rates(RatePlan::Term, dec!(0.10));
        bill.add_fixed_cost(dec!(20.00));
        bill.add_fixed_cost(dec!(300.00));
        bill.add_billed_minutes(10);
        bill.add_billed_minutes(5);

        assert_eq!(bill.fixed_cost(), dec!(320.00));
        assert_eq!(bill.get_cost(), dec!(321.50));
    }

    #[test]
    fn test_minute_counters_saturate() {
        let mut bill = Bill::new();
        bill.set_rates(RatePlan::Mtm, dec!(0.05));
        bill.add_billed_minutes(u32::MAX);
        bill.add_billed_minutes(1);
        bill.add_free_minutes(u32::MAX);
        bill.add_free_minutes(10);

        assert_eq!(bill.billed_min(), u32::MAX);
        assert_eq!(bill.free_min(), u32::MAX);
        assert_eq!(bill.get_cost(), Decimal::from(u32::MAX) * dec!(0.05));
    }

    #[test]
    fn test_get_cost_is_idempotent() {
        let mut bill = Bill::new();
        bill.set_rates(RatePlan::Prepaid, dec!(0.025));
        bill.add_billed_minutes(60);
        let first = bill.get_cost();
        assert_eq!(bill.get_cost(), first);
        assert_eq!(bill.get_cost(), first);
    }

    #[test]
    fn test_summary_serializes_plan_label() {
        let mut bill = Bill::new();
        bill.set_rates(RatePlan::Term, dec!(0.10));
        bill.add_fixed_cost(dec!(20.00));

        let summary = bill.summary();
        assert_eq!(summary.total, dec!(20.00));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["plan"], "term");
        assert_eq!(json["free_mins"], 0);
    }

    #[test]
    fn test_rate_plan_parse() {
        assert_eq!(RatePlan::from_str("MTM"), Some(RatePlan::Mtm));
        assert_eq!(RatePlan::from_str("unknown"), None);
        assert_eq!(RatePlan::Prepaid.to_string(), "prepaid");
    }
}
