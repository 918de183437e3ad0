//! Contract billing rules for PhoneBill
//!
//! This crate contains the per-contract billing logic and the phone line
//! driver that runs it month by month.
//!
//! # Contracts
//!
//! - `TermContract` - fixed term with deposit and a monthly free-minute pool
//! - `MtmContract` - month-to-month, every minute billed
//! - `PrepaidContract` - signed balance carried across months, auto top-up
//!
//! # Billing cycle
//!
//! For each month the driver calls `new_month` once with a fresh bill, then
//! `bill_call` for every call of that month, and finally `cancel_contract`
//! when the line is closed. `PhoneLine` implements this cycle.

pub mod contract;
pub mod mtm;
pub mod phone_line;
pub mod prepaid;
pub mod term;
pub mod terms;

pub use contract::{Contract, ContractState, ContractStatus};
pub use mtm::MtmContract;
pub use phone_line::PhoneLine;
pub use prepaid::PrepaidContract;
pub use term::TermContract;
pub use terms::ContractTerms;
