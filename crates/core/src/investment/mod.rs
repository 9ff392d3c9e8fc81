//! Investment product: tiers, accounts, deposits, returns and payouts.
//!
//! Models mirror the REST payloads of `/api/investment/*`. The form types
//! re-implement the client-side checks the deposit and payout dialogs run
//! before anything is sent.

mod investment_forms;
mod investment_model;

pub use investment_forms::*;
pub use investment_model::*;

#[cfg(test)]
mod investment_forms_tests;
