//! Identity verification: submission payloads, review status, and the
//! three-step wizard that collects them.

mod kyc_model;
mod kyc_wizard;

pub use kyc_model::*;
pub use kyc_wizard::*;

#[cfg(test)]
mod kyc_model_tests;
#[cfg(test)]
mod kyc_wizard_tests;
