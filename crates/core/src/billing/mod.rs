//! Subscription checkout through Stripe or a crypto invoice.

mod billing_model;

pub use billing_model::*;
