//! Portfolio balance history.
//!
//! Rebuilds the cumulative balance of an investment account from its
//! confirmed deposits and credited returns, for charting.

mod history_builder;
mod history_model;

pub use history_builder::*;
pub use history_model::*;
