//! Simulated trading accounts used by the CFD practice tool.

mod practice_model;

pub use practice_model::*;
