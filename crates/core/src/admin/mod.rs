//! Back-office views: platform statistics, review queues and tier management.

mod admin_model;

pub use admin_model::*;

#[cfg(test)]
mod admin_model_tests;
