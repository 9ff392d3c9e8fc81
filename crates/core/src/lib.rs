//! Tunicoin Core - domain models and client-side rules.
//!
//! Everything here is pure: wire shapes for the REST API, the portfolio
//! history builder, form and wizard validation, and the secret-store trait
//! that the client crate and the CLI implement storage for. No networking.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod constants;
pub mod errors;
pub mod investment;
pub mod kyc;
pub mod portfolio;
pub mod practice;
pub mod secrets;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
