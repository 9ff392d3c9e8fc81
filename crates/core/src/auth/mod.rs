//! Credential lifecycle: sign-up, login, tokens, password reset and 2FA.

mod auth_model;
mod auth_validation;

pub use auth_model::*;
pub use auth_validation::*;
