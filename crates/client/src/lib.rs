//! Tunicoin Client - typed access to the Tunicoin REST API.
//!
//! [`ApiClient`] attaches the session's bearer token to every request and,
//! on a 401, refreshes the access token once and replays the request.
//! Endpoint bindings live in one module per API area.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod client;
pub mod dashboard;
pub mod errors;
pub mod investment;
pub mod kyc;
pub mod practice;
pub mod session;
pub mod task;

pub use client::{ApiClient, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use dashboard::{load_dashboard, Dashboard};
pub use errors::{ClientError, Result};
pub use investment::InvestmentApi;
pub use session::{Session, SessionEvent};
pub use task::ViewScope;
