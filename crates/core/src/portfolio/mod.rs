//! Portfolio views derived client-side from account activity.

pub mod history;

pub use history::{build_portfolio_history, PortfolioHistory, PortfolioSummary, TimePeriod};
