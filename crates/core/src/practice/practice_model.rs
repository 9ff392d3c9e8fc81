//! Practice account models for `/api/accounts`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::serde_formats::{decimal_input, timestamp};

pub const DEFAULT_PRACTICE_BALANCE: Decimal = dec!(10000);
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
pub const DEFAULT_MAX_LEVERAGE: u32 = 10;
pub const MAX_LEVERAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeAccount {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    pub base_currency: String,
    #[serde(with = "decimal_input")]
    pub balance: Decimal,
    #[serde(with = "decimal_input")]
    pub equity: Decimal,
    #[serde(default, with = "decimal_input")]
    pub margin_used: Decimal,
    #[serde(default, with = "decimal_input")]
    pub margin_available: Decimal,
    #[serde(default = "default_true")]
    pub is_demo: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_max_leverage")]
    pub max_leverage: u32,
    #[serde(default)]
    pub max_daily_loss: Option<Decimal>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_max_leverage() -> u32 {
    DEFAULT_MAX_LEVERAGE
}

impl PracticeAccount {
    /// Unrealised P&L: equity over cash balance.
    pub fn unrealized_pnl(&self) -> Decimal {
        self.equity - self.balance
    }
}

/// Row of the account list; the list endpoint omits margin and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeAccountSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "decimal_input")]
    pub balance: Decimal,
    #[serde(with = "decimal_input")]
    pub equity: Decimal,
    #[serde(default = "default_true")]
    pub is_demo: bool,
}

/// Body of `POST /api/accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPracticeAccount {
    pub name: String,
    pub base_currency: String,
    pub initial_balance: Decimal,
    pub is_demo: bool,
    pub max_leverage: u32,
}

impl NewPracticeAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            initial_balance: DEFAULT_PRACTICE_BALANCE,
            is_demo: true,
            max_leverage: DEFAULT_MAX_LEVERAGE,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > 255 {
            return Err(ValidationError::field(
                "name",
                "Account name must be between 1 and 255 characters",
            ));
        }
        if self.base_currency.trim().is_empty() || self.base_currency.len() > 10 {
            return Err(ValidationError::field(
                "base_currency",
                "Please enter a valid base currency",
            ));
        }
        if self.initial_balance <= Decimal::ZERO {
            return Err(ValidationError::field(
                "initial_balance",
                "Initial balance must be greater than 0",
            ));
        }
        if !(1..=MAX_LEVERAGE_LIMIT).contains(&self.max_leverage) {
            return Err(ValidationError::field(
                "max_leverage",
                "Leverage must be between 1 and 100",
            ));
        }
        Ok(())
    }
}
