//! Investment domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::serde_formats::{decimal_input, optional_timestamp, timestamp};

/// A product offering with a minimum deposit and an advertised return range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentTier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(with = "decimal_input", alias = "min_deposit")]
    pub minimum_deposit: Decimal,
    #[serde(default)]
    pub maximum_deposit: Option<Decimal>,
    #[serde(default)]
    pub min_annual_return_rate: Option<Decimal>,
    #[serde(default)]
    pub max_annual_return_rate: Option<Decimal>,
    #[serde(default, alias = "monthly_return_percentage")]
    pub min_monthly_return_rate: Option<Decimal>,
    #[serde(default)]
    pub max_monthly_return_rate: Option<Decimal>,
    #[serde(default)]
    pub lock_period_days: Option<i32>,
    #[serde(default)]
    pub features: serde_json::Value,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl InvestmentTier {
    /// Feature bullet points. The API sends either a list of strings or an object.
    pub fn feature_list(&self) -> Vec<String> {
        match &self.features {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => format!("{}: {}", k, s),
                    serde_json::Value::Bool(true) => k.clone(),
                    other => format!("{}: {}", k, other),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Lifecycle state of an investment account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    PendingKyc,
    Suspended,
    #[default]
    None,
    #[serde(other)]
    Unknown,
}

/// A user's investment account. `balance` is the authoritative ledger balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAccount {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tier_id: Option<String>,
    #[serde(default)]
    pub tier_name: Option<String>,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(with = "decimal_input", alias = "current_balance")]
    pub balance: Decimal,
    #[serde(with = "decimal_input", alias = "total_deposited")]
    pub total_invested: Decimal,
    #[serde(with = "decimal_input")]
    pub total_returns: Decimal,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InvestmentAccount {
    pub fn needs_kyc(&self) -> bool {
        self.status == AccountStatus::PendingKyc
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestmentAccount {
    pub tier_id: String,
}

/// Deposit lifecycle as reported by the payment provider webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    Pending,
    Confirming,
    Confirmed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub investment_account_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(with = "decimal_input")]
    pub amount: Decimal,
    pub currency: String,
    pub status: DepositStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, alias = "provider_transaction_id")]
    pub payment_id: Option<String>,
    #[serde(default, alias = "pay_address")]
    pub payment_address: Option<String>,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub pay_amount: Option<Decimal>,
    #[serde(default, with = "optional_timestamp")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Deposit {
    /// Timestamp at which this deposit counts towards the balance, if it does.
    pub fn confirmed_on(&self) -> Option<DateTime<Utc>> {
        match self.status {
            DepositStatus::Confirmed => self.confirmed_at,
            _ => None,
        }
    }
}

/// Body of `POST /api/investment/deposits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeposit {
    pub investment_account_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
}

/// A return credited to an account for one accrual period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturn {
    pub id: String,
    pub investment_account_id: String,
    #[serde(with = "decimal_input", alias = "actual_return")]
    pub amount: Decimal,
    #[serde(with = "decimal_input", alias = "return_percentage")]
    pub return_rate: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Processing,
    Completed,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub investment_account_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(with = "decimal_input")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub payout_method: Option<String>,
    #[serde(alias = "crypto_address")]
    pub destination: String,
    pub status: PayoutStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub processed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/investment/payouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub investment_account_id: String,
    pub amount: Decimal,
    pub payout_method: String,
    pub destination: String,
    pub currency: String,
}
