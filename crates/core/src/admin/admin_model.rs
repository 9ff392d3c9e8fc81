//! Admin models for `/api/admin/*`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::investment::Payout;
use crate::kyc::KycSubmission;
use crate::utils::serde_formats::{decimal_input, timestamp};

pub const DEFAULT_ADMIN_PAGE_SIZE: u32 = 20;

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub active_investments: i64,
    pub pending_kyc: i64,
    pub total_deposits: i64,
    #[serde(with = "decimal_input")]
    pub total_deposits_amount: Decimal,
    pub total_returns: i64,
    #[serde(with = "decimal_input")]
    pub total_returns_amount: Decimal,
    pub pending_payouts: i64,
    #[serde(with = "decimal_input")]
    pub pending_payouts_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    User,
    Deposit,
    Kyc,
    Payout,
    #[serde(other)]
    Other,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pagination and status filter for the review queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for AdminListQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_ADMIN_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl AdminListQuery {
    /// `status` of `"all"` (or blank) means no filter.
    pub fn with_status(status: Option<&str>) -> Self {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.offset = page.saturating_mul(self.limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycSubmissionPage {
    #[serde(default)]
    pub submissions: Vec<KycSubmission>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutPage {
    #[serde(default)]
    pub payouts: Vec<Payout>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayoutStats {
    #[serde(default)]
    pub pending_count: i64,
    #[serde(default, with = "decimal_input")]
    pub pending_amount: Decimal,
    #[serde(default)]
    pub approved_count: i64,
    #[serde(default, with = "decimal_input")]
    pub approved_amount: Decimal,
}

/// Approve or reject a KYC submission or payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Path segment: `.../{id}/approve` or `.../{id}/reject`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

/// Body sent with a review action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub admin_notes: String,
}

impl ReviewDecision {
    pub fn approve(notes: impl Into<String>) -> Self {
        Self {
            admin_notes: notes.into(),
        }
    }

    /// A rejection must carry a reason.
    pub fn reject(reason: impl Into<String>) -> Result<Self, ValidationError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ValidationError::field(
                "admin_notes",
                "Please provide a reason for rejection",
            ));
        }
        Ok(Self {
            admin_notes: reason,
        })
    }
}

/// Tier as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminTier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "decimal_input", alias = "minimum_deposit")]
    pub min_deposit: Decimal,
    #[serde(with = "decimal_input")]
    pub return_rate: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminTierList {
    #[serde(default)]
    pub tiers: Vec<AdminTier>,
}

/// Body for creating or updating a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPayload {
    pub name: String,
    pub description: String,
    pub min_deposit: Decimal,
    pub return_rate: Decimal,
    pub is_active: bool,
}

/// Raw input of the tier editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierForm {
    pub name: String,
    pub description: String,
    pub min_deposit: String,
    pub return_rate: String,
    pub is_active: bool,
}

impl Default for TierForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            min_deposit: String::new(),
            return_rate: String::new(),
            is_active: true,
        }
    }
}

impl TierForm {
    pub fn validate(&self) -> Result<TierPayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", "Tier name is required"));
        }
        let positive = |raw: &str| {
            Decimal::from_str(raw.trim())
                .ok()
                .filter(|v| *v > Decimal::ZERO)
        };
        let min_deposit = positive(&self.min_deposit).ok_or_else(|| {
            ValidationError::field("min_deposit", "Minimum deposit must be greater than 0")
        })?;
        let return_rate = positive(&self.return_rate).ok_or_else(|| {
            ValidationError::field("return_rate", "Return rate must be greater than 0")
        })?;

        Ok(TierPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            min_deposit,
            return_rate,
            is_active: self.is_active,
        })
    }
}

impl From<&AdminTier> for TierForm {
    fn from(tier: &AdminTier) -> Self {
        Self {
            name: tier.name.clone(),
            description: tier.description.clone().unwrap_or_default(),
            min_deposit: tier.min_deposit.to_string(),
            return_rate: tier.return_rate.to_string(),
            is_active: tier.is_active,
        }
    }
}
