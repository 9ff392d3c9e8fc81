use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEPOSIT_CURRENCIES;
use crate::errors::ValidationError;
use crate::utils::serde_formats::decimal_input;

pub const SUBSCRIPTION_PURPOSE: &str = "subscription";

/// Body of `POST /api/billing/stripe/create-checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub plan: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Builds return URLs under `origin` the way the pricing page does.
    pub fn for_plan(plan: &str, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            plan: plan.trim().to_lowercase(),
            success_url: format!("{}/dashboard?checkout=success", origin),
            cancel_url: format!("{}/pricing?checkout=cancelled", origin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub plan: String,
    pub interval: String,
}

/// Body of `POST /api/crypto/deposit` for a subscription payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoDepositRequest {
    pub currency: String,
    pub amount: Decimal,
    pub purpose: String,
    pub metadata: PlanMetadata,
}

impl CryptoDepositRequest {
    pub fn subscription(
        currency: &str,
        amount: Decimal,
        plan: &str,
        interval: &str,
    ) -> Result<Self, ValidationError> {
        let currency = currency.trim().to_lowercase();
        if currency.is_empty() {
            return Err(ValidationError::field(
                "currency",
                "Please select a cryptocurrency",
            ));
        }
        if !DEPOSIT_CURRENCIES.contains(&currency.as_str()) {
            return Err(ValidationError::field(
                "currency",
                format!("Unsupported currency '{}'", currency),
            ));
        }
        Ok(Self {
            currency,
            amount,
            purpose: SUBSCRIPTION_PURPOSE.to_string(),
            metadata: PlanMetadata {
                plan: plan.trim().to_lowercase(),
                interval: interval.to_string(),
            },
        })
    }
}

/// Invoice returned for a crypto payment. Either a hosted page or raw details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoPayment {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default, alias = "pay_address")]
    pub address: Option<String>,
    #[serde(default, with = "decimal_input")]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl CryptoPayment {
    /// What to show when there is no hosted page to open.
    pub fn instructions(&self) -> String {
        match (&self.payment_url, &self.address) {
            (Some(url), _) => format!("Complete the payment at {}", url),
            (None, Some(address)) => format!(
                "Please send {} {} to: {}",
                self.amount,
                self.currency.to_uppercase(),
                address
            ),
            (None, None) => "Payment created; awaiting payment details".to_string(),
        }
    }
}
