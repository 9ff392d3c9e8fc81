//! Client-side checks for the deposit and payout dialogs.
//!
//! The server enforces the same limits; these exist so a user gets the error
//! before a round trip. Messages are user-facing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::investment_model::{NewDeposit, PayoutRequest};
use crate::constants::{
    CRYPTO_PAYMENT_METHOD, DEPOSIT_CURRENCIES, MIN_DEPOSIT, MIN_PAYOUT, MIN_WALLET_ADDRESS_LEN,
    PAYOUT_CURRENCIES,
};
use crate::errors::ValidationError;

fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Raw input of the deposit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositForm {
    pub amount: String,
    pub currency: String,
}

impl Default for DepositForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: DEPOSIT_CURRENCIES[0].to_string(),
        }
    }
}

impl DepositForm {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }

    /// Validates the form and builds the request body for `account_id`.
    pub fn validate(&self, account_id: &str) -> Result<NewDeposit, ValidationError> {
        let amount = match parse_amount(&self.amount) {
            Some(amount) if amount >= MIN_DEPOSIT => amount,
            _ => {
                return Err(ValidationError::field(
                    "amount",
                    format!("Minimum deposit is ${}", MIN_DEPOSIT),
                ))
            }
        };

        let currency = self.currency.trim().to_lowercase();
        if !DEPOSIT_CURRENCIES.contains(&currency.as_str()) {
            return Err(ValidationError::field(
                "currency",
                format!(
                    "Currency {} not supported. Supported: {}",
                    self.currency,
                    DEPOSIT_CURRENCIES.join(", ")
                ),
            ));
        }

        Ok(NewDeposit {
            investment_account_id: account_id.to_string(),
            amount,
            currency,
            payment_method: CRYPTO_PAYMENT_METHOD.to_string(),
        })
    }
}

/// Raw input of the payout dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutForm {
    pub amount: String,
    pub currency: String,
    pub destination: String,
}

impl Default for PayoutForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: PAYOUT_CURRENCIES[0].to_string(),
            destination: String::new(),
        }
    }
}

impl PayoutForm {
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            destination: destination.into(),
        }
    }

    /// Validates against the account's available balance and builds the request body.
    ///
    /// Rules are checked in the dialog's order so the first failing rule wins.
    pub fn validate(
        &self,
        account_id: &str,
        available_balance: Decimal,
    ) -> Result<PayoutRequest, ValidationError> {
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| ValidationError::field("amount", "Please enter a valid amount"))?;

        if amount < MIN_PAYOUT {
            return Err(ValidationError::field(
                "amount",
                format!("Minimum payout amount is ${}", MIN_PAYOUT),
            ));
        }

        if amount > available_balance {
            return Err(ValidationError::field(
                "amount",
                "Amount exceeds available balance",
            ));
        }

        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::field(
                "destination",
                "Please enter a wallet address",
            ));
        }

        // Length check only; the chain-specific format is validated server-side.
        if self.destination.len() < MIN_WALLET_ADDRESS_LEN {
            return Err(ValidationError::field(
                "destination",
                "Please enter a valid wallet address",
            ));
        }

        let currency = self.currency.trim().to_uppercase();
        if !PAYOUT_CURRENCIES.contains(&currency.as_str()) {
            return Err(ValidationError::field(
                "currency",
                format!("Unsupported payout currency: {}", self.currency),
            ));
        }

        Ok(PayoutRequest {
            investment_account_id: account_id.to_string(),
            amount,
            payout_method: CRYPTO_PAYMENT_METHOD.to_string(),
            destination: destination.to_string(),
            currency,
        })
    }
}
