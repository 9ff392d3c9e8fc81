//! Subscription checkout bindings.

use tunicoin_core::billing::{CheckoutRequest, CheckoutSession, CryptoDepositRequest, CryptoPayment};

use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    pub async fn create_stripe_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        self.post("/api/billing/stripe/create-checkout", request)
            .await
    }

    pub async fn create_crypto_deposit(&self, request: &CryptoDepositRequest) -> Result<CryptoPayment> {
        self.post("/api/crypto/deposit", request).await
    }
}
