//! `/api/investment/*` bindings.

use async_trait::async_trait;
use log::debug;

use tunicoin_core::investment::{
    Deposit, InvestmentAccount, InvestmentReturn, InvestmentTier, NewDeposit,
    NewInvestmentAccount, Payout, PayoutRequest,
};

use crate::client::ApiClient;
use crate::errors::Result;

/// Investment endpoints. A trait so the dashboard loader can run against a
/// stub in tests.
#[async_trait]
pub trait InvestmentApi: Send + Sync {
    async fn list_tiers(&self) -> Result<Vec<InvestmentTier>>;

    async fn get_tier(&self, tier_id: &str) -> Result<InvestmentTier>;

    /// Accounts of the signed-in user.
    async fn list_accounts(&self) -> Result<Vec<InvestmentAccount>>;

    async fn get_account(&self, account_id: &str) -> Result<InvestmentAccount>;

    async fn create_account(&self, tier_id: &str) -> Result<InvestmentAccount>;

    async fn list_deposits(&self, account_id: &str) -> Result<Vec<Deposit>>;

    async fn create_deposit(&self, deposit: &NewDeposit) -> Result<Deposit>;

    async fn list_returns(&self, account_id: &str) -> Result<Vec<InvestmentReturn>>;

    async fn list_payouts(&self, account_id: &str) -> Result<Vec<Payout>>;

    async fn get_payout(&self, payout_id: &str) -> Result<Payout>;

    async fn request_payout(&self, payout: &PayoutRequest) -> Result<Payout>;
}

#[async_trait]
impl InvestmentApi for ApiClient {
    async fn list_tiers(&self) -> Result<Vec<InvestmentTier>> {
        self.get("/api/investment/tiers").await
    }

    async fn get_tier(&self, tier_id: &str) -> Result<InvestmentTier> {
        self.get(&format!("/api/investment/tiers/{}", tier_id)).await
    }

    async fn list_accounts(&self) -> Result<Vec<InvestmentAccount>> {
        self.get("/api/investment/accounts").await
    }

    async fn get_account(&self, account_id: &str) -> Result<InvestmentAccount> {
        self.get(&format!("/api/investment/accounts/{}", account_id))
            .await
    }

    async fn create_account(&self, tier_id: &str) -> Result<InvestmentAccount> {
        debug!("[ApiClient] Opening investment account on tier {}", tier_id);
        self.post(
            "/api/investment/accounts",
            &NewInvestmentAccount {
                tier_id: tier_id.to_string(),
            },
        )
        .await
    }

    async fn list_deposits(&self, account_id: &str) -> Result<Vec<Deposit>> {
        self.get_with_query("/api/investment/deposits", &[("account_id", account_id)])
            .await
    }

    async fn create_deposit(&self, deposit: &NewDeposit) -> Result<Deposit> {
        self.post("/api/investment/deposits", deposit).await
    }

    async fn list_returns(&self, account_id: &str) -> Result<Vec<InvestmentReturn>> {
        self.get(&format!("/api/investment/accounts/{}/returns", account_id))
            .await
    }

    async fn list_payouts(&self, account_id: &str) -> Result<Vec<Payout>> {
        self.get_with_query("/api/investment/payouts", &[("account_id", account_id)])
            .await
    }

    async fn get_payout(&self, payout_id: &str) -> Result<Payout> {
        self.get(&format!("/api/investment/payouts/{}", payout_id))
            .await
    }

    async fn request_payout(&self, payout: &PayoutRequest) -> Result<Payout> {
        self.post("/api/investment/payouts", payout).await
    }
}
