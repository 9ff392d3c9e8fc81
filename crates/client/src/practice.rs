//! `/api/accounts` bindings for simulated trading accounts.

use tunicoin_core::practice::{NewPracticeAccount, PracticeAccount, PracticeAccountSummary};

use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    pub async fn list_practice_accounts(&self) -> Result<Vec<PracticeAccountSummary>> {
        self.get("/api/accounts").await
    }

    pub async fn get_practice_account(&self, account_id: &str) -> Result<PracticeAccount> {
        self.get(&format!("/api/accounts/{}", account_id)).await
    }

    pub async fn create_practice_account(&self, account: &NewPracticeAccount) -> Result<PracticeAccount> {
        account.validate()?;
        self.post("/api/accounts", account).await
    }

    pub async fn delete_practice_account(&self, account_id: &str) -> Result<()> {
        self.request::<(), ()>(reqwest::Method::DELETE, &format!("/api/accounts/{}", account_id), None)
            .await
    }
}
