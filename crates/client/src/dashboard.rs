//! Loads everything the investment dashboard shows for the primary account.

use chrono::{DateTime, Utc};
use log::debug;

use tunicoin_core::investment::{Deposit, InvestmentAccount, InvestmentReturn};
use tunicoin_core::portfolio::history::{
    build_portfolio_history_at, PortfolioDataPoint, PortfolioHistory, PortfolioSummary, TimePeriod,
};

use crate::errors::Result;
use crate::investment::InvestmentApi;

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// The first account returned by the API.
    pub account: InvestmentAccount,
    pub deposits: Vec<Deposit>,
    pub returns: Vec<InvestmentReturn>,
    pub history: PortfolioHistory,
    pub account_count: usize,
}

impl Dashboard {
    /// The account is waiting for identity verification.
    pub fn needs_kyc(&self) -> bool {
        self.account.needs_kyc()
    }

    pub fn summary(&self) -> Option<PortfolioSummary> {
        self.history.summary()
    }

    pub fn chart(&self, period: TimePeriod, now: DateTime<Utc>) -> Vec<PortfolioDataPoint> {
        self.history.in_period(period, now)
    }
}

/// `Ok(None)` when the user has no investment account yet.
pub async fn load_dashboard<A>(api: &A) -> Result<Option<Dashboard>>
where
    A: InvestmentApi + ?Sized,
{
    load_dashboard_at(api, Utc::now()).await
}

/// Same as [`load_dashboard`] with an explicit clock for the history builder.
pub async fn load_dashboard_at<A>(api: &A, now: DateTime<Utc>) -> Result<Option<Dashboard>>
where
    A: InvestmentApi + ?Sized,
{
    let mut accounts = api.list_accounts().await?;
    if accounts.is_empty() {
        debug!("[Dashboard] No investment account");
        return Ok(None);
    }
    let account_count = accounts.len();
    let account = accounts.swap_remove(0);

    let (deposits, returns) = futures::try_join!(
        api.list_deposits(&account.id),
        api.list_returns(&account.id)
    )?;
    debug!(
        "[Dashboard] Account {}: {} deposits, {} returns",
        account.id,
        deposits.len(),
        returns.len()
    );

    let history = build_portfolio_history_at(&deposits, &returns, &account, now);

    Ok(Some(Dashboard {
        account,
        deposits,
        returns,
        history,
        account_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::Mutex;
    use tunicoin_core::investment::{
        InvestmentTier, NewDeposit, Payout, PayoutRequest,
    };

    #[derive(Default)]
    struct StubApi {
        accounts: Vec<InvestmentAccount>,
        deposits: Vec<Deposit>,
        returns: Vec<InvestmentReturn>,
        fail_returns: bool,
        calls: Mutex<Vec<String>>,
    }

    fn not_stubbed<T>() -> Result<T> {
        Err(ClientError::Api {
            status: 501,
            message: "not stubbed".to_string(),
        })
    }

    #[async_trait]
    impl InvestmentApi for StubApi {
        async fn list_tiers(&self) -> Result<Vec<InvestmentTier>> {
            not_stubbed()
        }
        async fn get_tier(&self, _tier_id: &str) -> Result<InvestmentTier> {
            not_stubbed()
        }
        async fn list_accounts(&self) -> Result<Vec<InvestmentAccount>> {
            self.calls.lock().unwrap().push("accounts".to_string());
            Ok(self.accounts.clone())
        }
        async fn get_account(&self, _account_id: &str) -> Result<InvestmentAccount> {
            not_stubbed()
        }
        async fn create_account(&self, _tier_id: &str) -> Result<InvestmentAccount> {
            not_stubbed()
        }
        async fn list_deposits(&self, account_id: &str) -> Result<Vec<Deposit>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("deposits:{}", account_id));
            Ok(self.deposits.clone())
        }
        async fn create_deposit(&self, _deposit: &NewDeposit) -> Result<Deposit> {
            not_stubbed()
        }
        async fn list_returns(&self, account_id: &str) -> Result<Vec<InvestmentReturn>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("returns:{}", account_id));
            if self.fail_returns {
                return Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self.returns.clone())
        }
        async fn list_payouts(&self, _account_id: &str) -> Result<Vec<Payout>> {
            not_stubbed()
        }
        async fn get_payout(&self, _payout_id: &str) -> Result<Payout> {
            not_stubbed()
        }
        async fn request_payout(&self, _payout: &PayoutRequest) -> Result<Payout> {
            not_stubbed()
        }
    }

    fn account(id: &str, status: &str, balance: f64) -> InvestmentAccount {
        serde_json::from_value(json!({
            "id": id,
            "status": status,
            "balance": balance,
            "total_invested": 1000,
            "total_returns": 50
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn no_account_means_no_dashboard() {
        let api = StubApi::default();
        assert!(load_dashboard_at(&api, now()).await.unwrap().is_none());
        assert_eq!(*api.calls.lock().unwrap(), vec!["accounts".to_string()]);
    }

    #[tokio::test]
    async fn first_account_is_primary() {
        let api = StubApi {
            accounts: vec![account("a1", "active", 1050.0), account("a2", "active", 0.0)],
            deposits: vec![serde_json::from_value(json!({
                "id": "d1", "investment_account_id": "a1", "amount": 1000,
                "currency": "usdt", "status": "confirmed",
                "confirmed_at": "2024-01-01T00:00:00Z"
            }))
            .unwrap()],
            returns: vec![serde_json::from_value(json!({
                "id": "r1", "investment_account_id": "a1", "amount": 50,
                "return_rate": 5, "period_start": "2024-01-01",
                "period_end": "2024-01-31", "created_at": "2024-02-01T00:00:00Z"
            }))
            .unwrap()],
            ..StubApi::default()
        };

        let dashboard = load_dashboard_at(&api, now()).await.unwrap().unwrap();
        assert_eq!(dashboard.account.id, "a1");
        assert_eq!(dashboard.account_count, 2);
        assert!(!dashboard.needs_kyc());
        assert_eq!(dashboard.history.len(), 2);
        assert!(dashboard.history.reconciliation.is_none());

        let summary = dashboard.summary().unwrap();
        assert_eq!(summary.starting_balance, dec!(1000));
        assert_eq!(summary.current_balance, dec!(1050));

        let calls = api.calls.lock().unwrap();
        assert!(calls.contains(&"deposits:a1".to_string()));
        assert!(calls.contains(&"returns:a1".to_string()));
    }

    #[tokio::test]
    async fn pending_kyc_is_flagged() {
        let api = StubApi {
            accounts: vec![account("a1", "pending_kyc", 0.0)],
            ..StubApi::default()
        };
        let dashboard = load_dashboard_at(&api, now()).await.unwrap().unwrap();
        assert!(dashboard.needs_kyc());
        assert!(dashboard.history.is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_fails_the_load() {
        let api = StubApi {
            accounts: vec![account("a1", "active", 0.0)],
            fail_returns: true,
            ..StubApi::default()
        };
        let err = load_dashboard_at(&api, now()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
