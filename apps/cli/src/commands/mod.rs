//! Subcommand handlers, one module per page of the web app.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod investment;
pub mod kyc;
pub mod practice;

use std::future::Future;

use rust_decimal::Decimal;
use serde::Serialize;

use tunicoin_client::{ApiClient, InvestmentApi, ViewScope};
use tunicoin_core::constants::DISPLAY_DECIMAL_PRECISION;
use tunicoin_core::investment::InvestmentAccount;

/// What every handler gets: the client, the scope its requests run under,
/// and the output mode.
pub struct Ctx {
    pub client: ApiClient,
    pub scope: ViewScope,
    pub json: bool,
}

impl Ctx {
    pub fn new(client: ApiClient, json: bool) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            json,
        }
    }

    /// Runs an API call under the command's scope.
    pub async fn call<F, T>(&self, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = tunicoin_client::Result<T>>,
    {
        Ok(self.scope.run(fut).await?)
    }

    /// `--json` prints the value; otherwise `human` renders it.
    pub fn emit<T, H>(&self, value: &T, human: H) -> anyhow::Result<()>
    where
        T: Serialize,
        H: FnOnce(&T),
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    /// The account named on the command line, or the user's primary account.
    pub async fn resolve_account(&self, account_id: Option<&str>) -> anyhow::Result<InvestmentAccount> {
        if let Some(id) = account_id {
            return self.call(self.client.get_account(id)).await;
        }
        let accounts = self.call(self.client.list_accounts()).await?;
        accounts.into_iter().next().ok_or_else(|| {
            anyhow::anyhow!("No investment account yet. Open one with `tunicoin account open --tier <id>`.")
        })
    }
}

pub fn money(value: Decimal) -> String {
    format!("${:.*}", DISPLAY_DECIMAL_PRECISION as usize, value)
}

pub fn percent(value: Decimal) -> String {
    format!("{:.*}%", DISPLAY_DECIMAL_PRECISION as usize, value)
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
