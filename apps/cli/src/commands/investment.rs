use clap::{Args, Subcommand};
use tracing::info;

use tunicoin_client::InvestmentApi;
use tunicoin_core::investment::{DepositForm, PayoutForm};

use super::{money, or_dash, percent, Ctx};

#[derive(Subcommand)]
pub enum TierCommand {
    /// List the investment tiers on offer
    List,
    /// Show one tier with its features
    Show { tier_id: String },
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// List your investment accounts
    List,
    /// Show an account (the primary one by default)
    Show {
        #[arg(long)]
        account: Option<String>,
    },
    /// Open an account in a tier
    Open {
        #[arg(long)]
        tier: String,
    },
}

#[derive(Args)]
pub struct AccountArg {
    /// Account id; defaults to the primary account
    #[arg(long, global = true)]
    pub account: Option<String>,
}

#[derive(Subcommand)]
pub enum DepositCommand {
    /// List deposits into the account
    List,
    /// Start a crypto deposit and print the payment details
    Create {
        #[arg(long)]
        amount: String,
        /// btc, eth, usdt, usdc, ltc, trx or bnb
        #[arg(long, default_value = "usdt")]
        currency: String,
    },
}

#[derive(Subcommand)]
pub enum PayoutCommand {
    /// List payout requests for the account
    List,
    /// Show one payout request
    Show { payout_id: String },
    /// Request a withdrawal to a wallet
    Request {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "USDT")]
        currency: String,
        /// Wallet address to pay out to
        #[arg(long)]
        destination: String,
    },
}

pub async fn run_tiers(ctx: &Ctx, command: TierCommand) -> anyhow::Result<()> {
    match command {
        TierCommand::List => {
            let tiers = ctx.call(ctx.client.list_tiers()).await?;
            ctx.emit(&tiers, |tiers| {
                if tiers.is_empty() {
                    println!("No tiers available");
                }
                for tier in tiers.iter().filter(|t| t.is_active) {
                    let name = tier.display_name.as_deref().unwrap_or(&tier.name);
                    let monthly = match (tier.min_monthly_return_rate, tier.max_monthly_return_rate) {
                        (Some(lo), Some(hi)) => format!("{} - {} monthly", percent(lo), percent(hi)),
                        (Some(lo), None) => format!("{} monthly", percent(lo)),
                        _ => "-".to_string(),
                    };
                    println!(
                        "{:<12} {:<20} min {:<12} {}",
                        tier.id,
                        name,
                        money(tier.minimum_deposit),
                        monthly
                    );
                }
            })?;
        }
        TierCommand::Show { tier_id } => {
            let tier = ctx.call(ctx.client.get_tier(&tier_id)).await?;
            ctx.emit(&tier, |tier| {
                println!("{}", tier.display_name.as_deref().unwrap_or(&tier.name));
                println!("  minimum deposit: {}", money(tier.minimum_deposit));
                if let Some(max) = tier.maximum_deposit {
                    println!("  maximum deposit: {}", money(max));
                }
                if let Some(days) = tier.lock_period_days {
                    println!("  lock period:     {} days", days);
                }
                for feature in tier.feature_list() {
                    println!("  - {}", feature);
                }
            })?;
        }
    }
    Ok(())
}

pub async fn run_accounts(ctx: &Ctx, command: AccountCommand) -> anyhow::Result<()> {
    match command {
        AccountCommand::List => {
            let accounts = ctx.call(ctx.client.list_accounts()).await?;
            ctx.emit(&accounts, |accounts| {
                if accounts.is_empty() {
                    println!("No investment accounts yet");
                }
                for account in accounts {
                    println!(
                        "{:<38} {:<14} {:>14} {:?}",
                        account.id,
                        or_dash(account.tier_name.as_deref()),
                        money(account.balance),
                        account.status
                    );
                }
            })?;
        }
        AccountCommand::Show { account } => {
            let account = ctx.resolve_account(account.as_deref()).await?;
            ctx.emit(&account, |a| {
                println!("Account {}", a.id);
                println!("  tier:           {}", or_dash(a.tier_name.as_deref()));
                println!("  status:         {:?}", a.status);
                println!("  balance:        {}", money(a.balance));
                println!("  total invested: {}", money(a.total_invested));
                println!("  total returns:  {}", money(a.total_returns));
                if a.needs_kyc() {
                    println!("Identity verification is required before investing. Run `tunicoin kyc submit`.");
                }
            })?;
        }
        AccountCommand::Open { tier } => {
            let account = ctx.call(ctx.client.create_account(&tier)).await?;
            info!("Opened investment account {}", account.id);
            ctx.emit(&account, |a| {
                println!("Opened account {} ({:?})", a.id, a.status);
            })?;
        }
    }
    Ok(())
}

pub async fn run_deposits(
    ctx: &Ctx,
    account: AccountArg,
    command: DepositCommand,
) -> anyhow::Result<()> {
    let account = ctx.resolve_account(account.account.as_deref()).await?;
    match command {
        DepositCommand::List => {
            let deposits = ctx.call(ctx.client.list_deposits(&account.id)).await?;
            ctx.emit(&deposits, |deposits| {
                if deposits.is_empty() {
                    println!("No deposits yet");
                }
                for d in deposits {
                    let when = d
                        .confirmed_at
                        .or(d.created_at)
                        .map(|t| t.format("%Y-%m-%d").to_string());
                    println!(
                        "{:<12} {:>12} {:<6} {:?}",
                        or_dash(when.as_deref()),
                        money(d.amount),
                        d.currency.to_uppercase(),
                        d.status
                    );
                }
            })?;
        }
        DepositCommand::Create { amount, currency } => {
            let request = DepositForm::new(amount, currency).validate(&account.id)?;
            let deposit = ctx.call(ctx.client.create_deposit(&request)).await?;
            info!("Created deposit {}", deposit.id);
            ctx.emit(&deposit, |d| {
                if let Some(url) = &d.payment_url {
                    println!("Complete the payment at {}", url);
                } else if let Some(address) = &d.payment_address {
                    let pay_amount = d.pay_amount.unwrap_or(d.amount);
                    println!(
                        "Please send {} {} to: {}",
                        pay_amount,
                        d.currency.to_uppercase(),
                        address
                    );
                } else {
                    println!("Deposit {} created ({:?})", d.id, d.status);
                }
            })?;
        }
    }
    Ok(())
}

pub async fn run_payouts(
    ctx: &Ctx,
    account: AccountArg,
    command: PayoutCommand,
) -> anyhow::Result<()> {
    match command {
        PayoutCommand::List => {
            let account = ctx.resolve_account(account.account.as_deref()).await?;
            let payouts = ctx.call(ctx.client.list_payouts(&account.id)).await?;
            ctx.emit(&payouts, |payouts| {
                if payouts.is_empty() {
                    println!("No payout requests");
                }
                for p in payouts {
                    println!(
                        "{:<38} {:>12} {:<5} {:?}",
                        p.id,
                        money(p.amount),
                        p.currency,
                        p.status
                    );
                }
            })?;
        }
        PayoutCommand::Show { payout_id } => {
            let payout = ctx.call(ctx.client.get_payout(&payout_id)).await?;
            ctx.emit(&payout, |p| {
                println!("Payout {} ({:?})", p.id, p.status);
                println!("  amount:      {} {}", money(p.amount), p.currency);
                println!("  destination: {}", p.destination);
                if let Some(reason) = &p.rejection_reason {
                    println!("  rejected:    {}", reason);
                }
            })?;
        }
        PayoutCommand::Request {
            amount,
            currency,
            destination,
        } => {
            let account = ctx.resolve_account(account.account.as_deref()).await?;
            let request =
                PayoutForm::new(amount, currency, destination).validate(&account.id, account.balance)?;
            let payout = ctx.call(ctx.client.request_payout(&request)).await?;
            info!("Requested payout {}", payout.id);
            ctx.emit(&payout, |p| {
                println!(
                    "Payout of {} {} requested. It will be reviewed before processing.",
                    money(p.amount),
                    p.currency
                );
            })?;
        }
    }
    Ok(())
}

pub async fn run_returns(ctx: &Ctx, account: AccountArg) -> anyhow::Result<()> {
    let account = ctx.resolve_account(account.account.as_deref()).await?;
    let returns = ctx.call(ctx.client.list_returns(&account.id)).await?;
    ctx.emit(&returns, |returns| {
        if returns.is_empty() {
            println!("No returns credited yet");
        }
        for r in returns {
            println!(
                "{} .. {} {:>12} {:>8}",
                r.period_start,
                r.period_end,
                money(r.amount),
                percent(r.return_rate)
            );
        }
    })?;
    Ok(())
}
