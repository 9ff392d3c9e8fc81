//! Terminal client for Tunicoin.
//!
//! ```bash
//! tunicoin auth login --email you@example.com
//! tunicoin dashboard --period 3M
//! tunicoin deposit create --amount 250 --currency usdt
//! tunicoin kyc submit --full-name "Ada Lovelace" --date-of-birth 1990-05-17 ...
//! ```

mod commands;
mod config;
mod main_lib;
mod secrets;

use clap::{Parser, Subcommand};

use commands::{
    admin::AdminCommand,
    auth::AuthCommand,
    billing::BillingCommand,
    dashboard::DashboardArgs,
    investment::{AccountArg, AccountCommand, DepositCommand, PayoutCommand, TierCommand},
    kyc::KycCommand,
    practice::PracticeCommand,
    Ctx,
};
use config::Config;
use main_lib::{build_client, describe_error, init_tracing};

#[derive(Parser)]
#[command(name = "tunicoin")]
#[command(about = "Tunicoin investment and practice trading from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign-up, login, password reset and two-factor authentication
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Balance history and summary of your investment account
    Dashboard(DashboardArgs),
    /// Investment tiers
    #[command(subcommand)]
    Tiers(TierCommand),
    /// Investment accounts
    #[command(subcommand)]
    Account(AccountCommand),
    /// Crypto deposits
    Deposit {
        #[command(flatten)]
        account: AccountArg,
        #[command(subcommand)]
        command: DepositCommand,
    },
    /// Withdrawal requests
    Payout {
        #[command(flatten)]
        account: AccountArg,
        #[command(subcommand)]
        command: PayoutCommand,
    },
    /// Returns credited to your account
    Returns {
        #[command(flatten)]
        account: AccountArg,
    },
    /// Identity verification
    #[command(subcommand)]
    Kyc(KycCommand),
    /// Subscription payments
    #[command(subcommand)]
    Billing(BillingCommand),
    /// CFD practice accounts
    #[command(subcommand)]
    Practice(PracticeCommand),
    /// Back office (admins only)
    #[command(subcommand)]
    Admin(AdminCommand),
}

async fn dispatch(ctx: &Ctx, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Auth(cmd) => commands::auth::run(ctx, cmd).await,
        Commands::Dashboard(args) => commands::dashboard::run(ctx, args).await,
        Commands::Tiers(cmd) => commands::investment::run_tiers(ctx, cmd).await,
        Commands::Account(cmd) => commands::investment::run_accounts(ctx, cmd).await,
        Commands::Deposit { account, command } => {
            commands::investment::run_deposits(ctx, account, command).await
        }
        Commands::Payout { account, command } => {
            commands::investment::run_payouts(ctx, account, command).await
        }
        Commands::Returns { account } => commands::investment::run_returns(ctx, account).await,
        Commands::Kyc(cmd) => commands::kyc::run(ctx, cmd).await,
        Commands::Billing(cmd) => commands::billing::run(ctx, cmd).await,
        Commands::Practice(cmd) => commands::practice::run(ctx, cmd).await,
        Commands::Admin(cmd) => commands::admin::run(ctx, cmd).await,
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let cli = Cli::parse();
    init_tracing();

    let outcome = run(cli, &config).await;
    if let Err(err) = outcome {
        tracing::debug!("Command failed: {:?}", err);
        eprintln!("Error: {}", describe_error(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let ctx = Ctx::new(client, cli.json);

    tokio::select! {
        outcome = dispatch(&ctx, cli.command) => outcome,
        _ = tokio::signal::ctrl_c() => {
            ctx.scope.cancel();
            anyhow::bail!("Interrupted")
        }
    }
}
