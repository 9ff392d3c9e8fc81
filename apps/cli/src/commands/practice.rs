use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use tunicoin_core::practice::{
    NewPracticeAccount, DEFAULT_BASE_CURRENCY, DEFAULT_MAX_LEVERAGE, DEFAULT_PRACTICE_BALANCE,
};

use super::{money, Ctx};

#[derive(Subcommand)]
pub enum PracticeCommand {
    /// List your practice accounts
    List,
    /// Show one practice account
    Show { account_id: String },
    /// Create a demo account with virtual funds
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = DEFAULT_BASE_CURRENCY)]
        base_currency: String,
        #[arg(long, default_value_t = DEFAULT_PRACTICE_BALANCE)]
        initial_balance: Decimal,
        #[arg(long, default_value_t = DEFAULT_MAX_LEVERAGE)]
        max_leverage: u32,
    },
    /// Delete a practice account
    Delete { account_id: String },
}

pub async fn run(ctx: &Ctx, command: PracticeCommand) -> anyhow::Result<()> {
    let client = &ctx.client;
    match command {
        PracticeCommand::List => {
            let accounts = ctx.call(client.list_practice_accounts()).await?;
            ctx.emit(&accounts, |accounts| {
                if accounts.is_empty() {
                    println!("No practice accounts yet");
                }
                for a in accounts {
                    println!(
                        "{:<38} {:<24} balance {:>12} equity {:>12}{}",
                        a.id,
                        a.name,
                        money(a.balance),
                        money(a.equity),
                        if a.is_demo { "  [demo]" } else { "" }
                    );
                }
            })?;
        }
        PracticeCommand::Show { account_id } => {
            let account = ctx.call(client.get_practice_account(&account_id)).await?;
            ctx.emit(&account, |a| {
                println!("{} ({})", a.name, a.base_currency);
                println!("  balance:          {}", money(a.balance));
                println!("  equity:           {}", money(a.equity));
                println!("  unrealized P&L:   {}", money(a.unrealized_pnl()));
                println!("  margin used:      {}", money(a.margin_used));
                println!("  margin available: {}", money(a.margin_available));
                println!("  max leverage:     {}x", a.max_leverage);
            })?;
        }
        PracticeCommand::Create {
            name,
            base_currency,
            initial_balance,
            max_leverage,
        } => {
            let request = NewPracticeAccount {
                base_currency,
                initial_balance,
                max_leverage,
                ..NewPracticeAccount::new(name)
            };
            let account = ctx.call(client.create_practice_account(&request)).await?;
            info!("Created practice account {}", account.id);
            ctx.emit(&account, |a| {
                println!("Created {} with {}", a.name, money(a.balance));
            })?;
        }
        PracticeCommand::Delete { account_id } => {
            ctx.call(client.delete_practice_account(&account_id)).await?;
            println!("Practice account deleted");
        }
    }
    Ok(())
}
