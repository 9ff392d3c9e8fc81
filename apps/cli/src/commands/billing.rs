use clap::Subcommand;
use rust_decimal::Decimal;

use tunicoin_core::billing::{CheckoutRequest, CryptoDepositRequest};

use super::Ctx;

#[derive(Subcommand)]
pub enum BillingCommand {
    /// Open a card checkout for a subscription plan
    Checkout {
        #[arg(long)]
        plan: String,
        /// Web origin the checkout returns to
        #[arg(long, env = "TUNI_WEB_ORIGIN", default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Pay for a subscription plan with crypto
    Crypto {
        #[arg(long)]
        plan: String,
        /// monthly or yearly
        #[arg(long, default_value = "monthly")]
        interval: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "usdt")]
        currency: String,
    },
}

pub async fn run(ctx: &Ctx, command: BillingCommand) -> anyhow::Result<()> {
    match command {
        BillingCommand::Checkout { plan, origin } => {
            let request = CheckoutRequest::for_plan(&plan, &origin);
            let session = ctx.call(ctx.client.create_stripe_checkout(&request)).await?;
            ctx.emit(&session, |s| match &s.url {
                Some(url) => println!("Continue to checkout: {}", url),
                None => println!("Checkout session created"),
            })?;
        }
        BillingCommand::Crypto {
            plan,
            interval,
            amount,
            currency,
        } => {
            let request = CryptoDepositRequest::subscription(&currency, amount, &plan, &interval)?;
            let payment = ctx.call(ctx.client.create_crypto_deposit(&request)).await?;
            ctx.emit(&payment, |p| println!("{}", p.instructions()))?;
        }
    }
    Ok(())
}
