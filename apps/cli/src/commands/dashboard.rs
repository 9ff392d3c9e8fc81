use chrono::Utc;
use clap::Args;
use serde::Serialize;

use tunicoin_client::dashboard::load_dashboard_at;
use tunicoin_core::portfolio::history::{PortfolioDataPoint, PortfolioSummary, TimePeriod};

use super::{money, percent, Ctx};

#[derive(Args)]
pub struct DashboardArgs {
    /// Chart window: 7D, 1M, 3M, 1Y or ALL
    #[arg(long, default_value = "1M")]
    pub period: TimePeriod,
}

#[derive(Serialize)]
struct DashboardView<'a> {
    account_id: &'a str,
    period: TimePeriod,
    needs_kyc: bool,
    summary: Option<PortfolioSummary>,
    points: Vec<PortfolioDataPoint>,
}

pub async fn run(ctx: &Ctx, args: DashboardArgs) -> anyhow::Result<()> {
    let now = Utc::now();
    let Some(dashboard) = ctx.call(load_dashboard_at(&ctx.client, now)).await? else {
        println!("You don't have an investment account yet. Pick a tier with `tunicoin tiers list`.");
        return Ok(());
    };

    let points = dashboard.chart(args.period, now);
    let view = DashboardView {
        account_id: &dashboard.account.id,
        period: args.period,
        needs_kyc: dashboard.needs_kyc(),
        summary: PortfolioSummary::from_points(&points),
        points,
    };

    ctx.emit(&view, |view| {
        if view.needs_kyc {
            println!("Complete identity verification to activate this account: `tunicoin kyc submit`.");
        }
        println!(
            "Account {}  balance {}  invested {}  returns {}",
            dashboard.account.id,
            money(dashboard.account.balance),
            money(dashboard.account.total_invested),
            money(dashboard.account.total_returns)
        );
        if dashboard.account_count > 1 {
            println!("({} accounts, showing the first)", dashboard.account_count);
        }

        match &view.summary {
            Some(summary) => {
                let arrow = if summary.is_growing() { "+" } else { "" };
                println!(
                    "{}: {} -> {} ({}{})",
                    view.period,
                    money(summary.starting_balance),
                    money(summary.current_balance),
                    arrow,
                    percent(summary.growth_pct)
                );
                for point in &view.points {
                    println!(
                        "  {}  {:>14}",
                        point.time.format("%Y-%m-%d %H:%M"),
                        money(point.value)
                    );
                }
            }
            None => println!("{}: no activity in this period", view.period),
        }
        if let Some(rec) = &dashboard.history.reconciliation {
            println!(
                "Balance adjusted by {} to match the account ledger",
                money(rec.drift)
            );
        }
    })?;
    Ok(())
}
