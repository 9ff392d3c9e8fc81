use clap::{Args, Subcommand};
use tracing::info;

use tunicoin_core::admin::{AdminListQuery, TierForm};

use super::{money, or_dash, percent, Ctx};

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Platform counters
    Stats,
    /// Recent platform activity
    Activity,
    /// KYC review queue
    #[command(subcommand)]
    Kyc(AdminKycCommand),
    /// Payout review queue
    #[command(subcommand)]
    Payouts(AdminPayoutCommand),
    /// Investment tier management
    #[command(subcommand)]
    Tiers(AdminTierCommand),
}

#[derive(Args)]
pub struct QueueArgs {
    /// pending, approved, rejected or all
    #[arg(long, default_value = "pending")]
    pub status: String,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

impl QueueArgs {
    fn query(&self) -> AdminListQuery {
        AdminListQuery::with_status(Some(&self.status)).page(self.page.saturating_sub(1))
    }
}

#[derive(Subcommand)]
pub enum AdminKycCommand {
    List(QueueArgs),
    Approve {
        submission_id: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Reject {
        submission_id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum AdminPayoutCommand {
    List(QueueArgs),
    Stats,
    Approve {
        payout_id: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Reject {
        payout_id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Args)]
pub struct TierFormArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub min_deposit: String,
    /// Monthly return rate in percent
    #[arg(long)]
    pub return_rate: String,
    #[arg(long)]
    pub inactive: bool,
}

impl From<TierFormArgs> for TierForm {
    fn from(args: TierFormArgs) -> Self {
        TierForm {
            name: args.name,
            description: args.description,
            min_deposit: args.min_deposit,
            return_rate: args.return_rate,
            is_active: !args.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminTierCommand {
    List,
    Create(TierFormArgs),
    Update {
        tier_id: String,
        #[command(flatten)]
        form: TierFormArgs,
    },
    /// Activate or deactivate a tier
    Toggle { tier_id: String },
}

pub async fn run(ctx: &Ctx, command: AdminCommand) -> anyhow::Result<()> {
    let client = &ctx.client;
    match command {
        AdminCommand::Stats => {
            let stats = ctx.call(client.admin_stats()).await?;
            ctx.emit(&stats, |s| {
                println!("Users:              {}", s.total_users);
                println!("Active investments: {}", s.active_investments);
                println!("Pending KYC:        {}", s.pending_kyc);
                println!(
                    "Deposits:           {} ({})",
                    s.total_deposits,
                    money(s.total_deposits_amount)
                );
                println!(
                    "Returns:            {} ({})",
                    s.total_returns,
                    money(s.total_returns_amount)
                );
                println!(
                    "Pending payouts:    {} ({})",
                    s.pending_payouts,
                    money(s.pending_payouts_amount)
                );
            })?;
        }
        AdminCommand::Activity => {
            let activity = ctx.call(client.admin_activity()).await?;
            ctx.emit(&activity, |rows| {
                for row in rows {
                    println!(
                        "{}  {:<8} {}  {}",
                        row.timestamp.format("%Y-%m-%d %H:%M"),
                        format!("{:?}", row.kind).to_lowercase(),
                        row.description,
                        or_dash(row.status.as_deref())
                    );
                }
            })?;
        }
        AdminCommand::Kyc(AdminKycCommand::List(args)) => {
            let page = ctx.call(client.admin_kyc_submissions(&args.query())).await?;
            ctx.emit(&page, |page| {
                println!("{} submissions", page.total);
                for s in &page.submissions {
                    println!(
                        "{:<38} {:<24} {:<28} {}",
                        s.id,
                        s.full_name,
                        or_dash(s.user_email.as_deref()),
                        s.status
                    );
                }
            })?;
        }
        AdminCommand::Kyc(AdminKycCommand::Approve {
            submission_id,
            notes,
        }) => {
            ctx.call(client.approve_kyc(&submission_id, &notes)).await?;
            info!("Approved KYC submission {}", submission_id);
            println!("KYC approved successfully");
        }
        AdminCommand::Kyc(AdminKycCommand::Reject {
            submission_id,
            reason,
        }) => {
            ctx.call(client.reject_kyc(&submission_id, &reason)).await?;
            info!("Rejected KYC submission {}", submission_id);
            println!("KYC rejected");
        }
        AdminCommand::Payouts(AdminPayoutCommand::List(args)) => {
            let page = ctx.call(client.admin_payouts(&args.query())).await?;
            ctx.emit(&page, |page| {
                println!("{} payouts", page.total);
                for p in &page.payouts {
                    println!(
                        "{:<38} {:<28} {:>12} {:<5} {:?}",
                        p.id,
                        or_dash(p.user_email.as_deref()),
                        money(p.amount),
                        p.currency,
                        p.status
                    );
                }
            })?;
        }
        AdminCommand::Payouts(AdminPayoutCommand::Stats) => {
            let stats = ctx.call(client.admin_payout_stats()).await?;
            ctx.emit(&stats, |s| {
                println!(
                    "Pending:  {} ({})",
                    s.pending_count,
                    money(s.pending_amount)
                );
                println!(
                    "Approved: {} ({})",
                    s.approved_count,
                    money(s.approved_amount)
                );
            })?;
        }
        AdminCommand::Payouts(AdminPayoutCommand::Approve { payout_id, notes }) => {
            ctx.call(client.approve_payout(&payout_id, &notes)).await?;
            info!("Approved payout {}", payout_id);
            println!("Payout approved");
        }
        AdminCommand::Payouts(AdminPayoutCommand::Reject { payout_id, reason }) => {
            ctx.call(client.reject_payout(&payout_id, &reason)).await?;
            info!("Rejected payout {}", payout_id);
            println!("Payout rejected");
        }
        AdminCommand::Tiers(AdminTierCommand::List) => {
            let tiers = ctx.call(client.admin_tiers()).await?;
            ctx.emit(&tiers, |tiers| {
                for t in tiers {
                    println!(
                        "{:<12} {:<20} min {:<12} {:>8} {}",
                        t.id,
                        t.name,
                        money(t.min_deposit),
                        percent(t.return_rate),
                        if t.is_active { "active" } else { "inactive" }
                    );
                }
            })?;
        }
        AdminCommand::Tiers(AdminTierCommand::Create(form)) => {
            let payload = TierForm::from(form).validate()?;
            ctx.call(client.create_tier(&payload)).await?;
            println!("Tier created successfully");
        }
        AdminCommand::Tiers(AdminTierCommand::Update { tier_id, form }) => {
            let payload = TierForm::from(form).validate()?;
            ctx.call(client.update_tier(&tier_id, &payload)).await?;
            println!("Tier updated successfully");
        }
        AdminCommand::Tiers(AdminTierCommand::Toggle { tier_id }) => {
            ctx.call(client.toggle_tier_status(&tier_id)).await?;
            println!("Tier status updated");
        }
    }
    Ok(())
}
