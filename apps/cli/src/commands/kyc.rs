use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use tracing::{info, warn};

use tunicoin_core::kyc::{
    IdType, KycDocument, KycDocumentType, KycField, KycStatus, KycWizard,
};

use super::{or_dash, Ctx};

#[derive(Subcommand)]
pub enum KycCommand {
    /// Show the status of your verification
    Status,
    /// Fill in the verification wizard and upload the documents
    Submit(KycSubmitArgs),
}

#[derive(Args)]
pub struct KycSubmitArgs {
    // Step 1: personal information
    #[arg(long)]
    pub full_name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,
    #[arg(long)]
    pub nationality: Option<String>,
    /// passport, national_id or drivers_license
    #[arg(long, default_value = "passport")]
    pub id_type: IdType,
    #[arg(long)]
    pub phone: String,

    // Step 2: address
    #[arg(long)]
    pub address_line1: String,
    #[arg(long)]
    pub address_line2: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: String,
    /// Two-letter country code
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub accredited_investor: bool,

    // Step 3: documents
    #[arg(long)]
    pub id_front: Option<PathBuf>,
    /// Required for a driver's license
    #[arg(long)]
    pub id_back: Option<PathBuf>,
    #[arg(long)]
    pub selfie: Option<PathBuf>,
    #[arg(long)]
    pub proof_of_address: Option<PathBuf>,
}

pub async fn run(ctx: &Ctx, command: KycCommand) -> anyhow::Result<()> {
    match command {
        KycCommand::Status => status(ctx).await,
        KycCommand::Submit(args) => submit(ctx, args).await,
    }
}

async fn status(ctx: &Ctx) -> anyhow::Result<()> {
    let Some(submission) = ctx.call(ctx.client.kyc_status()).await? else {
        println!("You have not submitted identity verification yet. Run `tunicoin kyc submit`.");
        return Ok(());
    };

    ctx.emit(&submission, |s| {
        println!("Verification {}", s.status);
        println!(
            "  submitted: {}",
            s.submitted_at.format("%Y-%m-%d %H:%M UTC")
        );
        if let Some(reviewed) = s.reviewed_at {
            println!("  reviewed:  {}", reviewed.format("%Y-%m-%d %H:%M UTC"));
        }
        for doc_type in KycDocumentType::ALL {
            let mark = if s.has_document(doc_type) { "x" } else { " " };
            println!("  [{}] {}", mark, doc_type);
        }
        match s.status {
            KycStatus::Rejected => println!(
                "Rejected: {}. You can submit again.",
                or_dash(s.rejection_reason.as_deref())
            ),
            KycStatus::Pending | KycStatus::NeedsReview => {
                println!("Your documents are being reviewed.")
            }
            _ => {}
        }
    })?;
    Ok(())
}

async fn submit(ctx: &Ctx, args: KycSubmitArgs) -> anyhow::Result<()> {
    if let Some(existing) = ctx.call(ctx.client.kyc_status()).await? {
        if !existing.status.can_resubmit() {
            println!("Your identity is already verified.");
            return Ok(());
        }
    }

    let mut wizard = fill_wizard(args, Utc::now().date_naive())?;
    let package = wizard.submit()?;
    let result = ctx
        .call(ctx.client.submit_kyc_application(&package))
        .await?;
    info!(
        "KYC submission {} sent with {} documents",
        result.submission.id,
        result.uploads.len()
    );
    println!("Verification submitted. We'll let you know once it has been reviewed.");
    Ok(())
}

/// Walks the three wizard steps with the command-line values. A step that
/// fails validation stops with its first message.
fn fill_wizard(args: KycSubmitArgs, today: NaiveDate) -> anyhow::Result<KycWizard> {
    let mut wizard = KycWizard::new();

    wizard.set(KycField::FullName, args.full_name);
    wizard.set_date_of_birth(Some(args.date_of_birth));
    wizard.set(KycField::Nationality, args.nationality.unwrap_or_default());
    wizard.set_id_type(Some(args.id_type));
    wizard.set(KycField::Phone, args.phone);
    step(&mut wizard, today)?;

    wizard.set(KycField::AddressLine1, args.address_line1);
    wizard.set(KycField::AddressLine2, args.address_line2.unwrap_or_default());
    wizard.set(KycField::City, args.city);
    wizard.set(KycField::State, args.state.unwrap_or_default());
    wizard.set(KycField::PostalCode, args.postal_code);
    wizard.set(KycField::Country, args.country);
    wizard.set_accredited_investor(args.accredited_investor);
    step(&mut wizard, today)?;

    let files = [
        (KycDocumentType::IdFront, args.id_front),
        (KycDocumentType::IdBack, args.id_back),
        (KycDocumentType::Selfie, args.selfie),
        (KycDocumentType::ProofOfAddress, args.proof_of_address),
    ];
    for (doc_type, path) in files {
        let document = path.as_deref().map(read_document).transpose()?;
        wizard.attach(doc_type, document);
    }
    Ok(wizard)
}

fn step(wizard: &mut KycWizard, today: NaiveDate) -> anyhow::Result<()> {
    let current = wizard.step();
    if wizard.advance(today) {
        return Ok(());
    }
    for (field, message) in wizard.errors() {
        warn!("{}: {}", field, message);
    }
    let first = wizard
        .errors()
        .values()
        .next()
        .cloned()
        .unwrap_or_else(|| "Invalid input".to_string());
    anyhow::bail!("{} ({}): {}", current.title(), current.number(), first)
}

fn read_document(path: &Path) -> anyhow::Result<KycDocument> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(KycDocument::new(file_name, content_type_for(path), data))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
