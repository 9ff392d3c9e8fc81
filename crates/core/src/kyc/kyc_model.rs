//! KYC wire shapes for `/api/kyc/*`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::utils::serde_formats::{optional_timestamp, timestamp};

/// Identity document presented by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    #[default]
    Passport,
    NationalId,
    DriversLicense,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Passport => "passport",
            IdType::NationalId => "national_id",
            IdType::DriversLicense => "drivers_license",
        }
    }

    /// Driver's licenses need both sides uploaded.
    pub fn requires_back_side(&self) -> bool {
        matches!(self, IdType::DriversLicense)
    }
}

impl FromStr for IdType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passport" => Ok(IdType::Passport),
            "national_id" => Ok(IdType::NationalId),
            "drivers_license" => Ok(IdType::DriversLicense),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown ID type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot a document is uploaded into: `/api/kyc/upload-document/{type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycDocumentType {
    IdFront,
    IdBack,
    Selfie,
    ProofOfAddress,
}

impl KycDocumentType {
    pub const ALL: [KycDocumentType; 4] = [
        KycDocumentType::IdFront,
        KycDocumentType::IdBack,
        KycDocumentType::Selfie,
        KycDocumentType::ProofOfAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KycDocumentType::IdFront => "id_front",
            KycDocumentType::IdBack => "id_back",
            KycDocumentType::Selfie => "selfie",
            KycDocumentType::ProofOfAddress => "proof_of_address",
        }
    }
}

impl FromStr for KycDocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KycDocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unknown document type '{}'", s)))
    }
}

impl fmt::Display for KycDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked for upload. Contents are held in memory until sent.
#[derive(Clone, PartialEq, Eq)]
pub struct KycDocument {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl KycDocument {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

// Skip the payload so logging a document doesn't dump an image.
impl fmt::Debug for KycDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KycDocument")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Body of `POST /api/kyc/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycApplication {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    pub id_type: IdType,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub is_accredited_investor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
    NeedsReview,
    #[serde(other)]
    Unknown,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
            KycStatus::NeedsReview => "needs_review",
            KycStatus::Unknown => "unknown",
        }
    }

    /// Whether the applicant may send a new application.
    pub fn can_resubmit(&self) -> bool {
        !matches!(self, KycStatus::Approved)
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored submission as returned by `/api/kyc/status` and the admin queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycSubmission {
    pub id: String,
    pub user_id: String,
    pub status: KycStatus,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub nationality: Option<String>,
    pub id_type: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub is_accredited_investor: bool,
    /// Uploaded documents keyed by document type.
    #[serde(default)]
    pub documents: serde_json::Value,
    #[serde(with = "timestamp")]
    pub submitted_at: DateTime<Utc>,
    #[serde(default, with = "optional_timestamp")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl KycSubmission {
    pub fn has_document(&self, doc_type: KycDocumentType) -> bool {
        self.documents
            .get(doc_type.as_str())
            .map(|v| !v.is_null())
            .unwrap_or(false)
    }
}

/// Response of a document upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycUploadReceipt {
    pub message: String,
    pub document_type: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
