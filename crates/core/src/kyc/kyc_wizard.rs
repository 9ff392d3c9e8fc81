//! Three-step KYC wizard: personal details, address, documents.
//!
//! The wizard only moves forward once the current step validates; going back
//! is always allowed and submitting is only possible from the last step.
//! Rule failures are kept per field and cleared as soon as that field is
//! edited again.

use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

use super::kyc_model::{IdType, KycApplication, KycDocument, KycDocumentType};
use crate::constants::KYC_MIN_AGE_YEARS;
use crate::errors::ValidationError;

const MIN_FULL_NAME_LEN: usize = 3;
const MIN_PHONE_LEN: usize = 10;
const MIN_ADDRESS_LEN: usize = 5;
const COUNTRY_CODE_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KycStep {
    Personal = 1,
    Address = 2,
    Documents = 3,
}

impl KycStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            KycStep::Personal => "Personal Information",
            KycStep::Address => "Address Information",
            KycStep::Documents => "Document Upload",
        }
    }

    fn next(self) -> Option<KycStep> {
        match self {
            KycStep::Personal => Some(KycStep::Address),
            KycStep::Address => Some(KycStep::Documents),
            KycStep::Documents => None,
        }
    }

    fn previous(self) -> Option<KycStep> {
        match self {
            KycStep::Personal => None,
            KycStep::Address => Some(KycStep::Personal),
            KycStep::Documents => Some(KycStep::Address),
        }
    }
}

/// Free-text inputs of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KycField {
    FullName,
    Nationality,
    Phone,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
}

impl KycField {
    pub fn name(&self) -> &'static str {
        match self {
            KycField::FullName => "full_name",
            KycField::Nationality => "nationality",
            KycField::Phone => "phone",
            KycField::AddressLine1 => "address_line1",
            KycField::AddressLine2 => "address_line2",
            KycField::City => "city",
            KycField::State => "state",
            KycField::PostalCode => "postal_code",
            KycField::Country => "country",
        }
    }
}

/// Everything the wizard has collected so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KycDraft {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
    pub id_type: Option<IdType>,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_accredited_investor: bool,
}

impl KycDraft {
    fn text_mut(&mut self, field: KycField) -> &mut String {
        match field {
            KycField::FullName => &mut self.full_name,
            KycField::Nationality => &mut self.nationality,
            KycField::Phone => &mut self.phone,
            KycField::AddressLine1 => &mut self.address_line1,
            KycField::AddressLine2 => &mut self.address_line2,
            KycField::City => &mut self.city,
            KycField::State => &mut self.state,
            KycField::PostalCode => &mut self.postal_code,
            KycField::Country => &mut self.country,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A validated application plus the documents to upload after it.
#[derive(Debug, Clone)]
pub struct KycPackage {
    pub application: KycApplication,
    pub documents: Vec<(KycDocumentType, KycDocument)>,
}

#[derive(Debug, Clone)]
pub struct KycWizard {
    step: KycStep,
    draft: KycDraft,
    documents: BTreeMap<KycDocumentType, KycDocument>,
    errors: BTreeMap<&'static str, String>,
}

impl Default for KycWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl KycWizard {
    /// Starts on step 1 with a passport preselected.
    pub fn new() -> Self {
        Self {
            step: KycStep::Personal,
            draft: KycDraft {
                id_type: Some(IdType::Passport),
                ..KycDraft::default()
            },
            documents: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn step(&self) -> KycStep {
        self.step
    }

    pub fn draft(&self) -> &KycDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn document(&self, doc_type: KycDocumentType) -> Option<&KycDocument> {
        self.documents.get(&doc_type)
    }

    pub fn set(&mut self, field: KycField, value: impl Into<String>) {
        *self.draft.text_mut(field) = value.into();
        self.errors.remove(field.name());
    }

    pub fn set_date_of_birth(&mut self, date: Option<NaiveDate>) {
        self.draft.date_of_birth = date;
        self.errors.remove("date_of_birth");
    }

    pub fn set_id_type(&mut self, id_type: Option<IdType>) {
        self.draft.id_type = id_type;
        self.errors.remove("id_type");
    }

    pub fn set_accredited_investor(&mut self, accredited: bool) {
        self.draft.is_accredited_investor = accredited;
    }

    /// Picks (or with `None`, removes) the file for a document slot.
    pub fn attach(&mut self, doc_type: KycDocumentType, document: Option<KycDocument>) {
        match document {
            Some(doc) => {
                self.documents.insert(doc_type, doc);
            }
            None => {
                self.documents.remove(&doc_type);
            }
        }
        self.errors.remove(doc_type.as_str());
    }

    /// Validates the current step and moves forward when it passes.
    /// `today` anchors the age check. Returns whether the step changed.
    pub fn advance(&mut self, today: NaiveDate) -> bool {
        let errors = match self.step {
            KycStep::Personal => self.personal_errors(today),
            KycStep::Address => self.address_errors(),
            KycStep::Documents => return false,
        };
        let passed = errors.is_empty();
        self.errors = errors;

        if passed {
            if let Some(next) = self.step.next() {
                debug!("[KycWizard] step {} -> {}", self.step.number(), next.number());
                self.step = next;
            }
        }
        passed
    }

    /// Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Validates the documents step and assembles what to send.
    ///
    /// On failure the per-field errors are recorded and the first one is
    /// returned.
    pub fn submit(&mut self) -> Result<KycPackage, ValidationError> {
        if self.step != KycStep::Documents {
            return Err(ValidationError::InvalidInput(
                "Complete the previous steps before submitting".to_string(),
            ));
        }

        self.errors = self.document_errors();
        if let Some((field, message)) = self.errors.iter().next() {
            return Err(ValidationError::field(*field, message.clone()));
        }

        let draft = &self.draft;
        let (Some(date_of_birth), Some(id_type)) = (draft.date_of_birth, draft.id_type) else {
            return Err(ValidationError::InvalidInput(
                "Personal information is incomplete".to_string(),
            ));
        };

        let application = KycApplication {
            full_name: draft.full_name.trim().to_string(),
            date_of_birth,
            nationality: non_blank(&draft.nationality),
            id_type,
            address_line1: draft.address_line1.trim().to_string(),
            address_line2: non_blank(&draft.address_line2),
            city: draft.city.trim().to_string(),
            state: non_blank(&draft.state),
            postal_code: draft.postal_code.trim().to_string(),
            country: draft.country.trim().to_uppercase(),
            phone: draft.phone.trim().to_string(),
            is_accredited_investor: draft.is_accredited_investor,
        };

        let documents = self
            .documents
            .iter()
            .map(|(doc_type, doc)| (*doc_type, doc.clone()))
            .collect();

        Ok(KycPackage {
            application,
            documents,
        })
    }

    fn personal_errors(&self, today: NaiveDate) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();
        let draft = &self.draft;

        if draft.full_name.trim().chars().count() < MIN_FULL_NAME_LEN {
            errors.insert(
                "full_name",
                "Full name must be at least 3 characters".to_string(),
            );
        }
        match draft.date_of_birth {
            None => {
                errors.insert("date_of_birth", "Date of birth is required".to_string());
            }
            // Calendar-year difference, not exact age.
            Some(dob) if today.year() - dob.year() < KYC_MIN_AGE_YEARS => {
                errors.insert(
                    "date_of_birth",
                    "You must be at least 18 years old".to_string(),
                );
            }
            Some(_) => {}
        }
        if draft.phone.trim().chars().count() < MIN_PHONE_LEN {
            errors.insert("phone", "Valid phone number is required".to_string());
        }
        if draft.id_type.is_none() {
            errors.insert("id_type", "ID type is required".to_string());
        }
        errors
    }

    fn address_errors(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();
        let draft = &self.draft;

        if draft.address_line1.trim().chars().count() < MIN_ADDRESS_LEN {
            errors.insert("address_line1", "Valid address is required".to_string());
        }
        if draft.city.trim().is_empty() {
            errors.insert("city", "City is required".to_string());
        }
        if draft.postal_code.trim().is_empty() {
            errors.insert("postal_code", "Postal code is required".to_string());
        }
        let country = draft.country.trim();
        if country.chars().count() != COUNTRY_CODE_LEN
            || !country.chars().all(|c| c.is_ascii_alphabetic())
        {
            errors.insert(
                "country",
                "Valid 2-letter country code is required (e.g., FR, US)".to_string(),
            );
        }
        errors
    }

    fn document_errors(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();
        let has = |t: KycDocumentType| self.documents.contains_key(&t);

        if !has(KycDocumentType::IdFront) {
            errors.insert("id_front", "ID front image is required".to_string());
        }
        let needs_back = self
            .draft
            .id_type
            .map(|t| t.requires_back_side())
            .unwrap_or(false);
        if needs_back && !has(KycDocumentType::IdBack) {
            errors.insert(
                "id_back",
                "ID back image is required for driver's license".to_string(),
            );
        }
        if !has(KycDocumentType::Selfie) {
            errors.insert("selfie", "Selfie with ID is required".to_string());
        }
        if !has(KycDocumentType::ProofOfAddress) {
            errors.insert(
                "proof_of_address",
                "Proof of address is required".to_string(),
            );
        }
        errors
    }
}
