use super::*;
use chrono::NaiveDate;
use crate::errors::ValidationError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn doc(name: &str) -> KycDocument {
    KycDocument::new(name, "image/png", vec![1, 2, 3])
}

fn fill_personal(wizard: &mut KycWizard) {
    wizard.set(KycField::FullName, "John Doe");
    wizard.set_date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1));
    wizard.set(KycField::Phone, "+33123456789");
}

fn fill_address(wizard: &mut KycWizard) {
    wizard.set(KycField::AddressLine1, "123 Main St");
    wizard.set(KycField::City, "Paris");
    wizard.set(KycField::PostalCode, "75001");
    wizard.set(KycField::Country, "fr");
}

fn at_documents_step() -> KycWizard {
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    assert!(wizard.advance(today()));
    fill_address(&mut wizard);
    assert!(wizard.advance(today()));
    assert_eq!(wizard.step(), KycStep::Documents);
    wizard
}

#[test]
fn starts_on_personal_step_with_passport() {
    let wizard = KycWizard::new();
    assert_eq!(wizard.step(), KycStep::Personal);
    assert_eq!(wizard.draft().id_type, Some(IdType::Passport));
    assert!(wizard.errors().is_empty());
}

#[test]
fn empty_personal_step_reports_every_field() {
    let mut wizard = KycWizard::new();
    wizard.set_id_type(None);

    assert!(!wizard.advance(today()));
    assert_eq!(wizard.step(), KycStep::Personal);
    assert_eq!(
        wizard.error("full_name"),
        Some("Full name must be at least 3 characters")
    );
    assert_eq!(wizard.error("date_of_birth"), Some("Date of birth is required"));
    assert_eq!(wizard.error("phone"), Some("Valid phone number is required"));
    assert_eq!(wizard.error("id_type"), Some("ID type is required"));
}

#[test]
fn underage_applicant_is_blocked() {
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    wizard.set_date_of_birth(NaiveDate::from_ymd_opt(2010, 1, 1));

    assert!(!wizard.advance(today()));
    assert_eq!(
        wizard.error("date_of_birth"),
        Some("You must be at least 18 years old")
    );
}

#[test]
fn age_uses_calendar_year_difference() {
    // Born late in 2006: not yet 18 on 2024-06-15, but the year difference is.
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    wizard.set_date_of_birth(NaiveDate::from_ymd_opt(2006, 12, 31));

    assert!(wizard.advance(today()));
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut wizard = KycWizard::new();
    assert!(!wizard.advance(today()));
    assert!(wizard.error("full_name").is_some());
    assert!(wizard.error("phone").is_some());

    wizard.set(KycField::FullName, "Jo");
    assert!(wizard.error("full_name").is_none());
    assert!(wizard.error("phone").is_some());
}

#[test]
fn address_rules() {
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    assert!(wizard.advance(today()));

    wizard.set(KycField::AddressLine1, "1 St");
    wizard.set(KycField::Country, "FRA");
    assert!(!wizard.advance(today()));
    assert_eq!(wizard.step(), KycStep::Address);
    assert_eq!(wizard.error("address_line1"), Some("Valid address is required"));
    assert_eq!(wizard.error("city"), Some("City is required"));
    assert_eq!(wizard.error("postal_code"), Some("Postal code is required"));
    assert_eq!(
        wizard.error("country"),
        Some("Valid 2-letter country code is required (e.g., FR, US)")
    );

    fill_address(&mut wizard);
    assert!(wizard.advance(today()));
    assert_eq!(wizard.step(), KycStep::Documents);
}

#[test]
fn back_is_always_allowed_and_stops_at_first_step() {
    let mut wizard = at_documents_step();
    wizard.set(KycField::City, "");

    assert!(wizard.back());
    assert_eq!(wizard.step(), KycStep::Address);
    assert!(wizard.back());
    assert_eq!(wizard.step(), KycStep::Personal);
    assert!(!wizard.back());
    assert_eq!(wizard.draft().full_name, "John Doe");
}

#[test]
fn advance_on_last_step_does_nothing() {
    let mut wizard = at_documents_step();
    assert!(!wizard.advance(today()));
    assert_eq!(wizard.step(), KycStep::Documents);
}

#[test]
fn submit_is_rejected_before_last_step() {
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    assert!(matches!(
        wizard.submit(),
        Err(ValidationError::InvalidInput(_))
    ));
}

#[test]
fn submit_requires_documents() {
    let mut wizard = at_documents_step();
    wizard.attach(KycDocumentType::IdFront, Some(doc("front.png")));

    let err = wizard.submit().unwrap_err();
    assert!(matches!(err, ValidationError::Field { .. }));
    assert_eq!(wizard.error("selfie"), Some("Selfie with ID is required"));
    assert_eq!(
        wizard.error("proof_of_address"),
        Some("Proof of address is required")
    );
    assert!(wizard.error("id_front").is_none());
    assert!(wizard.error("id_back").is_none());
}

#[test]
fn drivers_license_needs_back_side() {
    let mut wizard = KycWizard::new();
    fill_personal(&mut wizard);
    wizard.set_id_type(Some(IdType::DriversLicense));
    assert!(wizard.advance(today()));
    fill_address(&mut wizard);
    assert!(wizard.advance(today()));

    wizard.attach(KycDocumentType::IdFront, Some(doc("front.png")));
    wizard.attach(KycDocumentType::Selfie, Some(doc("selfie.png")));
    wizard.attach(KycDocumentType::ProofOfAddress, Some(doc("bill.pdf")));
    assert!(wizard.submit().is_err());
    assert_eq!(
        wizard.error("id_back"),
        Some("ID back image is required for driver's license")
    );

    wizard.attach(KycDocumentType::IdBack, Some(doc("back.png")));
    assert!(wizard.error("id_back").is_none());
    let package = wizard.submit().unwrap();
    assert_eq!(package.documents.len(), 4);
}

#[test]
fn submit_builds_trimmed_application() {
    let mut wizard = at_documents_step();
    wizard.set(KycField::State, "   ");
    wizard.set(KycField::Nationality, " French ");
    wizard.attach(KycDocumentType::IdFront, Some(doc("front.png")));
    wizard.attach(KycDocumentType::Selfie, Some(doc("selfie.png")));
    wizard.attach(KycDocumentType::ProofOfAddress, Some(doc("bill.pdf")));

    let package = wizard.submit().unwrap();
    let app = package.application;
    assert_eq!(app.country, "FR");
    assert_eq!(app.state, None);
    assert_eq!(app.nationality.as_deref(), Some("French"));
    assert_eq!(app.id_type, IdType::Passport);
    assert_eq!(
        package
            .documents
            .iter()
            .map(|(t, _)| *t)
            .collect::<Vec<_>>(),
        vec![
            KycDocumentType::IdFront,
            KycDocumentType::Selfie,
            KycDocumentType::ProofOfAddress
        ]
    );
}

#[test]
fn detaching_a_document_removes_it() {
    let mut wizard = at_documents_step();
    wizard.attach(KycDocumentType::Selfie, Some(doc("selfie.png")));
    assert!(wizard.document(KycDocumentType::Selfie).is_some());
    wizard.attach(KycDocumentType::Selfie, None);
    assert!(wizard.document(KycDocumentType::Selfie).is_none());
}
