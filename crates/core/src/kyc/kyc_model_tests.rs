use super::*;
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn application_serializes_wire_names() {
    let app = KycApplication {
        full_name: "John Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        nationality: None,
        id_type: IdType::DriversLicense,
        address_line1: "123 Main St".to_string(),
        address_line2: None,
        city: "Paris".to_string(),
        state: None,
        postal_code: "75001".to_string(),
        country: "FR".to_string(),
        phone: "+33123456789".to_string(),
        is_accredited_investor: false,
    };

    let value = serde_json::to_value(&app).unwrap();
    assert_eq!(value["date_of_birth"], "1990-01-01");
    assert_eq!(value["id_type"], "drivers_license");
    assert!(value.get("nationality").is_none());
    assert!(value.get("address_line2").is_none());
    assert_eq!(value["is_accredited_investor"], false);
}

#[test]
fn submission_decodes_status_and_documents() {
    let raw = json!({
        "id": "kyc-1",
        "user_id": "user-1",
        "status": "needs_review",
        "full_name": "John Doe",
        "date_of_birth": "1990-01-01",
        "id_type": "passport",
        "address_line1": "123 Main St",
        "city": "Paris",
        "postal_code": "75001",
        "country": "FR",
        "phone": "+33123456789",
        "documents": {"id_front": {"filename": "front.png"}},
        "submitted_at": "2024-02-01T10:00:00"
    });

    let submission: KycSubmission = serde_json::from_value(raw).unwrap();
    assert_eq!(submission.status, KycStatus::NeedsReview);
    assert!(submission.has_document(KycDocumentType::IdFront));
    assert!(!submission.has_document(KycDocumentType::Selfie));
    assert!(submission.reviewed_at.is_none());
    assert!(submission.status.can_resubmit());
}

#[test]
fn unknown_kyc_status_does_not_fail() {
    let status: KycStatus = serde_json::from_value(json!("escalated")).unwrap();
    assert_eq!(status, KycStatus::Unknown);
    assert!(!KycStatus::Approved.can_resubmit());
}

#[test]
fn document_type_parses_path_segment() {
    assert_eq!(
        "proof_of_address".parse::<KycDocumentType>().unwrap(),
        KycDocumentType::ProofOfAddress
    );
    assert!("passport_scan".parse::<KycDocumentType>().is_err());
    assert_eq!(KycDocumentType::IdBack.to_string(), "id_back");
}

#[test]
fn id_type_parses_and_flags_back_side() {
    let id: IdType = "Drivers_License".parse().unwrap();
    assert!(id.requires_back_side());
    assert!(!IdType::Passport.requires_back_side());
    assert!("library_card".parse::<IdType>().is_err());
}

#[test]
fn document_debug_hides_contents() {
    let doc = KycDocument::new("selfie.jpg", "image/jpeg", vec![0xFF; 2048]);
    let rendered = format!("{:?}", doc);
    assert!(rendered.contains("selfie.jpg"));
    assert!(rendered.contains("2048"));
    assert!(!rendered.contains("255"));
}
