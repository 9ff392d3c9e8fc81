use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn stats_decode_float_amounts() {
    let stats: AdminStats = serde_json::from_value(json!({
        "total_users": 42,
        "active_investments": 7,
        "pending_kyc": 3,
        "total_deposits": 12,
        "total_deposits_amount": 15250.5,
        "total_returns": 30,
        "total_returns_amount": 812.25,
        "pending_payouts": 2,
        "pending_payouts_amount": 300
    }))
    .unwrap();

    assert_eq!(stats.total_users, 42);
    assert_eq!(stats.total_deposits_amount, dec!(15250.5));
    assert_eq!(stats.pending_payouts_amount, dec!(300));
}

#[test]
fn activity_kind_reads_type_field() {
    let feed: Vec<RecentActivity> = serde_json::from_value(json!([
        {"id": "1", "type": "deposit", "description": "Deposit: $100 (btc)",
         "timestamp": "2024-03-01T09:30:00.123456", "status": "confirmed"},
        {"id": "2", "type": "referral", "description": "?",
         "timestamp": "2024-03-01T09:31:00Z"}
    ]))
    .unwrap();

    assert_eq!(feed[0].kind, ActivityKind::Deposit);
    assert_eq!(feed[0].status.as_deref(), Some("confirmed"));
    assert_eq!(feed[1].kind, ActivityKind::Other);
    assert!(feed[1].status.is_none());
}

#[test]
fn list_query_drops_all_filter() {
    assert_eq!(AdminListQuery::with_status(Some("all")).status, None);
    assert_eq!(AdminListQuery::with_status(Some("  ")).status, None);
    assert_eq!(
        AdminListQuery::with_status(Some("Pending")).status.as_deref(),
        Some("pending")
    );

    let query = AdminListQuery::with_status(None).page(3);
    assert_eq!(query.limit, DEFAULT_ADMIN_PAGE_SIZE);
    assert_eq!(query.offset, 60);

    let encoded = serde_json::to_value(&query).unwrap();
    assert!(encoded.get("status").is_none());
}

#[test]
fn rejection_needs_reason() {
    assert!(ReviewDecision::reject("   ").is_err());
    assert_eq!(
        ReviewDecision::reject("Blurry selfie").unwrap().admin_notes,
        "Blurry selfie"
    );
    assert_eq!(ReviewDecision::approve("").admin_notes, "");
    assert_eq!(ReviewAction::Reject.as_str(), "reject");
}

#[test]
fn tier_form_rules() {
    let mut form = TierForm::default();
    assert_eq!(
        form.validate().unwrap_err().to_string(),
        "Tier name is required"
    );

    form.name = "Gold".to_string();
    form.min_deposit = "0".to_string();
    assert_eq!(
        form.validate().unwrap_err().to_string(),
        "Minimum deposit must be greater than 0"
    );

    form.min_deposit = "5000".to_string();
    form.return_rate = "abc".to_string();
    assert_eq!(
        form.validate().unwrap_err().to_string(),
        "Return rate must be greater than 0"
    );

    form.return_rate = "1.5".to_string();
    let payload = form.validate().unwrap();
    assert_eq!(payload.min_deposit, dec!(5000));
    assert_eq!(payload.return_rate, dec!(1.5));
    assert!(payload.is_active);
}

#[test]
fn tier_form_prefills_from_existing_tier() {
    let tier: AdminTier = serde_json::from_value(json!({
        "id": "t1", "name": "Silver", "minimum_deposit": 1000,
        "return_rate": 0.8, "is_active": false
    }))
    .unwrap();

    let form = TierForm::from(&tier);
    assert_eq!(form.name, "Silver");
    assert_eq!(form.description, "");
    assert!(!form.is_active);
    assert_eq!(form.validate().unwrap().min_deposit, dec!(1000));
}

#[test]
fn payout_stats_default_missing_fields() {
    let stats: PayoutStats = serde_json::from_value(json!({"pending_count": 4})).unwrap();
    assert_eq!(stats.pending_count, 4);
    assert_eq!(stats.approved_amount, Decimal::ZERO);
}
