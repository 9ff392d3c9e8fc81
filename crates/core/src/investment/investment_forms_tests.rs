use super::*;
use crate::errors::ValidationError;
use rust_decimal_macros::dec;

const WALLET: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

fn message(err: ValidationError) -> String {
    err.to_string()
}

#[test]
fn deposit_below_minimum_is_rejected() {
    let err = DepositForm::new("9.99", "btc").validate("acc-1").unwrap_err();
    assert_eq!(message(err), "Minimum deposit is $10");
}

#[test]
fn deposit_blank_or_garbage_amount_is_rejected() {
    assert!(DepositForm::new("", "btc").validate("acc-1").is_err());
    assert!(DepositForm::new("ten", "btc").validate("acc-1").is_err());
}

#[test]
fn deposit_builds_crypto_request() {
    let req = DepositForm::new(" 10 ", "ETH").validate("acc-1").unwrap();
    assert_eq!(req.investment_account_id, "acc-1");
    assert_eq!(req.amount, dec!(10));
    assert_eq!(req.currency, "eth");
    assert_eq!(req.payment_method, "crypto");
}

#[test]
fn deposit_rejects_unknown_currency() {
    let err = DepositForm::new("100", "doge").validate("acc-1").unwrap_err();
    assert!(matches!(err, ValidationError::Field { field: "currency", .. }));
}

#[test]
fn payout_rules_apply_in_dialog_order() {
    let balance = dec!(500);

    let err = PayoutForm::new("abc", "BTC", WALLET)
        .validate("acc-1", balance)
        .unwrap_err();
    assert_eq!(message(err), "Please enter a valid amount");

    let err = PayoutForm::new("49.99", "BTC", WALLET)
        .validate("acc-1", balance)
        .unwrap_err();
    assert_eq!(message(err), "Minimum payout amount is $50");

    let err = PayoutForm::new("500.01", "BTC", WALLET)
        .validate("acc-1", balance)
        .unwrap_err();
    assert_eq!(message(err), "Amount exceeds available balance");

    let err = PayoutForm::new("100", "BTC", "   ")
        .validate("acc-1", balance)
        .unwrap_err();
    assert_eq!(message(err), "Please enter a wallet address");

    let err = PayoutForm::new("100", "BTC", "short-address")
        .validate("acc-1", balance)
        .unwrap_err();
    assert_eq!(message(err), "Please enter a valid wallet address");
}

#[test]
fn payout_allows_full_balance_and_trims_destination() {
    let form = PayoutForm::new("500", "usdt", format!("  {}  ", WALLET));
    let req = form.validate("acc-1", dec!(500)).unwrap();
    assert_eq!(req.amount, dec!(500));
    assert_eq!(req.destination, WALLET);
    assert_eq!(req.currency, "USDT");
    assert_eq!(req.payout_method, "crypto");
}

#[test]
fn default_forms_preselect_bitcoin() {
    assert_eq!(DepositForm::default().currency, "btc");
    assert_eq!(PayoutForm::default().currency, "BTC");
}
