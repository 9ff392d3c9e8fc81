//! Property-based tests for the portfolio history builder.
//!
//! Inputs are random permutations of deposits (in every status) and returns,
//! checked against the ordering, accumulation and reconciliation rules.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tunicoin_core::constants::RECONCILIATION_TOLERANCE;
use tunicoin_core::investment::{
    AccountStatus, Deposit, DepositStatus, InvestmentAccount, InvestmentReturn,
};
use tunicoin_core::portfolio::history::build_portfolio_history_at;

// =============================================================================
// Generators
// =============================================================================

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

/// Money in cents, allowing negative returns.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-50_000i64..5_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_time() -> impl Strategy<Value = DateTime<Utc>> {
    // Daily steps over ~3 years, coarse enough to produce timestamp collisions
    (0i64..1_000).prop_map(|step| base_time() + Duration::hours(step * 24))
}

fn arb_status() -> impl Strategy<Value = DepositStatus> {
    prop_oneof![
        3 => Just(DepositStatus::Confirmed),
        1 => Just(DepositStatus::Pending),
        1 => Just(DepositStatus::Confirming),
        1 => Just(DepositStatus::Failed),
        1 => Just(DepositStatus::Cancelled),
    ]
}

fn arb_deposit() -> impl Strategy<Value = Deposit> {
    (
        "[a-z0-9]{8}",
        arb_amount(),
        arb_status(),
        proptest::option::weighted(0.9, arb_time()),
    )
        .prop_map(|(id, amount, status, confirmed_at)| Deposit {
            id,
            investment_account_id: "acc".to_string(),
            user_id: None,
            amount,
            currency: "btc".to_string(),
            status,
            payment_method: None,
            payment_id: None,
            payment_address: None,
            payment_url: None,
            pay_amount: None,
            confirmed_at,
            created_at: None,
            updated_at: None,
        })
}

fn arb_return() -> impl Strategy<Value = InvestmentReturn> {
    ("[a-z0-9]{8}", arb_amount(), arb_time()).prop_map(|(id, amount, created_at)| {
        InvestmentReturn {
            id,
            investment_account_id: "acc".to_string(),
            amount,
            return_rate: Decimal::ONE,
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            created_at,
        }
    })
}

fn account(balance: Decimal) -> InvestmentAccount {
    InvestmentAccount {
        id: "acc".to_string(),
        user_id: None,
        tier_id: None,
        tier_name: None,
        status: AccountStatus::Active,
        balance,
        total_invested: Decimal::ZERO,
        total_returns: Decimal::ZERO,
        created_at: None,
        updated_at: None,
    }
}

fn contributing_deltas(deposits: &[Deposit], returns: &[InvestmentReturn]) -> Vec<Decimal> {
    deposits
        .iter()
        .filter(|d| d.status == DepositStatus::Confirmed && d.confirmed_at.is_some())
        .map(|d| d.amount)
        .chain(returns.iter().map(|r| r.amount))
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Points come out in ascending time order whatever the input order.
    #[test]
    fn prop_points_are_ascending(
        deposits in proptest::collection::vec(arb_deposit(), 0..20),
        returns in proptest::collection::vec(arb_return(), 0..20),
        balance in arb_amount(),
    ) {
        let history = build_portfolio_history_at(&deposits, &returns, &account(balance), now());
        for pair in history.points.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
        }
    }

    /// Only confirmed, timestamped deposits and every return produce points,
    /// and the last event point equals their exact sum.
    #[test]
    fn prop_event_points_match_contributing_events(
        deposits in proptest::collection::vec(arb_deposit(), 1..20),
        returns in proptest::collection::vec(arb_return(), 0..20),
    ) {
        let deltas = contributing_deltas(&deposits, &returns);
        let total: Decimal = deltas.iter().copied().sum();

        // Ledger balance equal to the derived total: no reconciliation expected.
        let history = build_portfolio_history_at(&deposits, &returns, &account(total), now());

        prop_assert_eq!(history.points.len(), deltas.len());
        prop_assert!(history.reconciliation.is_none());
        if let Some(last) = history.points.last() {
            prop_assert_eq!(last.value, total);
        }
    }

    /// Each point differs from its predecessor by exactly one contributing delta.
    #[test]
    fn prop_steps_are_single_event_deltas(
        deposits in proptest::collection::vec(arb_deposit(), 1..15),
        returns in proptest::collection::vec(arb_return(), 0..15),
    ) {
        let mut deltas = contributing_deltas(&deposits, &returns);
        let total: Decimal = deltas.iter().copied().sum();
        let history = build_portfolio_history_at(&deposits, &returns, &account(total), now());

        let mut previous = Decimal::ZERO;
        for point in &history.points {
            let step = point.value - previous;
            let position = deltas.iter().position(|d| *d == step);
            prop_assert!(position.is_some(), "step {} is not an input delta", step);
            if let Some(idx) = position {
                deltas.swap_remove(idx);
            }
            previous = point.value;
        }
        prop_assert!(deltas.is_empty());
    }

    /// A reconciliation point is appended exactly when the drift exceeds the tolerance.
    #[test]
    fn prop_reconciliation_iff_drift_exceeds_tolerance(
        deposits in proptest::collection::vec(arb_deposit(), 1..20),
        returns in proptest::collection::vec(arb_return(), 0..20),
        balance in arb_amount(),
    ) {
        let deltas = contributing_deltas(&deposits, &returns);
        let total: Decimal = deltas.iter().copied().sum();
        let history = build_portfolio_history_at(&deposits, &returns, &account(balance), now());

        let should_reconcile = !deltas.is_empty() && (total - balance).abs() > RECONCILIATION_TOLERANCE;
        if should_reconcile {
            prop_assert_eq!(history.points.len(), deltas.len() + 1);
            let last = history.points.last().unwrap();
            prop_assert_eq!(last.value, balance);
            prop_assert_eq!(last.time, now());
            prop_assert!(history.reconciliation.is_some());
        } else {
            prop_assert_eq!(history.points.len(), deltas.len());
            prop_assert!(history.reconciliation.is_none());
        }
    }

    /// Without deposits nothing is charted.
    #[test]
    fn prop_no_deposits_no_points(
        returns in proptest::collection::vec(arb_return(), 0..20),
        balance in arb_amount(),
    ) {
        let history = build_portfolio_history_at(&[], &returns, &account(balance), now());
        prop_assert!(history.is_empty());
    }
}
