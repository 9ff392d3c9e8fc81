//! Cumulative balance reconstruction.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use super::history_model::{PortfolioDataPoint, PortfolioHistory, Reconciliation};
use crate::constants::RECONCILIATION_TOLERANCE;
use crate::investment::{Deposit, InvestmentAccount, InvestmentReturn};

/// Ordering rank at equal timestamps: deposits land before returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Deposit,
    Return,
}

#[derive(Debug, Clone)]
struct BalanceEvent<'a> {
    at: DateTime<Utc>,
    kind: EventKind,
    id: &'a str,
    delta: Decimal,
}

/// Builds the balance history using the current time for any reconciliation point.
///
/// See [`build_portfolio_history_at`].
pub fn build_portfolio_history(
    deposits: &[Deposit],
    returns: &[InvestmentReturn],
    account: &InvestmentAccount,
) -> PortfolioHistory {
    build_portfolio_history_at(deposits, returns, account, Utc::now())
}

/// Builds an ascending cumulative balance series from deposits and returns.
///
/// Only confirmed deposits with a confirmation timestamp count; every return
/// counts at its creation time. Events are ordered by time, then deposits
/// before returns, then by id. Each event emits one point holding the running
/// total after it.
///
/// When the final running total is more than `RECONCILIATION_TOLERANCE` away
/// from `account.balance`, one extra point carries the ledger balance and the
/// result records the drift. That point sits at `now`, or at the last event
/// when events are dated after `now`.
///
/// No deposits at all means no history, whatever the returns say.
pub fn build_portfolio_history_at(
    deposits: &[Deposit],
    returns: &[InvestmentReturn],
    account: &InvestmentAccount,
    now: DateTime<Utc>,
) -> PortfolioHistory {
    if deposits.is_empty() {
        return PortfolioHistory::default();
    }

    let mut events: Vec<BalanceEvent<'_>> = deposits
        .iter()
        .filter_map(|d| {
            d.confirmed_on().map(|at| BalanceEvent {
                at,
                kind: EventKind::Deposit,
                id: d.id.as_str(),
                delta: d.amount,
            })
        })
        .chain(returns.iter().map(|r| BalanceEvent {
            at: r.created_at,
            kind: EventKind::Return,
            id: r.id.as_str(),
            delta: r.amount,
        }))
        .collect();

    events.sort_by(|a, b| (a.at, a.kind, a.id).cmp(&(b.at, b.kind, b.id)));

    let mut balance = Decimal::ZERO;
    let mut points: Vec<PortfolioDataPoint> = events
        .iter()
        .map(|event| {
            balance = balance.checked_add(event.delta).unwrap_or_else(|| {
                warn!(
                    "[PortfolioHistory] Balance overflow applying {} to {}; clamping",
                    event.id, balance
                );
                balance.saturating_add(event.delta)
            });
            PortfolioDataPoint {
                time: event.at,
                value: balance,
            }
        })
        .collect();

    let reconciliation = match points.last() {
        Some(last) if exceeds_tolerance(last.value, account.balance) => {
            let reconciliation = Reconciliation {
                derived: last.value,
                authoritative: account.balance,
                drift: account.balance.saturating_sub(last.value),
            };
            // Future-dated events must not push the ledger point back in time.
            let stamped = now.max(last.time);
            warn!(
                "[PortfolioHistory] Account {} ledger balance {} differs from event total {} (drift {}); appending reconciliation point",
                account.id, account.balance, last.value, reconciliation.drift
            );
            points.push(PortfolioDataPoint {
                time: stamped,
                value: account.balance,
            });
            Some(reconciliation)
        }
        _ => None,
    };

    debug!(
        "[PortfolioHistory] Built {} points for account {} from {} events",
        points.len(),
        account.id,
        events.len()
    );

    PortfolioHistory {
        points,
        reconciliation,
    }
}

fn exceeds_tolerance(derived: Decimal, authoritative: Decimal) -> bool {
    match derived.checked_sub(authoritative) {
        Some(gap) => gap.abs() > RECONCILIATION_TOLERANCE,
        None => true,
    }
}
