//! Portfolio history domain models.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::utils::serde_formats::timestamp;

/// A single point of the balance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDataPoint {
    #[serde(with = "timestamp")]
    pub time: DateTime<Utc>,
    pub value: Decimal,
}

/// Describes the synthetic point appended when the event-derived balance
/// disagrees with the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Running total after the last deposit/return event
    pub derived: Decimal,
    /// Balance reported by the account
    pub authoritative: Decimal,
    /// `authoritative - derived`
    pub drift: Decimal,
}

/// Output of the history builder: ascending points plus reconciliation info.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioHistory {
    pub points: Vec<PortfolioDataPoint>,
    pub reconciliation: Option<Reconciliation>,
}

impl PortfolioHistory {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Points visible in the given chart window.
    pub fn in_period(&self, period: TimePeriod, now: DateTime<Utc>) -> Vec<PortfolioDataPoint> {
        match period.start(now) {
            None => self.points.clone(),
            Some(start) => self
                .points
                .iter()
                .filter(|p| p.time >= start)
                .cloned()
                .collect(),
        }
    }

    pub fn summary(&self) -> Option<PortfolioSummary> {
        PortfolioSummary::from_points(&self.points)
    }
}

/// Chart window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "7D")]
    SevenDays,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl TimePeriod {
    pub const ALL_PERIODS: [TimePeriod; 5] = [
        TimePeriod::SevenDays,
        TimePeriod::OneMonth,
        TimePeriod::ThreeMonths,
        TimePeriod::OneYear,
        TimePeriod::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::SevenDays => "7D",
            TimePeriod::OneMonth => "1M",
            TimePeriod::ThreeMonths => "3M",
            TimePeriod::OneYear => "1Y",
            TimePeriod::All => "ALL",
        }
    }

    /// Earliest timestamp inside the window ending at `now`. `None` means unbounded.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimePeriod::SevenDays => Some(now - chrono::Duration::days(7)),
            TimePeriod::OneMonth => now.checked_sub_months(Months::new(1)),
            TimePeriod::ThreeMonths => now.checked_sub_months(Months::new(3)),
            TimePeriod::OneYear => now.checked_sub_months(Months::new(12)),
            TimePeriod::All => None,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        TimePeriod::ALL_PERIODS
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!(
                    "Unknown time period '{}'. Expected one of 7D, 1M, 3M, 1Y, ALL",
                    s
                ))
            })
    }
}

/// Figures shown under the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub starting_balance: Decimal,
    pub current_balance: Decimal,
    /// Percentage change from the first to the last point; zero when the first point is not positive
    /// or the ratio is out of range
    pub growth_pct: Decimal,
}

impl PortfolioSummary {
    pub fn from_points(points: &[PortfolioDataPoint]) -> Option<Self> {
        let first = points.first()?.value;
        let last = points.last()?.value;
        let growth_pct = if first > Decimal::ZERO {
            last.checked_sub(first)
                .and_then(|change| change.checked_div(first))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        Some(Self {
            starting_balance: first,
            current_balance: last,
            growth_pct,
        })
    }

    pub fn is_growing(&self) -> bool {
        self.current_balance >= self.starting_balance
    }
}
