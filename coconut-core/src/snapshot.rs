//! Aggregated price snapshots and the rolling price history

use crate::quote::Quote;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One aggregated price observation derived from a batch of source quotes.
///
/// Snapshots are immutable once appended to the history, except for `id`
/// renumbering when the retention trim evicts older entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Sequential 1-based position in the history, dense after every trim
    pub id: u64,

    /// Mean of the valid source prices, rounded to 2 decimals
    pub average_price: Decimal,

    /// Lowest valid source price
    pub min_price: Decimal,

    /// Highest valid source price
    pub max_price: Decimal,

    /// Number of quotes that passed validation
    pub source_count: usize,

    /// Every quote seen during the refresh, valid or not, for audit
    pub sources: Vec<Quote>,

    /// When the snapshot was created
    pub timestamp: DateTime<Utc>,
}

/// Ordered price history, insertion order == chronological order.
///
/// Owned exclusively by the history store; bounded by a 30-day retention
/// window measured from each snapshot's timestamp at save time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Snapshots, oldest first
    pub prices: Vec<PriceSnapshot>,

    /// When the history was last mutated
    pub last_updated: Option<DateTime<Utc>>,
}

/// Days a snapshot is retained before the trim evicts it
pub const RETENTION_DAYS: i64 = 30;

impl PriceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots currently retained
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The most recent snapshot, if any
    pub fn latest(&self) -> Option<&PriceSnapshot> {
        self.prices.last()
    }

    /// The last `min(n, len)` snapshots in chronological order.
    ///
    /// `n = 0` is a valid boundary and yields an empty slice.
    pub fn window(&self, n: usize) -> &[PriceSnapshot] {
        let start = self.prices.len().saturating_sub(n);
        &self.prices[start..]
    }

    /// Drop snapshots older than the retention window relative to `now`,
    /// then renumber the survivors densely from 1.
    pub fn trim(&mut self, now: DateTime<Utc>) {
        let cutoff = now - chrono::Duration::days(RETENTION_DAYS);
        self.prices.retain(|p| p.timestamp > cutoff);
        self.renumber();
    }

    /// Re-derive sequential ids 1..N with no gaps
    fn renumber(&mut self) {
        for (i, price) in self.prices.iter_mut().enumerate() {
            price.id = (i + 1) as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn snapshot_at(id: u64, timestamp: DateTime<Utc>) -> PriceSnapshot {
        PriceSnapshot {
            id,
            average_price: dec!(27.00),
            min_price: dec!(25),
            max_price: dec!(29),
            source_count: 3,
            sources: Vec::new(),
            timestamp,
        }
    }

    #[test]
    fn test_window_bounds() {
        let now = Utc::now();
        let history = PriceHistory {
            prices: (1..=3).map(|i| snapshot_at(i, now)).collect(),
            last_updated: Some(now),
        };

        assert!(history.window(0).is_empty());
        assert_eq!(history.window(2).len(), 2);
        assert_eq!(history.window(2)[0].id, 2);
        // n larger than the history returns everything, in insertion order
        let all = history.window(10);
        assert_eq!(all.len(), 3);
        assert_eq!(all.first().unwrap().id, 1);
        assert_eq!(all.last().unwrap().id, 3);
    }

    #[test]
    fn test_trim_drops_expired_and_renumbers() {
        let now = Utc::now();
        let mut history = PriceHistory {
            prices: vec![
                snapshot_at(1, now - Duration::days(31)),
                snapshot_at(2, now - Duration::days(29)),
                snapshot_at(3, now),
            ],
            last_updated: Some(now),
        };

        history.trim(now);

        assert_eq!(history.len(), 2);
        let ids: Vec<u64> = history.prices.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        // the 29-day-old snapshot survives as the new head
        assert_eq!(history.prices[0].timestamp, now - Duration::days(29));
    }

    #[test]
    fn test_trim_on_empty_history_is_a_noop() {
        let mut history = PriceHistory::new();
        history.trim(Utc::now());
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
