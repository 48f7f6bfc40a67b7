//! Price History Storage
//!
//! File-backed storage for the rolling snapshot history. The history is a
//! single shared mutable resource: every mutation happens under one lock, and
//! reads observe a consistent document through the same lock.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use coconut_core::{CoconutError, CoconutResult, PriceHistory, PriceSnapshot};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::persistence;

/// Durable store for the aggregated price history
pub struct PriceStorage {
    path: PathBuf,
    history: Mutex<PriceHistory>,
}

impl PriceStorage {
    /// Open the store at `path`, bootstrapping an empty history if the file
    /// does not exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> CoconutResult<Self> {
        let path = path.as_ref().to_path_buf();
        persistence::ensure_parent_dir(&path)?;

        let history: PriceHistory = persistence::load_or_bootstrap(&path)?;
        debug!(
            "Loaded price history from {} ({} snapshots)",
            path.display(),
            history.len()
        );

        Ok(Self {
            path,
            history: Mutex::new(history),
        })
    }

    /// Append a freshly aggregated snapshot.
    ///
    /// Applies the 30-day retention trim, renumbers ids densely from 1,
    /// updates `last_updated` and persists atomically. On a persistence
    /// failure the in-memory and on-disk history both keep their prior state.
    /// Returns the stored snapshot (with its post-trim id).
    pub fn append_snapshot(&self, snapshot: PriceSnapshot) -> CoconutResult<PriceSnapshot> {
        let mut history = self.history.lock();
        let now = Utc::now();

        let mut updated = history.clone();
        updated.prices.push(snapshot);
        updated.trim(now);
        updated.last_updated = Some(now);

        persistence::save_atomic(&self.path, &updated)?;

        *history = updated;
        let stored = history
            .latest()
            .cloned()
            .ok_or_else(|| CoconutError::storage("History empty after append"))?;

        info!(
            "Recorded snapshot #{} (avg ₹{}, {} retained)",
            stored.id,
            stored.average_price,
            history.len()
        );
        Ok(stored)
    }

    /// The most recent snapshot
    pub fn latest(&self) -> CoconutResult<PriceSnapshot> {
        self.history
            .lock()
            .latest()
            .cloned()
            .ok_or_else(|| CoconutError::not_found("No price data available"))
    }

    /// The last `min(n, len)` snapshots in chronological order; `n = 0`
    /// returns an empty list.
    pub fn window_of_days(&self, days: usize) -> Vec<PriceSnapshot> {
        self.history.lock().window(days).to_vec()
    }

    /// A consistent copy of the whole history
    pub fn history(&self) -> PriceHistory {
        self.history.lock().clone()
    }

    /// Number of snapshots currently retained
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }

    /// When the history was last mutated
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.history.lock().last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coconut_core::Quote;
    use rust_decimal_macros::dec;

    fn snapshot(avg: rust_decimal::Decimal) -> PriceSnapshot {
        PriceSnapshot {
            id: 0,
            average_price: avg,
            min_price: avg - dec!(1),
            max_price: avg + dec!(1),
            source_count: 2,
            sources: vec![Quote::new("a", avg - dec!(1)), Quote::new("b", avg + dec!(1))],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_assigns_dense_ids_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");

        let storage = PriceStorage::new(&path).unwrap();
        let first = storage.append_snapshot(snapshot(dec!(27))).unwrap();
        let second = storage.append_snapshot(snapshot(dec!(28))).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(storage.last_updated().is_some());

        // state survives a reload from disk
        drop(storage);
        let reloaded = PriceStorage::new(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.latest().unwrap().average_price, dec!(28));
        let ids: Vec<u64> = reloaded.history().prices.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_append_trims_expired_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PriceStorage::new(dir.path().join("prices.json")).unwrap();

        let mut stale = snapshot(dec!(26));
        stale.timestamp = Utc::now() - chrono::Duration::days(31);
        storage.append_snapshot(stale).unwrap();
        let mut recent = snapshot(dec!(27));
        recent.timestamp = Utc::now() - chrono::Duration::days(29);
        storage.append_snapshot(recent).unwrap();

        // the 31-day-old entry was evicted, the 29-day-old one retained,
        // and ids were re-derived densely from 1
        let history = storage.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.prices[0].id, 1);
        assert_eq!(history.prices[0].average_price, dec!(27));
    }

    #[test]
    fn test_latest_on_empty_store_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PriceStorage::new(dir.path().join("prices.json")).unwrap();

        assert!(matches!(
            storage.latest(),
            Err(CoconutError::NotFound(_))
        ));
        assert!(storage.window_of_days(7).is_empty());
    }

    #[test]
    fn test_window_of_days_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PriceStorage::new(dir.path().join("prices.json")).unwrap();

        for i in 0..3 {
            storage.append_snapshot(snapshot(dec!(25) + rust_decimal::Decimal::from(i))).unwrap();
        }

        assert!(storage.window_of_days(0).is_empty());
        assert_eq!(storage.window_of_days(2).len(), 2);
        assert_eq!(storage.window_of_days(10).len(), 3);
        // chronological order preserved
        let window = storage.window_of_days(3);
        assert!(window.windows(2).all(|w| w[0].id < w[1].id));
    }
}
