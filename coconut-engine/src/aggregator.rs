//! Price Aggregation Engine
//!
//! Pulls a round of quotes from the configured provider, validates them,
//! folds the valid ones into a snapshot and hands it to the history store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use coconut_core::{CoconutError, CoconutResult, PriceSnapshot, Quote};
use coconut_sources::QuoteProvider;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::price_storage::PriceStorage;

/// Aggregates source quotes into the durable price history
pub struct PriceAggregator {
    provider: Arc<dyn QuoteProvider>,
    storage: Arc<PriceStorage>,
}

impl PriceAggregator {
    /// Create a new aggregator over an injected provider and store
    pub fn new(provider: Arc<dyn QuoteProvider>, storage: Arc<PriceStorage>) -> Self {
        Self { provider, storage }
    }

    /// Run one refresh round.
    ///
    /// Fails with [`CoconutError::NoValidData`] when no quote passes
    /// validation, in which case nothing is appended and the history is left
    /// untouched. Returns the stored snapshot otherwise.
    pub async fn refresh(&self) -> CoconutResult<PriceSnapshot> {
        let quotes = self.provider.fetch_quotes().await?;
        info!("Fetched {} quotes from sources", quotes.len());

        let snapshot = build_snapshot(quotes, Utc::now())?;
        let stored = self.storage.append_snapshot(snapshot)?;

        info!(
            "Price refreshed: ₹{} (min ₹{}, max ₹{}, {} sources)",
            stored.average_price, stored.min_price, stored.max_price, stored.source_count
        );
        Ok(stored)
    }
}

/// Fold a round of quotes into a snapshot.
///
/// Out-of-range quotes are excluded from the statistics but kept in the
/// snapshot's `sources` list for audit. The id is a placeholder; the history
/// store derives the real one on append.
fn build_snapshot(quotes: Vec<Quote>, now: DateTime<Utc>) -> CoconutResult<PriceSnapshot> {
    let valid: Vec<Decimal> = quotes
        .iter()
        .filter(|q| q.is_valid())
        .map(|q| q.price)
        .collect();

    if valid.len() < quotes.len() {
        warn!(
            "Discarded {} out-of-range quote(s) from statistics",
            quotes.len() - valid.len()
        );
    }

    let Some(&first) = valid.first() else {
        return Err(CoconutError::NoValidData);
    };

    let (min, max) = valid
        .iter()
        .skip(1)
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    let sum: Decimal = valid.iter().copied().sum();
    let average = (sum / Decimal::from(valid.len())).round_dp(2);

    Ok(PriceSnapshot {
        id: 0,
        average_price: average,
        min_price: min.round_dp(2),
        max_price: max.round_dp(2),
        source_count: valid.len(),
        sources: quotes,
        timestamp: now,
    })
}
