//! Statistics Service
//!
//! Derived figures over the current history: rolling averages, refresh-over-
//! refresh change, and the aggregate stats document. Pure given the snapshot
//! sequence; nothing here mutates either store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use coconut_core::{CoconutError, CoconutResult, PriceSnapshot};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::price_storage::PriceStorage;
use crate::submission_storage::{SubmissionCounts, SubmissionStorage};

/// Snapshots folded into the rolling average
const ROLLING_WINDOW: usize = 7;

/// Aggregate statistics document
#[derive(Debug, Clone, Serialize)]
pub struct SystemStats {
    pub current_price: Decimal,
    pub min_today: Decimal,
    pub max_today: Decimal,
    pub source_count: usize,
    pub seven_day_average: Decimal,
    /// Change between the two most recent refreshes, in percent
    pub weekly_change: Decimal,
    pub total_submissions: usize,
    pub pending_submissions: usize,
    pub data_points: usize,
    pub last_updated: DateTime<Utc>,
}

/// Service computing statistics over the stores
pub struct StatsService {
    prices: Arc<PriceStorage>,
    submissions: Arc<SubmissionStorage>,
}

impl StatsService {
    pub fn new(prices: Arc<PriceStorage>, submissions: Arc<SubmissionStorage>) -> Self {
        Self { prices, submissions }
    }

    /// Mean of `average_price` over the last `min(7, N)` snapshots, rounded
    /// to 2 decimals. Fails [`CoconutError::NoData`] on an empty history.
    pub fn seven_day_average(&self) -> CoconutResult<Decimal> {
        let history = self.prices.history();
        rolling_average(history.window(ROLLING_WINDOW))
    }

    /// Percent change between the two most recent snapshots, rounded to one
    /// decimal. Zero when fewer than two snapshots exist.
    ///
    /// The name is a holdover: this compares consecutive refreshes, not
    /// snapshots seven days apart. Kept deliberately.
    pub fn weekly_change(&self) -> Decimal {
        let history = self.prices.history();
        refresh_over_refresh_change(&history.prices)
    }

    /// The aggregate stats document. Fails [`CoconutError::NotFound`] when no
    /// snapshot has been recorded yet.
    pub fn stats(&self) -> CoconutResult<SystemStats> {
        let history = self.prices.history();
        let latest = history
            .latest()
            .ok_or_else(|| CoconutError::not_found("No price data available"))?;

        let seven_day_average = rolling_average(history.window(ROLLING_WINDOW))?;
        let weekly_change = refresh_over_refresh_change(&history.prices);
        let SubmissionCounts { total, pending } = self.submissions.counts();

        Ok(SystemStats {
            current_price: latest.average_price,
            min_today: latest.min_price,
            max_today: latest.max_price,
            source_count: latest.source_count,
            seven_day_average,
            weekly_change,
            total_submissions: total,
            pending_submissions: pending,
            data_points: history.len(),
            last_updated: latest.timestamp,
        })
    }
}

fn rolling_average(window: &[PriceSnapshot]) -> CoconutResult<Decimal> {
    if window.is_empty() {
        return Err(CoconutError::no_data("No snapshots recorded"));
    }
    let sum: Decimal = window.iter().map(|p| p.average_price).sum();
    Ok((sum / Decimal::from(window.len())).round_dp(2))
}

fn refresh_over_refresh_change(prices: &[PriceSnapshot]) -> Decimal {
    match prices {
        [.., previous, latest] if !previous.average_price.is_zero() => {
            ((latest.average_price - previous.average_price) / previous.average_price
                * Decimal::ONE_HUNDRED)
                .round_dp(1)
        }
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coconut_core::PriceHistory;
    use rust_decimal_macros::dec;

    fn snapshots(averages: &[Decimal]) -> Vec<PriceSnapshot> {
        averages
            .iter()
            .enumerate()
            .map(|(i, &avg)| PriceSnapshot {
                id: (i + 1) as u64,
                average_price: avg,
                min_price: avg,
                max_price: avg,
                source_count: 1,
                sources: Vec::new(),
                timestamp: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_rolling_average_uses_at_most_seven_snapshots() {
        let prices = snapshots(&[
            dec!(10), dec!(10), dec!(10), // outside the window
            dec!(27), dec!(28), dec!(29), dec!(27), dec!(28), dec!(29), dec!(27),
        ]);
        let history = PriceHistory { prices, last_updated: Some(Utc::now()) };

        let avg = rolling_average(history.window(ROLLING_WINDOW)).unwrap();
        assert_eq!(avg, dec!(27.86)); // 195 / 7, half-even rounded
    }

    #[test]
    fn test_rolling_average_with_short_history() {
        let prices = snapshots(&[dec!(26), dec!(29)]);
        assert_eq!(rolling_average(&prices).unwrap(), dec!(27.50));
    }

    #[test]
    fn test_rolling_average_fails_on_empty_history() {
        assert!(matches!(
            rolling_average(&[]),
            Err(CoconutError::NoData(_))
        ));
    }

    #[test]
    fn test_change_compares_two_most_recent_refreshes() {
        // only the last two matter, regardless of anything earlier
        let prices = snapshots(&[dec!(99), dec!(25), dec!(27)]);
        assert_eq!(refresh_over_refresh_change(&prices), dec!(8.0));

        let falling = snapshots(&[dec!(30), dec!(27)]);
        assert_eq!(refresh_over_refresh_change(&falling), dec!(-10.0));
    }

    #[test]
    fn test_change_is_zero_with_fewer_than_two_snapshots() {
        assert_eq!(refresh_over_refresh_change(&[]), Decimal::ZERO);
        assert_eq!(
            refresh_over_refresh_change(&snapshots(&[dec!(27)])),
            Decimal::ZERO
        );
    }
}
