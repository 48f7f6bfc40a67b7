//! End-to-end engine tests: refresh -> history -> stats -> verification

use std::sync::Arc;

use coconut_core::{CoconutError, Quote};
use coconut_engine::{
    PriceAggregator, PriceStorage, StatsService, SubmissionService, SubmissionStorage,
    VerifyOutcome, VerifyPriceRequest,
};
use coconut_sources::StaticQuoteProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Harness {
    _dir: tempfile::TempDir,
    prices: Arc<PriceStorage>,
    submissions: Arc<SubmissionStorage>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let prices = Arc::new(PriceStorage::new(dir.path().join("prices.json")).unwrap());
        let submissions =
            Arc::new(SubmissionStorage::new(dir.path().join("submissions.json")).unwrap());
        Self { _dir: dir, prices, submissions }
    }

    fn aggregator(&self, prices: &[Decimal]) -> PriceAggregator {
        let quotes: Vec<Quote> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Quote::new(format!("source{}", i), p))
            .collect();
        PriceAggregator::new(
            Arc::new(StaticQuoteProvider::new(quotes)),
            self.prices.clone(),
        )
    }
}

#[tokio::test]
async fn refresh_then_confirm_round_trip() {
    let harness = Harness::new();
    let aggregator = harness.aggregator(&[dec!(26), dec!(27), dec!(25), dec!(28), dec!(29)]);

    let snapshot = aggregator.refresh().await.unwrap();
    assert_eq!(snapshot.id, 1);
    assert_eq!(snapshot.average_price, dec!(27.00));
    assert_eq!(snapshot.min_price, dec!(25));
    assert_eq!(snapshot.max_price, dec!(29));
    assert_eq!(snapshot.source_count, 5);

    // a follow-up confirmation references the freshly published average
    let service = SubmissionService::new(harness.prices.clone(), harness.submissions.clone());
    let outcome = service
        .verify(VerifyPriceRequest {
            is_correct: true,
            price: None,
            district: Some("Chennai".to_string()),
            market: None,
        })
        .unwrap();

    match outcome {
        VerifyOutcome::Confirmed { confirmed_price, .. } => {
            assert_eq!(confirmed_price, dec!(27.00));
        }
        other => panic!("Expected confirmation, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_refresh_leaves_history_unchanged() {
    let harness = Harness::new();

    harness
        .aggregator(&[dec!(27), dec!(28)])
        .refresh()
        .await
        .unwrap();
    assert_eq!(harness.prices.len(), 1);

    // every quote out of range: the round fails and nothing is appended
    let result = harness.aggregator(&[dec!(5), dec!(200)]).refresh().await;
    assert!(matches!(result, Err(CoconutError::NoValidData)));
    assert_eq!(harness.prices.len(), 1);
    assert_eq!(harness.prices.latest().unwrap().id, 1);
}

#[tokio::test]
async fn stats_reflect_refreshes_and_submissions() {
    let harness = Harness::new();
    let stats_service = StatsService::new(harness.prices.clone(), harness.submissions.clone());

    // empty history: the rolling average has no data, stats() has no snapshot
    assert!(matches!(
        stats_service.seven_day_average(),
        Err(CoconutError::NoData(_))
    ));
    assert!(matches!(stats_service.stats(), Err(CoconutError::NotFound(_))));

    harness.aggregator(&[dec!(25)]).refresh().await.unwrap();
    // a single snapshot reports zero change
    assert_eq!(stats_service.weekly_change(), Decimal::ZERO);

    harness.aggregator(&[dec!(27)]).refresh().await.unwrap();

    let stats = stats_service.stats().unwrap();
    assert_eq!(stats.current_price, dec!(27.00));
    assert_eq!(stats.data_points, 2);
    assert_eq!(stats.seven_day_average, dec!(26.00));
    assert_eq!(stats.weekly_change, dec!(8.0)); // (27 - 25) / 25
    assert_eq!(stats.total_submissions, 0);

    let service = SubmissionService::new(harness.prices.clone(), harness.submissions.clone());
    service
        .verify(VerifyPriceRequest {
            is_correct: false,
            price: Some(dec!(31.5)),
            district: Some("Chennai".to_string()),
            market: None,
        })
        .unwrap();

    let stats = stats_service.stats().unwrap();
    assert_eq!(stats.total_submissions, 1);
    assert_eq!(stats.pending_submissions, 1);
}
