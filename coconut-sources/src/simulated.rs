//! Simulated quote provider for demos and offline development

use async_trait::async_trait;
use coconut_core::{CoconutResult, Quote};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::provider::QuoteProvider;

/// A simulated source with its plausible whole-rupee price band
#[derive(Debug, Clone)]
struct SimulatedSource {
    name: &'static str,
    min: i64,
    max: i64,
}

/// The default round of simulated sources, mirroring the live feed names
const DEFAULT_SOURCES: &[SimulatedSource] = &[
    SimulatedSource { name: "commodityonline", min: 26, max: 32 },
    SimulatedSource { name: "commoditymarketlive", min: 27, max: 31 },
    SimulatedSource { name: "kisantak", min: 25, max: 30 },
    SimulatedSource { name: "krishidunia_mandirates", min: 28, max: 33 },
    SimulatedSource { name: "krishidunia_mandibhav", min: 27, max: 32 },
];

/// Quote provider that fabricates plausible quotes without any network I/O
#[derive(Debug, Clone, Default)]
pub struct SimulatedQuoteProvider;

impl SimulatedQuoteProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteProvider for SimulatedQuoteProvider {
    async fn fetch_quotes(&self) -> CoconutResult<Vec<Quote>> {
        let mut rng = rand::rng();

        let quotes: Vec<Quote> = DEFAULT_SOURCES
            .iter()
            .map(|source| {
                let price = rng.random_range(source.min..=source.max);
                Quote::new(source.name, Decimal::from(price))
            })
            .collect();

        debug!("Simulated {} quotes", quotes.len());
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_quotes_stay_inside_their_bands() {
        let provider = SimulatedQuoteProvider::new();

        for _ in 0..20 {
            let quotes = provider.fetch_quotes().await.unwrap();
            assert_eq!(quotes.len(), DEFAULT_SOURCES.len());

            for (quote, source) in quotes.iter().zip(DEFAULT_SOURCES) {
                assert_eq!(quote.source, source.name);
                assert!(quote.price >= Decimal::from(source.min));
                assert!(quote.price <= Decimal::from(source.max));
                assert!(quote.is_valid());
            }
        }
    }
}
