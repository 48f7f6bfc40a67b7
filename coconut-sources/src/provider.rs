//! Quote provider trait definition

use async_trait::async_trait;
use coconut_core::{CoconutResult, Quote};

/// Trait for sources of raw coconut price quotes.
///
/// Implementations own their per-source timeout and retry policy; a slow or
/// unreachable source must be skipped rather than failing the whole fetch, so
/// the returned list may be partial (or empty). The aggregation engine
/// validates and folds whatever comes back.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current round of quotes from every reachable source
    async fn fetch_quotes(&self) -> CoconutResult<Vec<Quote>>;
}

/// Provider that always returns a fixed set of quotes.
///
/// Useful as a test fixture and for replaying recorded rounds.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteProvider {
    quotes: Vec<Quote>,
}

impl StaticQuoteProvider {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }
}

#[async_trait]
impl QuoteProvider for StaticQuoteProvider {
    async fn fetch_quotes(&self) -> CoconutResult<Vec<Quote>> {
        Ok(self.quotes.clone())
    }
}
