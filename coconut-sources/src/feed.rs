//! HTTP-backed quote provider
//!
//! Polls a configurable set of commodity price feeds, each exposing a small
//! JSON document with the latest coconut price. Real HTML scraping is out of
//! scope; production deployments point these endpoints at a scraping proxy.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use coconut_core::{CoconutError, CoconutResult, Quote};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::provider::QuoteProvider;

/// Default per-source request timeout
const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

/// A named feed endpoint
#[derive(Debug, Clone)]
pub struct SourceEndpoint {
    /// Source name recorded on every quote (e.g. "commodityonline")
    pub name: String,
    /// URL returning the feed document
    pub url: String,
}

impl SourceEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Configuration for [`FeedQuoteProvider`]
#[derive(Debug, Clone)]
pub struct FeedQuoteProviderConfig {
    /// Feed endpoints to poll each round
    pub sources: Vec<SourceEndpoint>,
    /// Per-source timeout; a source that exceeds it is skipped for the round
    pub source_timeout: Duration,
}

impl Default for FeedQuoteProviderConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            source_timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS),
        }
    }
}

/// Wire format of a feed document
#[derive(Debug, Deserialize)]
struct FeedDocument {
    price: Decimal,
}

/// Quote provider that fetches from HTTP feed endpoints.
///
/// Sources are polled concurrently; each request is bounded by the configured
/// timeout so one unreachable feed never blocks the round. Failures are
/// logged and the remaining quotes returned.
pub struct FeedQuoteProvider {
    client: Client,
    config: FeedQuoteProviderConfig,
}

impl FeedQuoteProvider {
    /// Create a new provider over the configured endpoints
    pub fn new(config: FeedQuoteProviderConfig) -> CoconutResult<Self> {
        let client = Client::builder()
            .timeout(config.source_timeout)
            .build()
            .map_err(|e| CoconutError::source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Fetch one source, mapping every failure into a skippable error
    async fn fetch_source(&self, source: &SourceEndpoint) -> CoconutResult<Quote> {
        debug!("Fetching quote from {} ({})", source.name, source.url);

        let response = self
            .client
            .get(&source.url)
            .send()
            .await
            .map_err(|e| CoconutError::source(format!("{}: request failed: {}", source.name, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CoconutError::source(format!(
                "{}: feed returned {}",
                source.name, status
            )));
        }

        let document: FeedDocument = response
            .json()
            .await
            .map_err(|e| CoconutError::source(format!("{}: unparseable feed: {}", source.name, e)))?;

        Ok(Quote {
            source: source.name.clone(),
            price: document.price,
            observed_at: Utc::now(),
        })
    }
}

#[async_trait]
impl QuoteProvider for FeedQuoteProvider {
    async fn fetch_quotes(&self) -> CoconutResult<Vec<Quote>> {
        let fetches = self
            .config
            .sources
            .iter()
            .map(|source| self.fetch_source(source));

        let results = futures::future::join_all(fetches).await;

        let mut quotes = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(quote) => quotes.push(quote),
                // partial-source degradation: skip the source, keep the round
                Err(e) => warn!("Skipping source for this round: {}", e),
            }
        }

        debug!("Fetched {} quotes from {} sources", quotes.len(), self.config.sources.len());
        Ok(quotes)
    }
}
