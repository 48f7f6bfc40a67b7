//! Quote source integrations for the Coconut Price Terminal
//!
//! This crate abstracts where raw coconut price quotes come from. The
//! aggregation engine only sees the [`QuoteProvider`] trait; behind it sit an
//! HTTP-backed provider polling the configured commodity feeds and a simulated
//! provider for demos and offline development.

pub mod feed;
pub mod provider;
pub mod simulated;

pub use feed::{FeedQuoteProvider, FeedQuoteProviderConfig, SourceEndpoint};
pub use provider::{QuoteProvider, StaticQuoteProvider};
pub use simulated::SimulatedQuoteProvider;
