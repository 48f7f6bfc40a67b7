//! Business logic for the Coconut Price Terminal
//!
//! This crate provides the engine layer: folding raw source quotes into
//! aggregated snapshots, the durable price history and submission log, and the
//! statistics and verification workflows built on top of them.

pub mod aggregator;
mod persistence;
pub mod price_storage;
pub mod stats_service;
pub mod submission_service;
pub mod submission_storage;

pub use aggregator::PriceAggregator;
pub use price_storage::PriceStorage;
pub use stats_service::{StatsService, SystemStats};
pub use submission_service::{
    SubmissionService, SubmitPriceRequest, VerifyOutcome, VerifyPriceRequest,
};
pub use submission_storage::{SubmissionCounts, SubmissionStorage};
