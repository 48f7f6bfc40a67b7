//! Core types for the Coconut Price Terminal
//!
//! This crate defines the shared data structures used across the terminal:
//! raw source quotes, aggregated price snapshots, the rolling price history,
//! and user submissions, together with the workspace-wide error type.

pub mod error;
pub mod quote;
pub mod snapshot;
pub mod submission;

pub use error::{CoconutError, CoconutResult};
pub use quote::Quote;
pub use snapshot::{PriceHistory, PriceSnapshot};
pub use submission::{Submission, SubmissionKind, SubmissionStatus};
