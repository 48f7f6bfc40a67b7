//! Submission Workflow Service
//!
//! Validates and records crowd-sourced price reports. The core only ever
//! creates `pending` submissions; approving or rejecting them belongs to an
//! external admin review process.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use coconut_core::{
    CoconutError, CoconutResult, Submission, SubmissionKind, SubmissionStatus,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::price_storage::PriceStorage;
use crate::submission_storage::{SubmissionCounts, SubmissionStorage};

/// Request payload for price verification
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPriceRequest {
    /// Whether the user confirms the published price
    pub is_correct: bool,
    /// The correct price, required when disputing
    pub price: Option<Decimal>,
    pub district: Option<String>,
    pub market: Option<String>,
}

/// Request payload for a new price submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPriceRequest {
    pub price: Option<Decimal>,
    pub district: Option<String>,
    pub market: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

/// Result of a verification request
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// User confirmed the published price; nothing is recorded
    Confirmed {
        confirmed_price: Decimal,
        district: String,
        timestamp: DateTime<Utc>,
    },
    /// User disputed the price; a correction was logged for review
    CorrectionRecorded(Submission),
}

/// Service handling the verification and submission workflows
pub struct SubmissionService {
    prices: Arc<PriceStorage>,
    submissions: Arc<SubmissionStorage>,
}

impl SubmissionService {
    pub fn new(prices: Arc<PriceStorage>, submissions: Arc<SubmissionStorage>) -> Self {
        Self { prices, submissions }
    }

    /// Handle a verification request.
    ///
    /// Confirmations reference the latest published average (zero when no
    /// snapshot exists yet — degraded but non-failing). Disputes require a
    /// price and record a correction carrying the published average for
    /// later comparison.
    pub fn verify(&self, request: VerifyPriceRequest) -> CoconutResult<VerifyOutcome> {
        let current_avg = self
            .prices
            .latest()
            .map(|s| s.average_price)
            .unwrap_or(Decimal::ZERO);
        let district = request
            .district
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        if request.is_correct {
            info!("User confirmed price ₹{} for {}", current_avg, district);
            return Ok(VerifyOutcome::Confirmed {
                confirmed_price: current_avg,
                district,
                timestamp: Utc::now(),
            });
        }

        let user_price = request
            .price
            .ok_or_else(|| CoconutError::missing_field("price"))?;

        info!(
            "User disputed price for {}: reported ₹{} against ₹{}",
            district, user_price, current_avg
        );

        let stored = self.submissions.append(Submission {
            id: 0,
            kind: SubmissionKind::Correction,
            user_price,
            system_price: Some(current_avg),
            district,
            market: request.market.filter(|m| !m.is_empty()),
            contact: None,
            notes: Some("User reported incorrect price".to_string()),
            timestamp: Utc::now(),
            status: SubmissionStatus::Pending,
        })?;

        Ok(VerifyOutcome::CorrectionRecorded(stored))
    }

    /// Record a new price point for admin review.
    ///
    /// Fails [`CoconutError::MissingField`] naming the first absent required
    /// field; a missing price is never coerced to zero.
    pub fn submit(&self, request: SubmitPriceRequest) -> CoconutResult<Submission> {
        let user_price = request
            .price
            .ok_or_else(|| CoconutError::missing_field("price"))?;
        let district = request
            .district
            .filter(|d| !d.is_empty())
            .ok_or_else(|| CoconutError::missing_field("district"))?;

        self.submissions.append(Submission {
            id: 0,
            kind: SubmissionKind::NewSubmission,
            user_price,
            system_price: None,
            district,
            market: request.market.filter(|m| !m.is_empty()),
            contact: request.contact.filter(|c| !c.is_empty()),
            notes: request.notes.filter(|n| !n.is_empty()),
            timestamp: Utc::now(),
            status: SubmissionStatus::Pending,
        })
    }

    /// List submissions, optionally filtered by review status
    pub fn list(&self, status: Option<SubmissionStatus>) -> Vec<Submission> {
        self.submissions.list(status)
    }

    /// Current submission totals
    pub fn counts(&self) -> SubmissionCounts {
        self.submissions.counts()
    }
}
