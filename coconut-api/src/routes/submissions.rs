//! Verification and submission endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use coconut_core::{Submission, SubmissionStatus};
use coconut_engine::{SubmitPriceRequest, VerifyOutcome, VerifyPriceRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{error_response, fail, ok, ok_with_message};
use crate::AppState;

/// Payload for a confirmed-price response
#[derive(Debug, Serialize)]
struct ConfirmationResponse {
    confirmed_price: Decimal,
    district: String,
    timestamp: DateTime<Utc>,
}

/// Query parameters for listing submissions
#[derive(Debug, Deserialize)]
struct ListSubmissionsQuery {
    status: Option<String>,
}

/// Submission listing payload
#[derive(Debug, Serialize)]
struct SubmissionsResponse {
    submissions: Vec<Submission>,
    count: usize,
    pending_count: usize,
}

/// Create submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify_price))
        .route("/submit", post(submit_price))
        .route("/submissions", get(list_submissions))
}

/// User verifies whether the published price is correct
async fn verify_price(
    State(state): State<AppState>,
    Json(request): Json<VerifyPriceRequest>,
) -> Response {
    match state.submission_service.verify(request) {
        Ok(VerifyOutcome::Confirmed {
            confirmed_price,
            district,
            timestamp,
        }) => ok_with_message(
            ConfirmationResponse {
                confirmed_price,
                district,
                timestamp,
            },
            "Thank you for confirming the price!",
        ),
        Ok(VerifyOutcome::CorrectionRecorded(submission)) => {
            ok_with_message(submission, "Price correction submitted for admin review")
        }
        Err(e) => {
            error!("Verification failed: {}", e);
            error_response(&e)
        }
    }
}

/// User submits a new price point
async fn submit_price(
    State(state): State<AppState>,
    Json(request): Json<SubmitPriceRequest>,
) -> Response {
    match state.submission_service.submit(request) {
        Ok(submission) => {
            ok_with_message(submission, "Price submitted successfully for admin review")
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            error_response(&e)
        }
    }
}

/// List submissions, optionally filtered by review status
async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<ListSubmissionsQuery>,
) -> Response {
    let status = match params.status.as_deref() {
        Some(raw) => match raw.parse::<SubmissionStatus>() {
            Ok(status) => Some(status),
            Err(e) => return fail(StatusCode::BAD_REQUEST, format!("Invalid value: {}", e)),
        },
        None => None,
    };

    let submissions = state.submission_service.list(status);
    let counts = state.submission_service.counts();

    ok(SubmissionsResponse {
        count: submissions.len(),
        pending_count: counts.pending,
        submissions,
    })
}
