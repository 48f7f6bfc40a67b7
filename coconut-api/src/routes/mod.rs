//! API route definitions

mod districts;
mod health;
mod index;
mod price;
mod stats;
mod submissions;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use coconut_core::CoconutError;
use serde::Serialize;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(price::routes())
        .merge(submissions::routes())
        .merge(stats::routes())
        .merge(districts::routes())
        .merge(health::routes())
}

/// Create the root index route (outside `/api`)
pub fn index_routes() -> Router<AppState> {
    index::routes()
}

/// Response envelope used by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Successful response with a payload
pub fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }),
    )
        .into_response()
}

/// Successful response with a payload and a human-readable message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }),
    )
        .into_response()
}

/// Failure response carrying only a message
pub fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message.into()),
        }),
    )
        .into_response()
}

/// Map an engine error to its HTTP status.
///
/// Validation problems are the caller's fault (400), absent data is 404, and
/// storage failures surface as 500 so callers can tell them apart.
pub fn error_response(err: &CoconutError) -> Response {
    let status = match err {
        CoconutError::NotFound(_) | CoconutError::NoData(_) => StatusCode::NOT_FOUND,
        CoconutError::NoValidData
        | CoconutError::MissingField(_)
        | CoconutError::InvalidValue(_) => StatusCode::BAD_REQUEST,
        CoconutError::Storage(_) | CoconutError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    fail(status, err.to_string())
}
