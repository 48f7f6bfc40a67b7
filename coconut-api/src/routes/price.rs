//! Current price, refresh, and history endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use coconut_core::PriceSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{error_response, fail, ok, ok_with_message};
use crate::AppState;

/// Default history window when `days` is not given
const DEFAULT_HISTORY_DAYS: i64 = 7;

/// Summary of the latest snapshot
#[derive(Debug, Serialize)]
struct CurrentPriceResponse {
    current_price: Decimal,
    min_price: Decimal,
    max_price: Decimal,
    source_count: usize,
    last_updated: DateTime<Utc>,
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    days: Option<i64>,
}

/// One chart-shaped history row
#[derive(Debug, Serialize)]
struct ChartPoint {
    date: String,
    price: Decimal,
    min: Decimal,
    max: Decimal,
}

/// History payload: full snapshots plus chart rows
#[derive(Debug, Serialize)]
struct HistoryResponse {
    prices: Vec<PriceSnapshot>,
    chart_data: Vec<ChartPoint>,
    count: usize,
}

/// Create price routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/price", get(get_price))
        .route("/price/refresh", post(refresh_price))
        .route("/history", get(get_history))
}

/// Get the current coconut price
async fn get_price(State(state): State<AppState>) -> Response {
    match state.prices.latest() {
        Ok(snapshot) => ok_with_message(
            CurrentPriceResponse {
                current_price: snapshot.average_price,
                min_price: snapshot.min_price,
                max_price: snapshot.max_price,
                source_count: snapshot.source_count,
                last_updated: snapshot.timestamp,
            },
            "Price retrieved successfully",
        ),
        Err(_) => fail(
            StatusCode::NOT_FOUND,
            "No price data available. Please refresh prices.",
        ),
    }
}

/// Trigger an aggregation round
async fn refresh_price(State(state): State<AppState>) -> Response {
    info!("Refreshing coconut prices");

    match state.aggregator.refresh().await {
        Ok(snapshot) => {
            let message = format!("Price refreshed: ₹{} per coconut", snapshot.average_price);
            ok_with_message(snapshot, message)
        }
        Err(e) => {
            error!("Refresh failed: {}", e);
            error_response(&e)
        }
    }
}

/// Get the price history window
async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Response {
    let days = params.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if days < 0 {
        return fail(StatusCode::BAD_REQUEST, "Invalid value: days must be >= 0");
    }

    let prices = state.prices.window_of_days(days as usize);
    let chart_data: Vec<ChartPoint> = prices
        .iter()
        .map(|p| ChartPoint {
            date: p.timestamp.format("%b %d").to_string(),
            price: p.average_price,
            min: p.min_price,
            max: p.max_price,
        })
        .collect();

    let count = prices.len();
    ok(HistoryResponse {
        prices,
        chart_data,
        count,
    })
}
