//! System statistics endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;

use super::{error_response, ok};
use crate::AppState;

/// Stats payload with the change formatted for display ("+1.5%")
#[derive(Debug, Serialize)]
struct StatsResponse {
    current_price: Decimal,
    min_today: Decimal,
    max_today: Decimal,
    source_count: usize,
    seven_day_average: Decimal,
    weekly_change: String,
    total_submissions: usize,
    pending_submissions: usize,
    data_points: usize,
    last_updated: DateTime<Utc>,
}

/// Create stats routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

/// Get aggregate system statistics
async fn get_stats(State(state): State<AppState>) -> Response {
    match state.stats_service.stats() {
        Ok(stats) => {
            let sign = if stats.weekly_change >= Decimal::ZERO { "+" } else { "" };
            ok(StatsResponse {
                current_price: stats.current_price,
                min_today: stats.min_today,
                max_today: stats.max_today,
                source_count: stats.source_count,
                seven_day_average: stats.seven_day_average,
                weekly_change: format!("{}{}%", sign, stats.weekly_change),
                total_submissions: stats.total_submissions,
                pending_submissions: stats.pending_submissions,
                data_points: stats.data_points,
                last_updated: stats.last_updated,
            })
        }
        Err(e) => {
            error!("Failed to compute stats: {}", e);
            error_response(&e)
        }
    }
}
