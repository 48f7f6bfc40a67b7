//! District-wise price endpoint
//!
//! Presentation-layer mock: per-district figures are random variations around
//! the latest published average. No real per-district data exists yet, and
//! nothing here is persisted.

use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use chrono::{DateTime, Utc};
use rand::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{fail, ok};
use crate::AppState;

/// Tamil Nadu districts, in presentation order
const TAMIL_NADU_DISTRICTS: &[&str] = &[
    "Chennai", "Coimbatore", "Madurai", "Thanjavur", "Trichy",
    "Salem", "Erode", "Tirunelveli", "Vellore", "Thoothukudi",
    "Dindigul", "Kanyakumari", "Kanchipuram", "Tiruvallur", "Cuddalore",
    "Nagapattinam", "Pudukkottai", "Sivaganga", "Ramanathapuram", "Virudhunagar",
    "Theni", "Namakkal", "Dharmapuri", "Krishnagiri", "Ariyalur", "Perambalur",
];

/// How many districts the dashboard shows
const DISTRICTS_SHOWN: usize = 12;

#[derive(Debug, Serialize)]
struct DistrictPrice {
    district: &'static str,
    price: Decimal,
    min: Decimal,
    max: Decimal,
    trend: String,
    source_count: u32,
}

#[derive(Debug, Serialize)]
struct DistrictsResponse {
    districts: Vec<DistrictPrice>,
    state_average: Decimal,
    total_districts: usize,
    last_updated: DateTime<Utc>,
}

/// Create district routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/districts", get(get_district_prices))
}

/// Get district-wise prices derived from the latest state average
async fn get_district_prices(State(state): State<AppState>) -> Response {
    let Ok(latest) = state.prices.latest() else {
        return fail(StatusCode::NOT_FOUND, "No price data available");
    };

    let base_price = latest.average_price;
    let mut rng = rand::rng();

    let mut districts: Vec<DistrictPrice> = TAMIL_NADU_DISTRICTS
        .iter()
        .take(DISTRICTS_SHOWN)
        .map(|&district| {
            // variation of -3.0 to +3.0 rupees, in tenths
            let variation = Decimal::new(rng.random_range(-30..=30), 1);
            let price = (base_price + variation)
                .round_dp(1)
                .clamp(Decimal::from(20), Decimal::from(35));

            let trend_points: i64 = *[-2, -1, 0, 0, 1, 2, 2].choose(&mut rng).unwrap_or(&0);
            let sign = if trend_points >= 0 { "+" } else { "" };

            DistrictPrice {
                district,
                price,
                min: (price * Decimal::new(9, 1)).round_dp(1),
                max: (price * Decimal::new(11, 1)).round_dp(1),
                trend: format!("{}{}%", sign, trend_points),
                source_count: rng.random_range(2..=5),
            }
        })
        .collect();

    // highest price first
    districts.sort_by(|a, b| b.price.cmp(&a.price));

    let total_districts = districts.len();
    ok(DistrictsResponse {
        districts,
        state_average: base_price,
        total_districts,
        last_updated: latest.timestamp,
    })
}
