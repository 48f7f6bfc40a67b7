//! Root endpoint index

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::AppState;

/// API documentation document served at the root
async fn home() -> Json<Value> {
    Json(json!({
        "message": "Coconut Price Terminal API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/price": "GET - Get current coconut price",
            "/api/price/refresh": "POST - Manually refresh price",
            "/api/history": "GET - Get price history (add ?days=7)",
            "/api/verify": "POST - Verify if price is correct",
            "/api/submit": "POST - Submit new price",
            "/api/districts": "GET - Get district-wise prices",
            "/api/submissions": "GET - Get user submissions",
            "/api/stats": "GET - Get system statistics"
        }
    }))
}

/// Create the index route
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
