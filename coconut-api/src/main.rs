//! Coconut Price Terminal API Server
//!
//! HTTP API server over the aggregation engine: current price, refresh,
//! history, statistics, and the crowd-sourced verification workflow.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use coconut_engine::{
    PriceAggregator, PriceStorage, StatsService, SubmissionService, SubmissionStorage,
};
use coconut_sources::{
    FeedQuoteProvider, FeedQuoteProviderConfig, QuoteProvider, SimulatedQuoteProvider,
    SourceEndpoint,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<PriceStorage>,
    pub aggregator: Arc<PriceAggregator>,
    pub stats_service: Arc<StatsService>,
    pub submission_service: Arc<SubmissionService>,
}

/// Build the quote provider from the environment.
///
/// `SOURCES_MODE=feed` polls the endpoints in `SOURCE_FEEDS`
/// (comma-separated `name=url` pairs); anything else runs the simulated
/// provider, which needs no network access.
fn build_provider() -> anyhow::Result<Arc<dyn QuoteProvider>> {
    let mode = std::env::var("SOURCES_MODE").unwrap_or_else(|_| "simulated".to_string());

    if mode == "feed" {
        let raw = std::env::var("SOURCE_FEEDS").unwrap_or_default();
        let sources: Vec<SourceEndpoint> = raw
            .split(',')
            .filter_map(|pair| {
                let (name, url) = pair.split_once('=')?;
                Some(SourceEndpoint::new(name.trim(), url.trim()))
            })
            .collect();

        if sources.is_empty() {
            anyhow::bail!("SOURCES_MODE=feed requires SOURCE_FEEDS (name=url,...)");
        }

        info!("Using feed quote provider with {} sources", sources.len());
        let provider = FeedQuoteProvider::new(FeedQuoteProviderConfig {
            sources,
            ..FeedQuoteProviderConfig::default()
        })?;
        return Ok(Arc::new(provider));
    }

    info!("Using simulated quote provider");
    Ok(Arc::new(SimulatedQuoteProvider::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,coconut_api=debug")),
        )
        .init();

    info!("Starting Coconut Price Terminal API");

    // Initialize durable stores
    let prices_path =
        std::env::var("PRICES_PATH").unwrap_or_else(|_| "data/prices.json".to_string());
    let submissions_path =
        std::env::var("SUBMISSIONS_PATH").unwrap_or_else(|_| "data/submissions.json".to_string());

    info!("Opening price history at: {}", prices_path);
    let prices = Arc::new(PriceStorage::new(&prices_path)?);
    info!("Opening submission log at: {}", submissions_path);
    let submissions = Arc::new(SubmissionStorage::new(&submissions_path)?);

    // Initialize the quote provider and services
    let provider = build_provider()?;
    let aggregator = Arc::new(PriceAggregator::new(provider, prices.clone()));
    let stats_service = Arc::new(StatsService::new(prices.clone(), submissions.clone()));
    let submission_service = Arc::new(SubmissionService::new(prices.clone(), submissions));

    let state = AppState {
        prices,
        aggregator,
        stats_service,
        submission_service,
    };

    // Configure CORS for the frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::index_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
