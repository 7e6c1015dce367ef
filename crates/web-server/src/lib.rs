// In crates/web-server/src/lib.rs

use analytics::{AnalyticsEngine, PerformanceSummary};
use app_config::types::ServerSettings;
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use core_types::PriceBar;
use database::{Db, StoredBar};
use serde_json::json;
use strategies::MACrossoverSettings;
use tokio::net::TcpListener;
use types::{HealthResponse, SignalsResponse, WindowParams};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// Bounds accepted by `GET /strategy/signals`.
const SIGNALS_SHORT_WINDOW_RANGE: std::ops::RangeInclusive<usize> = 2..=50;
const SIGNALS_LONG_WINDOW_RANGE: std::ops::RangeInclusive<usize> = 5..=100;

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    /// Windows used when a request omits them.
    pub defaults: MACrossoverSettings,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The API is consumed by browser dashboards on other origins.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let strategy_router = Router::new()
        .route("/performance", get(get_performance_handler))
        .route("/signals", get(get_signals_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/data", get(get_data_handler).post(create_data_handler))
        .route("/health", get(health_check_handler))
        .nest("/strategy", strategy_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Binds to the configured address and serves the API until the process exits.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "Web server listening.");

    axum::serve(listener, create_router(app_state)).await?;
    Ok(())
}

/// The handler for `GET /`.
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Trading Strategy API",
        "status": "Running",
        "endpoints": {
            "GET /data": "Fetch all stock data",
            "POST /data": "Add new stock record",
            "GET /strategy/performance": "Trading strategy results",
            "GET /strategy/signals": "Recent trading signals",
            "GET /health": "Service health and record count"
        }
    }))
}

/// The handler for `GET /data`.
async fn get_data_handler(State(state): State<AppState>) -> Result<Json<Vec<StoredBar>>> {
    let bars = state.db.get_all_bars().await?;
    Ok(Json(bars))
}

/// The handler for `POST /data`.
async fn create_data_handler(
    State(state): State<AppState>,
    Json(bar): Json<PriceBar>,
) -> Result<Json<StoredBar>> {
    let stored = state.db.insert_bar(&bar).await?;
    tracing::info!(id = stored.id, datetime = %bar.timestamp, "Stored new price bar.");
    Ok(Json(stored))
}

/// The handler for `GET /strategy/performance`.
async fn get_performance_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<WindowParams>, QueryRejection>,
) -> Result<Json<PerformanceSummary>> {
    let Query(params) = params?;
    let settings = params.resolve(&state.defaults);
    let summary = evaluate(&state.db, settings).await?;
    Ok(Json(summary))
}

/// The handler for `GET /strategy/signals`.
async fn get_signals_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<WindowParams>, QueryRejection>,
) -> Result<Json<SignalsResponse>> {
    let Query(params) = params?;
    let settings = params.resolve(&state.defaults);

    if !SIGNALS_SHORT_WINDOW_RANGE.contains(&settings.short_window) {
        return Err(Error::Validation(format!(
            "short_window must be between {} and {}",
            SIGNALS_SHORT_WINDOW_RANGE.start(),
            SIGNALS_SHORT_WINDOW_RANGE.end()
        )));
    }
    if !SIGNALS_LONG_WINDOW_RANGE.contains(&settings.long_window) {
        return Err(Error::Validation(format!(
            "long_window must be between {} and {}",
            SIGNALS_LONG_WINDOW_RANGE.start(),
            SIGNALS_LONG_WINDOW_RANGE.end()
        )));
    }

    let summary = evaluate(&state.db, settings).await?;
    Ok(Json(SignalsResponse {
        total_signals: summary.signals.len(),
        recent_signals: summary.signals,
        parameters: settings,
    }))
}

/// The handler for `GET /health`.
async fn health_check_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let records = state.db.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        records,
        timestamp: chrono::Utc::now(),
    }))
}

/// Validates the windows against the stored data and runs the engine on a
/// fresh snapshot of the series.
async fn evaluate(db: &Db, settings: MACrossoverSettings) -> Result<PerformanceSummary> {
    settings.validate()?;

    let available = db.count().await?;
    if available < settings.long_window as i64 {
        return Err(Error::InsufficientData {
            required: settings.long_window,
            available,
        });
    }

    let series = db.get_price_series().await?;
    let summary = AnalyticsEngine::new().evaluate(&series, &settings);
    tracing::info!(
        short_window = settings.short_window,
        long_window = settings.long_window,
        bars = series.len(),
        total_trades = summary.total_trades,
        "Evaluated crossover strategy."
    );

    Ok(summary)
}
