//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::{Config, ReturnFormula};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::portfolio::SimulationResult;
use crate::models::screening::ScreeningResult;
use crate::portfolio::PortfolioSimulator;
use crate::screening::ScreeningPipeline;
use crate::services::index_registry::{IndexInfo, IndexRegistry, StaticIndexRegistry};
use crate::services::market_data::MarketDataProvider;
use crate::services::yahoo::YahooMarketDataProvider;

const MAX_TOP_N: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub config: Arc<Config>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub registry: Arc<dyn IndexRegistry>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Engine errors rendered as JSON with a matching status code.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EngineError::InvalidInput(_) | EngineError::UnknownIndex(_) => StatusCode::BAD_REQUEST,
            EngineError::UpstreamRateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            EngineError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }
        (
            status,
            Json(json!({ "success": false, "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Momentum Stock Screener API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /indices": "List available indices",
            "GET /tickers/{index}": "List the tickers of an index",
            "POST /screen": "Run the momentum screener",
            "POST /simulate": "Simulate an equal-weight portfolio",
            "GET /health": "Health check",
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "momentix-screener"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if response.status().is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %response.status(),
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

async fn list_indices(State(state): State<AppState>) -> Json<Vec<IndexInfo>> {
    Json(state.registry.list_indices())
}

#[derive(Debug, Serialize)]
struct TickersResponse {
    index: String,
    count: usize,
    tickers: Vec<String>,
}

async fn get_tickers(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<TickersResponse>, ApiError> {
    let tickers = state.registry.list_tickers(&index)?;
    Ok(Json(TickersResponse {
        index,
        count: tickers.len(),
        tickers,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub index_name: String,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub return_formula: Option<ReturnFormula>,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub success: bool,
    pub index_name: String,
    #[serde(flatten)]
    pub result: ScreeningResult,
}

async fn run_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, ApiError> {
    let top_n = request.top_n.unwrap_or(state.config.screener.top_n);
    if !(1..=MAX_TOP_N).contains(&top_n) {
        return Err(EngineError::invalid_input(format!(
            "top_n must be between 1 and {}, got {}",
            MAX_TOP_N, top_n
        ))
        .into());
    }

    let tickers = state.registry.list_tickers(&request.index_name)?;
    let mut config = state.config.screener.clone();
    if let Some(formula) = request.return_formula {
        config = config.with_return_formula(formula);
    }

    let pipeline = ScreeningPipeline::new(config);
    let result = pipeline
        .run(state.provider.as_ref(), &tickers, top_n)
        .await?;

    state.metrics.screening_runs_total.inc();
    state
        .metrics
        .tickers_screened_total
        .inc_by(result.summary.total_analyzed as u64);
    state
        .metrics
        .tickers_excluded_total
        .inc_by(result.summary.excluded as u64);

    Ok(Json(ScreenResponse {
        success: true,
        index_name: request.index_name,
        result,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub tickers: Vec<String>,
    pub investment_amount: f64,
    pub period_months: u32,
}

async fn run_simulation(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>, ApiError> {
    let simulator = PortfolioSimulator::new().with_concurrency(state.config.screener.concurrency);
    let result = simulator
        .simulate(
            state.provider.as_ref(),
            &request.tickers,
            request.investment_amount,
            request.period_months,
        )
        .await?;

    state.metrics.simulations_total.inc();
    Ok(Json(result))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/indices", get(list_indices))
        .route("/tickers/{index}", get(get_tickers))
        .route("/screen", post(run_screen))
        .route("/simulate", post(run_simulation))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooMarketDataProvider::new(&config.market_data));
    let port = config.port;

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        config: Arc::new(config),
        provider,
        registry: Arc::new(StaticIndexRegistry::new()),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
