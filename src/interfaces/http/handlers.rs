//! HTTP handlers for the calculation endpoint

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerEnvConfig;
use crate::domain::performance::{PerformanceRequest, PerformanceResponse, compute};
use crate::infrastructure::observability::Metrics;
use crate::interfaces::http::error::{ApiError, ApiResult};

/// Path under which the managed backend exposed the calculation function
pub const CALCULATE_ROUTE: &str = "/functions/v1/calculate-strategic-performance";
pub const HEALTH_ROUTE: &str = "/health";

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub metrics: Metrics,
    pub config: Arc<ServerEnvConfig>,
}

impl AppState {
    pub fn new(config: ServerEnvConfig, metrics: Metrics) -> Self {
        Self {
            metrics,
            config: Arc::new(config),
        }
    }
}

/// POST /functions/v1/calculate-strategic-performance
pub async fn calculate_strategic_performance(
    State(state): State<AppState>,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> ApiResult<Json<PerformanceResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected calculation request: {}", rejection.body_text());
        state
            .metrics
            .inc_http_request("calculate", rejection.status().as_u16());
        ApiError::new(rejection.status(), rejection.body_text())
    })?;

    info!(
        "Processing {} goals and {} objectives",
        request.goals.len(),
        request.objectives.len()
    );

    let response = compute(&request.goals, &request.objectives, &request.timeframe);
    if let Err(e) = response.validate() {
        error!("Error in strategic performance calculation: {}", e);
        state.metrics.inc_http_request("calculate", 500);
        return Err(ApiError::internal(e.to_string()));
    }

    state
        .metrics
        .record_calculation("primary", response.strategic_likelihood);
    state.metrics.inc_http_request("calculate", 200);
    Ok(Json(response))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "stratpulse",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Create router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route(HEALTH_ROUTE, get(health_check))
        .route(CALCULATE_ROUTE, post(calculate_strategic_performance))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Preflight and response headers the dashboard clients rely on
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
