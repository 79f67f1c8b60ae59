//! HTTP API: tool dispatch, read-side queries, health checks, metrics

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use maintenance_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    observability::ServiceMetrics,
    store::MaintenanceStore,
    tools::{ToolError, ToolName, ToolRouter},
    PredictionError, StoreError,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MaintenanceStore>,
    pub tool_router: Arc<ToolRouter>,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub history_limit: usize,
}

/// Tool dispatch endpoint used by the LLM assistant
///
/// Domain failures return 200 with the `{ "error": ... }` shape the
/// assistant pattern-matches on; hard failures surface as 4xx/5xx.
async fn run_tool(
    State(state): State<Arc<AppState>>,
    Path(tool): Path<String>,
    Json(args): Json<serde_json::Value>,
) -> impl IntoResponse {
    let tool = match ToolName::from_str(&tool) {
        Ok(tool) => tool,
        Err(err) => {
            return (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() })));
        }
    };

    match state.tool_router.dispatch(tool, args).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(ToolError::InvalidArgs(err)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("invalid arguments: {err}") })),
        ),
        Err(err) => {
            error!(tool = %tool, error = %err, "Tool invocation failed");
            if let ToolError::Prediction(
                PredictionError::Lookup(store_err) | PredictionError::Persistence(store_err),
            ) = &err
            {
                state
                    .health_registry
                    .set_unhealthy(components::STORE, store_err.to_string())
                    .await;
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "prediction could not be saved" })),
            )
        }
    }
}

async fn list_equipment(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_equipment().await {
        Ok(equipment) => (
            StatusCode::OK,
            Json(json!({ "count": equipment.len(), "equipment": equipment })),
        ),
        Err(err) => storage_error(&state, err).await,
    }
}

async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.store.equipment_by_code(&code).await {
        Ok(Some(equipment)) => (StatusCode::OK, Json(json!(equipment))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Equipment {code} not found") })),
        ),
        Err(err) => storage_error(&state, err).await,
    }
}

async fn equipment_predictions(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    let equipment = match state.store.equipment_by_code(&code).await {
        Ok(Some(equipment)) => equipment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Equipment {code} not found") })),
            );
        }
        Err(err) => return storage_error(&state, err).await,
    };

    match state
        .store
        .predictions_for_equipment(equipment.id, state.history_limit)
        .await
    {
        Ok(predictions) => (
            StatusCode::OK,
            Json(json!({ "count": predictions.len(), "predictions": predictions })),
        ),
        Err(err) => storage_error(&state, err).await,
    }
}

async fn list_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.recent_events(state.history_limit).await {
        Ok(events) => (
            StatusCode::OK,
            Json(json!({ "count": events.len(), "events": events })),
        ),
        Err(err) => storage_error(&state, err).await,
    }
}

/// Log a storage failure and mark the store component unhealthy, which
/// flips `/healthz` to 503 and revokes readiness.
async fn storage_error(state: &AppState, err: StoreError) -> (StatusCode, Json<serde_json::Value>) {
    error!(error = %err, "Storage operation failed");
    state
        .health_registry
        .set_unhealthy(components::STORE, err.to_string())
        .await;
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "storage unavailable" })),
    )
}

/// Health check - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tools/:tool", post(run_tool))
        .route("/api/equipment", get(list_equipment))
        .route("/api/equipment/:code", get(get_equipment))
        .route("/api/equipment/:code/predictions", get(equipment_predictions))
        .route("/api/events", get(list_events))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
