//! Maintenance server - predictive maintenance API for farm equipment
//!
//! Hosts the prediction tool endpoint consumed by the chat assistant's
//! dispatch loop, read-side queries over equipment and prediction
//! history, and health/metrics endpoints.

use std::sync::Arc;

use anyhow::Result;
use maintenance_lib::{
    engine::{EngineOptions, PredictionEngine},
    health::{components, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    orchestrator::PredictionOrchestrator,
    store::InMemoryStore,
    tools::ToolRouter,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod seed;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting maintenance-server");

    let config = config::ServerConfig::load()?;
    info!(service = %config.service_name, port = config.api_port, "Server configured");

    let health_registry = HealthRegistry::new();
    health_registry.register(components::STORE).await;

    let metrics = ServiceMetrics::new();
    let logger = StructuredLogger::new(&config.service_name);

    let store = Arc::new(InMemoryStore::new());
    let equipment_count = if config.seed_demo_data {
        seed::seed_demo_equipment(&store)
    } else {
        0
    };
    metrics.set_equipment_registered(equipment_count as i64);
    logger.log_startup(SERVER_VERSION, equipment_count);

    let engine = PredictionEngine::with_options(EngineOptions {
        simulate_if_missing: config.simulate_if_missing,
    });
    let orchestrator = Arc::new(PredictionOrchestrator::new(
        engine,
        store.clone(),
        logger.clone(),
    ));
    let tool_router = Arc::new(ToolRouter::new(orchestrator));

    let app_state = Arc::new(api::AppState {
        store,
        tool_router,
        health_registry: health_registry.clone(),
        metrics,
        history_limit: config.history_limit,
    });

    health_registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    api_handle.abort();

    Ok(())
}
