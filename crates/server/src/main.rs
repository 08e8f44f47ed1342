//! HomeValueIQ server - house price estimator
//!
//! Loads the price model once at startup and serves the estimator page,
//! the JSON API, health checks and metrics. A model that fails to load
//! or does not match the feature schema stops the process.

use anyhow::{Context, Result};
use estimator_lib::{
    health::{components, HealthRegistry},
    observability::{EstimatorMetrics, StructuredLogger},
    ModelArtifact,
};
use homevalue_server::{api, config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting homevalue-server");

    let config = config::ServerConfig::load()?;
    info!(instance = %config.instance_name, model_dir = %config.model_dir.display(), "Server configured");

    let health_registry = HealthRegistry::new();
    health_registry.register(components::API).await;

    let metrics = EstimatorMetrics::new();
    let logger = StructuredLogger::new(&config.instance_name);

    // The model is loaded exactly once; without it there is nothing to serve
    let artifact = ModelArtifact::load(&config.model_dir)
        .with_context(|| format!("Failed to load model from {}", config.model_dir.display()))?;
    let model_version = artifact.manifest.version.clone();

    metrics.set_model_version(&model_version, artifact.predictor.format());
    logger.log_model_loaded(
        &artifact.manifest.name,
        &model_version,
        artifact.predictor.format(),
        &artifact.path.display().to_string(),
    );
    health_registry.set_model_loaded(&model_version).await;
    logger.log_startup(SERVER_VERSION, &model_version);

    let app_state = Arc::new(api::AppState::new(
        health_registry,
        metrics,
        logger.clone(),
        artifact.predictor,
    ));

    api::serve(config.api_port, app_state, async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await?;

    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}
