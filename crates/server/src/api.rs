//! HTTP surface: estimator page, JSON API, health checks and Prometheus metrics

use crate::page::{render_page, ResultRegion};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    routing::post,
    Form, Json, Router,
};
use estimator_lib::{
    advisory::{AdvisoryPanel, FaqQuestion, Mood},
    collector::describe_controls,
    health::{ComponentStatus, HealthRegistry},
    observability::{EstimatorMetrics, StructuredLogger},
    schema::SCHEMA_VERSION,
    EstimationCycle, InputCollector, Predictor, Presentation, RecordError, SelectionError,
};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Why a submission produced no presentation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// A submitted value is outside its control's domain
    #[error(transparent)]
    Rejected(#[from] SelectionError),

    /// The selections could not be assembled into a feature record
    #[error(transparent)]
    Incomplete(#[from] RecordError),
}

impl EstimateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EstimateError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EstimateError::Incomplete(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn status(&self) -> &'static str {
        match self {
            EstimateError::Rejected(_) => "rejected",
            EstimateError::Incomplete(_) => "error",
        }
    }
}

impl IntoResponse for EstimateError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({ "status": self.status(), "message": self.to_string() })),
        )
            .into_response()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: EstimatorMetrics,
    pub logger: StructuredLogger,
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: EstimatorMetrics,
        logger: StructuredLogger,
        predictor: Arc<dyn Predictor>,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            logger,
            predictor,
        }
    }

    /// Run one estimation cycle over submitted field/value pairs
    ///
    /// Pairs are applied on top of the collector defaults. A rejected pair
    /// or an incomplete record stops the cycle before the model is called.
    fn estimate<I>(&self, pairs: I) -> Result<Presentation, EstimateError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut collector = InputCollector::new();
        if let Err(err) = collector.apply_form(pairs) {
            self.metrics.inc_rejected_selections();
            self.logger.log_rejected_selection(&err.to_string());
            return Err(err.into());
        }
        self.estimate_collected(&collector)
    }

    /// Run one estimation cycle over already collected selections
    fn estimate_collected(
        &self,
        collector: &InputCollector,
    ) -> Result<Presentation, EstimateError> {
        let mut cycle =
            EstimationCycle::new(self.predictor.clone()).with_metrics(self.metrics.clone());
        let presentation = cycle.run(collector).map_err(|err| {
            self.logger.log_incomplete_record(&err.to_string());
            EstimateError::from(err)
        })?;

        match &presentation {
            Presentation::Estimate(estimate) => self.logger.log_estimate(
                estimate.price,
                &estimate.formatted,
                &estimate.model_version,
            ),
            Presentation::Failed { message } => self
                .logger
                .log_inference_failure(message, self.predictor.model_version()),
        }

        Ok(presentation)
    }
}

/// Sidebar selections carried alongside the form
#[derive(Debug, Default, Deserialize)]
pub struct SidebarQuery {
    pub mood: Option<String>,
    pub question: Option<String>,
}

impl SidebarQuery {
    fn panel(&self) -> AdvisoryPanel {
        let mood = self
            .mood
            .as_deref()
            .and_then(|m| m.parse::<Mood>().ok())
            .unwrap_or_default();
        let question = self
            .question
            .as_deref()
            .and_then(|q| q.parse::<FaqQuestion>().ok())
            .unwrap_or_default();
        AdvisoryPanel::render(mood, question)
    }
}

/// Estimator page with default selections
async fn index(Query(sidebar): Query<SidebarQuery>) -> Html<String> {
    Html(render_page(
        &InputCollector::new(),
        &sidebar.panel(),
        ResultRegion::Empty,
    ))
}

/// Form submission from the estimator page
async fn submit(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut sidebar = SidebarQuery::default();
    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        match name.as_str() {
            "mood" => sidebar.mood = Some(value),
            "question" => sidebar.question = Some(value),
            _ => pairs.push((name, value)),
        }
    }
    let panel = sidebar.panel();

    // Re-render the form with what was submitted; rejected values keep
    // their default and are reported by the estimate below
    let mut shown = InputCollector::new();
    for (name, value) in &pairs {
        shown.select_named(name, value).ok();
    }

    match state.estimate(pairs) {
        Ok(presentation) => Html(render_page(
            &shown,
            &panel,
            ResultRegion::Shown(&presentation),
        ))
        .into_response(),
        Err(err) => (
            err.status_code(),
            Html(render_page(
                &shown,
                &panel,
                ResultRegion::Rejected(&err.to_string()),
            )),
        )
            .into_response(),
    }
}

/// JSON estimate: attribute name to raw value, missing attributes take defaults
async fn estimate_json(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Response {
    let mut pairs = Vec::with_capacity(body.len());
    for (name, value) in body {
        let raw = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => json_number(&n),
            other => {
                state.metrics.inc_rejected_selections();
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "status": "rejected",
                        "message": format!("{} must be a string or number, got {}", name, other),
                    })),
                )
                    .into_response();
            }
        };
        pairs.push((name, raw));
    }

    match state.estimate(pairs) {
        Ok(presentation) => Json(presentation).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Raw text for a JSON number; integral floats such as `2500.0` read as integers
fn json_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Ordered schema with control domains and defaults
async fn schema(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "schema_version": SCHEMA_VERSION,
        "model_version": state.predictor.model_version(),
        "attributes": describe_controls(),
    }))
}

/// Health check response - returns 200 if healthy, 503 if degraded/unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
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
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
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
        .route("/", get(index).post(submit))
        .route("/api/v1/estimate", post(estimate_json))
        .route("/api/v1/schema", get(schema))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server, stopping when `shutdown` resolves
pub async fn serve<F>(port: u16, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
