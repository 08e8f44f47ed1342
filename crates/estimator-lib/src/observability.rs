//! Observability infrastructure for the estimator
//!
//! Provides:
//! - Prometheus metrics (prediction latency, estimate/failure counters, model version)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram,
    IntCounter,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EstimatorMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct EstimatorMetricsInner {
    prediction_latency_seconds: Histogram,
    estimates_generated: IntCounter,
    inference_failures: IntCounter,
    rejected_selections: IntCounter,
    model_version_info: GaugeVec,
}

impl EstimatorMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "house_estimator_prediction_latency_seconds",
                "Time spent running the price model for one estimate",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            estimates_generated: register_int_counter!(
                "house_estimator_estimates_generated_total",
                "Total number of price estimates presented"
            )
            .expect("Failed to register estimates_generated"),

            inference_failures: register_int_counter!(
                "house_estimator_inference_failures_total",
                "Total number of failed model calls"
            )
            .expect("Failed to register inference_failures"),

            rejected_selections: register_int_counter!(
                "house_estimator_rejected_selections_total",
                "Total number of form submissions rejected before inference"
            )
            .expect("Failed to register rejected_selections"),

            model_version_info: register_gauge_vec!(
                "house_estimator_model_version_info",
                "Information about the currently loaded price model",
                &["version", "format"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Estimator metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct EstimatorMetrics {
    _private: (),
}

impl Default for EstimatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EstimatorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a prediction latency observation
    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_estimates_generated(&self) {
        self.inner().estimates_generated.inc();
    }

    pub fn inc_inference_failures(&self) {
        self.inner().inference_failures.inc();
    }

    pub fn inc_rejected_selections(&self) {
        self.inner().rejected_selections.inc();
    }

    /// Update model version info
    pub fn set_model_version(&self, version: &str, format: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version, format])
            .set(1.0);
    }

    pub fn estimates_generated(&self) -> u64 {
        self.inner().estimates_generated.get()
    }

    pub fn inference_failures(&self) -> u64 {
        self.inner().inference_failures.get()
    }
}

/// Structured logger for estimator events
///
/// Provides consistent JSON-formatted logging for estimates, failures
/// and lifecycle events.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log server startup
    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "server_started",
            instance = %self.instance,
            server_version = %version,
            model_version = %model_version,
            "House price estimator started"
        );
    }

    /// Log server shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_shutdown",
            instance = %self.instance,
            reason = %reason,
            "House price estimator shutting down"
        );
    }

    pub fn log_model_loaded(&self, name: &str, version: &str, format: &str, path: &str) {
        info!(
            event = "model_loaded",
            instance = %self.instance,
            model_name = %name,
            model_version = %version,
            model_format = %format,
            path = %path,
            "Price model loaded"
        );
    }

    /// Log a presented estimate
    pub fn log_estimate(&self, price: f64, formatted: &str, model_version: &str) {
        info!(
            event = "estimate_generated",
            instance = %self.instance,
            price = price,
            formatted = %formatted,
            model_version = %model_version,
            "Generated price estimate"
        );
    }

    pub fn log_inference_failure(&self, message: &str, model_version: &str) {
        warn!(
            event = "inference_failed",
            instance = %self.instance,
            message = %message,
            model_version = %model_version,
            "Price model call failed"
        );
    }

    /// Log a form submission rejected by the collector
    pub fn log_rejected_selection(&self, reason: &str) {
        info!(
            event = "selection_rejected",
            instance = %self.instance,
            reason = %reason,
            "Rejected out-of-domain selection"
        );
    }

    /// Log selections that could not be assembled into a feature record
    pub fn log_incomplete_record(&self, reason: &str) {
        error!(
            event = "record_incomplete",
            instance = %self.instance,
            reason = %reason,
            "Feature record could not be built"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_metrics_creation() {
        let metrics = EstimatorMetrics::new();

        metrics.observe_prediction_latency(0.002);
        metrics.set_model_version("1.0.0", "linear");
        metrics.inc_rejected_selections();

        let before = metrics.estimates_generated();
        metrics.inc_estimates_generated();
        assert!(metrics.estimates_generated() > before);
    }

    #[test]
    fn test_handles_share_counters() {
        let a = EstimatorMetrics::new();
        let b = a.clone();
        let before = b.inference_failures();
        a.inc_inference_failures();
        assert!(b.inference_failures() > before);
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-instance");
        assert_eq!(logger.instance, "test-instance");
    }
}
