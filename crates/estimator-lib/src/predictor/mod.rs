//! Price prediction: model artifacts, inference and result presentation

mod artifact;
mod cycle;
#[cfg(test)]
pub(crate) mod fixtures;
mod inference;
mod output;

pub use artifact::{compute_checksum, ModelArtifact, ModelManifest, ModelSpec, MANIFEST_FILE};
pub use cycle::{CycleState, EstimationCycle};
pub use inference::{LinearPredictor, OnnxPredictor, MAX_INFERENCE_MS};
pub use output::{
    format_currency, OutputConfig, OutputFormatter, Presentation, ADVISORY_NOTE,
    CURRENCY_SYMBOL, FOLLOW_UP_NOTE,
};

use crate::error::InferenceFailure;
use crate::models::FeatureRecord;

/// Trait for prediction implementations
///
/// Implementations are loaded once at startup and shared read-only, so
/// `predict` takes `&self` and must be safe to call concurrently.
pub trait Predictor: Send + Sync {
    /// Estimate a price for one feature record
    fn predict(&self, record: &FeatureRecord) -> Result<f64, InferenceFailure>;

    /// Version of the loaded model
    fn model_version(&self) -> &str;

    /// Artifact format, for metrics and logs
    fn format(&self) -> &'static str;
}

/// Reject estimates the presenter cannot format
pub(crate) fn ensure_finite(value: f64) -> Result<f64, InferenceFailure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InferenceFailure::new(format!(
            "Model returned a non-finite estimate ({})",
            value
        )))
    }
}
