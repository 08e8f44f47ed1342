//! ONNX Runtime inference using tract
//!
//! Provides the model gateways behind [`Predictor`]: an ONNX regression
//! graph run through tract-onnx, and a linear model whose weights live in
//! the artifact manifest.

use super::{ensure_finite, Predictor};
use crate::error::InferenceFailure;
use crate::models::FeatureRecord;
use crate::schema::NUM_FEATURES;
use anyhow::{Context, Result};
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Maximum inference latency before warning
pub const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX-based predictor using tract for lightweight inference
pub struct OnnxPredictor {
    model: TractModel,
    model_version: String,
}

impl OnnxPredictor {
    /// Create a new predictor from model bytes
    pub fn new(model_bytes: &[u8], model_version: impl Into<String>) -> Result<Self> {
        let model = Self::load_model(model_bytes)?;
        Ok(Self {
            model,
            model_version: model_version.into(),
        })
    }

    /// Load and optimize an ONNX model from bytes
    fn load_model(model_bytes: &[u8]) -> Result<TractModel> {
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .context("Failed to parse ONNX model")?
            .with_input_fact(0, f32::fact([1, NUM_FEATURES]).into())
            .context("Failed to set input shape")?
            .into_optimized()
            .context("Failed to optimize model")?
            .into_runnable()
            .context("Failed to create runnable model")?;
        Ok(model)
    }

    /// Convert a feature record to the `[1, 12]` input tensor
    fn record_to_tensor(record: &FeatureRecord) -> Result<Tensor> {
        let data = record.to_features().to_vec();
        let array = tract_ndarray::Array2::from_shape_vec((1, NUM_FEATURES), data)
            .context("Failed to shape feature tensor")?;
        Ok(array.into())
    }

    /// Take the scalar estimate out of the first output tensor
    fn tensor_to_price(output: &Tensor) -> Result<f64> {
        let values = output.cast_to::<f32>()?;
        let view = values.to_array_view::<f32>()?;
        let price = view.iter().next().copied().context("Model output is empty")?;
        Ok(price as f64)
    }

    fn run(&self, record: &FeatureRecord) -> Result<f64> {
        let input = Self::record_to_tensor(record)?;
        let result = self.model.run(tvec!(input.into()))?;
        let output = result.first().context("No output from model")?;
        Self::tensor_to_price(output)
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, InferenceFailure> {
        let start = Instant::now();
        let price = self.run(record)?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(elapsed_ms = elapsed.as_millis(), "Inference exceeded {}ms target", MAX_INFERENCE_MS);
        } else {
            debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
        }

        ensure_finite(price)
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn format(&self) -> &'static str {
        "onnx"
    }
}

/// Linear regression over the schema-ordered numeric encoding
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    intercept: f64,
    coefficients: [f64; NUM_FEATURES],
    model_version: String,
}

impl LinearPredictor {
    pub fn new(
        intercept: f64,
        coefficients: [f64; NUM_FEATURES],
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            intercept,
            coefficients,
            model_version: model_version.into(),
        }
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, InferenceFailure> {
        let price = record
            .to_features()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + *x as f64 * w);
        ensure_finite(price)
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn format(&self) -> &'static str {
        "linear"
    }
}
