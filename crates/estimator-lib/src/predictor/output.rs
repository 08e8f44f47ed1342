//! Prediction output formatting
//!
//! Turns a raw model estimate into the rupee string shown to the user, or
//! an inference failure into the message shown in its place.

use crate::error::InferenceFailure;
use crate::models::PriceEstimate;
use serde::Serialize;

/// Currency symbol prefixed to every estimate
pub const CURRENCY_SYMBOL: &str = "₹";

/// Note rendered next to every estimate
pub const ADVISORY_NOTE: &str = "Based on your input and our trained ML model.";

/// Follow-up hint rendered under the estimate
pub const FOLLOW_UP_NOTE: &str = "For real-world accuracy, it's always great to check with a local property advisor. Prices can vary slightly!";

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub currency_symbol: String,
    pub note: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            note: ADVISORY_NOTE.to_string(),
        }
    }
}

/// What the result region shows after one estimation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Presentation {
    #[serde(rename = "ok")]
    Estimate(PriceEstimate),
    Failed { message: String },
}

impl Presentation {
    pub fn is_estimate(&self) -> bool {
        matches!(self, Presentation::Estimate(_))
    }
}

/// Formats estimates and failures for display
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    config: OutputConfig,
}

impl OutputFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Format a successful estimate
    pub fn estimate(&self, price: f64, model_version: &str) -> PriceEstimate {
        PriceEstimate {
            price,
            formatted: format_amount(&self.config.currency_symbol, price),
            note: self.config.note.clone(),
            model_version: model_version.to_string(),
        }
    }

    /// User-facing message for a failed inference
    pub fn failure(&self, err: &InferenceFailure) -> String {
        format!("Prediction failed: {}", err)
    }

    pub fn present(
        &self,
        result: Result<f64, InferenceFailure>,
        model_version: &str,
    ) -> Presentation {
        match result {
            Ok(price) => Presentation::Estimate(self.estimate(price, model_version)),
            Err(err) => Presentation::Failed {
                message: self.failure(&err),
            },
        }
    }
}

/// Format an amount as rupees with two decimals and comma grouping
pub fn format_currency(amount: f64) -> String {
    format_amount(CURRENCY_SYMBOL, amount)
}

fn format_amount(symbol: &str, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}.{}", symbol, sign, grouped, fraction)
}
