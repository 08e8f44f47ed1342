//! Error types for the estimator

use crate::schema::Attribute;
use std::path::PathBuf;
use thiserror::Error;

/// A raw choice rejected at the input boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{attribute} must be a whole number, got {raw:?}")]
    NotANumber { attribute: &'static str, raw: String },

    #[error("{attribute} must be between {min} and {max}, got {value}")]
    OutOfRange {
        attribute: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    #[error("{attribute} must be one of [{options}], got {raw:?}")]
    NotAnOption {
        attribute: &'static str,
        options: String,
        raw: String,
    },
}

/// Feature record construction failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing value for {}", .0.name())]
    MissingAttribute(Attribute),

    #[error("Value for {} has the wrong kind", .0.name())]
    WrongKind(Attribute),
}

/// Any failure raised while the model computes an estimate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InferenceFailure {
    message: String,
}

impl InferenceFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<anyhow::Error> for InferenceFailure {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{:#}", err))
    }
}

/// Model artifact load failures, fatal at startup
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Checksum mismatch for {path:?}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to compile model: {0:#}")]
    Compile(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_failure_keeps_message() {
        let err = InferenceFailure::new("shape mismatch");
        assert_eq!(err.to_string(), "shape mismatch");
        assert_eq!(err.message(), "shape mismatch");
    }

    #[test]
    fn test_inference_failure_from_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("shape mismatch").context("Model run failed");
        let failure = InferenceFailure::from(err);
        assert_eq!(failure.message(), "Model run failed: shape mismatch");
    }

    #[test]
    fn test_record_error_names_attribute() {
        let err = RecordError::MissingAttribute(Attribute::Parking);
        assert_eq!(err.to_string(), "Missing value for parking");
    }
}
