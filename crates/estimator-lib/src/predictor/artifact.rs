//! Model artifact loading and schema validation
//!
//! An artifact is a directory holding `manifest.json` and, for ONNX
//! models, the graph file it names. The manifest declares the feature
//! order the model was trained against; it is checked against
//! [`FEATURE_SCHEMA`](crate::schema::FEATURE_SCHEMA) before the model is
//! accepted, so a reordered model fails at startup instead of pricing
//! houses wrongly.

use super::inference::{LinearPredictor, OnnxPredictor};
use super::Predictor;
use crate::error::ArtifactError;
use crate::schema::{feature_names, NUM_FEATURES, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Manifest file name inside an artifact directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Model artifact manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub name: String,
    pub version: String,
    pub schema_version: String,
    pub feature_order: Vec<String>,
    pub model: ModelSpec,
}

/// How the model itself is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ModelSpec {
    /// ONNX graph next to the manifest, verified by SHA256
    Onnx { file: String, sha256: String },
    /// Linear weights in schema order
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl ModelManifest {
    /// Check the manifest was built against this schema
    pub fn validate_schema(&self) -> Result<(), ArtifactError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ArtifactError::SchemaMismatch(format!(
                "schema version {} is not {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        let expected = feature_names();
        if self.feature_order.len() != expected.len() {
            return Err(ArtifactError::SchemaMismatch(format!(
                "model declares {} features, expected {}",
                self.feature_order.len(),
                expected.len()
            )));
        }

        if let Some((i, (declared, wanted))) = self
            .feature_order
            .iter()
            .zip(expected.iter())
            .enumerate()
            .find(|(_, (declared, wanted))| declared.as_str() != **wanted)
        {
            return Err(ArtifactError::SchemaMismatch(format!(
                "feature {} is {:?}, expected {:?}",
                i, declared, wanted
            )));
        }

        Ok(())
    }
}

/// A loaded, validated model
pub struct ModelArtifact {
    pub manifest: ModelManifest,
    pub path: PathBuf,
    pub predictor: Arc<dyn Predictor>,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("manifest", &self.manifest)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ModelArtifact {
    /// Load the artifact in `dir`
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let raw = read(&manifest_path)?;
        let manifest: ModelManifest =
            serde_json::from_slice(&raw).map_err(|source| ArtifactError::Manifest {
                path: manifest_path.clone(),
                source,
            })?;

        manifest.validate_schema()?;

        let predictor: Arc<dyn Predictor> = match &manifest.model {
            ModelSpec::Onnx { file, sha256 } => {
                let model_path = dir.join(file);
                let weights = read(&model_path)?;

                let checksum = compute_checksum(&weights);
                if !checksum.eq_ignore_ascii_case(sha256) {
                    return Err(ArtifactError::ChecksumMismatch {
                        path: model_path,
                        expected: sha256.clone(),
                        actual: checksum,
                    });
                }
                debug!(path = %model_path.display(), size_bytes = weights.len(), "Model checksum verified");

                Arc::new(
                    OnnxPredictor::new(&weights, manifest.version.clone())
                        .map_err(ArtifactError::Compile)?,
                )
            }
            ModelSpec::Linear {
                intercept,
                coefficients,
            } => {
                let coefficients: [f64; NUM_FEATURES] =
                    coefficients.as_slice().try_into().map_err(|_| {
                        ArtifactError::SchemaMismatch(format!(
                            "linear model has {} coefficients, expected {}",
                            coefficients.len(),
                            NUM_FEATURES
                        ))
                    })?;
                Arc::new(LinearPredictor::new(
                    *intercept,
                    coefficients,
                    manifest.version.clone(),
                ))
            }
        };

        info!(
            name = %manifest.name,
            version = %manifest.version,
            format = predictor.format(),
            path = %dir.display(),
            "Loaded model artifact"
        );

        Ok(Self {
            manifest,
            path: dir.to_path_buf(),
            predictor,
        })
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
