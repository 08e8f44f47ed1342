//! Library for the HomeValueIQ house price estimator
//!
//! This crate provides the core functionality for:
//! - The ordered feature schema the price model was trained against
//! - Bounded-choice input collection with defaults
//! - Feature record construction
//! - Model artifact loading and inference
//! - Result presentation and the sidebar advisory content
//! - Health checks and observability

pub mod advisory;
pub mod collector;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod schema;

pub use collector::InputCollector;
pub use error::{ArtifactError, InferenceFailure, RecordError, SelectionError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{EstimatorMetrics, StructuredLogger};
pub use predictor::{EstimationCycle, ModelArtifact, Predictor, Presentation};
pub use schema::{Attribute, Domain, FEATURE_SCHEMA};
