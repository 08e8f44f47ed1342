//! One estimation cycle per user action
//!
//! `Idle -> Building -> Presenting | Failed`. A terminal state goes back to
//! `Idle` when the next action starts; nothing from a previous cycle is
//! carried into the next one.

use super::{OutputFormatter, Predictor, Presentation};
use crate::collector::InputCollector;
use crate::error::RecordError;
use crate::models::PriceEstimate;
use crate::observability::EstimatorMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Where an estimation cycle currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    Idle,
    Building,
    Presenting(PriceEstimate),
    Failed(String),
}

impl CycleState {
    fn name(&self) -> &'static str {
        match self {
            CycleState::Idle => "idle",
            CycleState::Building => "building",
            CycleState::Presenting(_) => "presenting",
            CycleState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleState::Presenting(_) | CycleState::Failed(_))
    }
}

/// Drives collector selections through the model to a presentation
pub struct EstimationCycle {
    predictor: Arc<dyn Predictor>,
    formatter: OutputFormatter,
    metrics: Option<EstimatorMetrics>,
    state: CycleState,
}

impl EstimationCycle {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            formatter: OutputFormatter::new(),
            metrics: None,
            state: CycleState::Idle,
        }
    }

    /// Record latency and outcome counters for every run
    pub fn with_metrics(mut self, metrics: EstimatorMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    fn transition(&mut self, next: CycleState) {
        debug!(from = self.state.name(), to = next.name(), "Estimation cycle transition");
        self.state = next;
    }

    /// Run one user action against the current selections
    ///
    /// Record construction errors are returned before the model is called
    /// and leave the cycle idle. Inference failures are presented, never
    /// propagated.
    pub fn run(&mut self, collector: &InputCollector) -> Result<Presentation, RecordError> {
        if self.state.is_terminal() {
            self.transition(CycleState::Idle);
        }
        self.transition(CycleState::Building);

        let record = match collector.record() {
            Ok(record) => record,
            Err(err) => {
                self.transition(CycleState::Idle);
                return Err(err);
            }
        };

        let start = Instant::now();
        let result = self.predictor.predict(&record);
        let elapsed = start.elapsed();

        if let Some(metrics) = &self.metrics {
            metrics.observe_prediction_latency(elapsed.as_secs_f64());
            match &result {
                Ok(_) => metrics.inc_estimates_generated(),
                Err(_) => metrics.inc_inference_failures(),
            }
        }

        let presentation = self
            .formatter
            .present(result, self.predictor.model_version());

        let next = match &presentation {
            Presentation::Estimate(estimate) => CycleState::Presenting(estimate.clone()),
            Presentation::Failed { message } => CycleState::Failed(message.clone()),
        };
        self.transition(next);

        Ok(presentation)
    }
}
