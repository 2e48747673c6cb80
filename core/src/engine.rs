//! The churn engine — orchestration around the pure scoring pipeline.
//!
//! RULES:
//!   - Scoring never touches shared mutable state. Each call builds its
//!     own result from an immutable input and the shared config.
//!   - The only shared counters are advisory: `in_flight` feeds a busy
//!     indicator and `calls` numbers log lines. Neither serializes calls.
//!   - Simulated latency is a strategy injected at construction:
//!     `NoLatency` by default, `FixedLatency` for interactive callers.

use crate::{
    config::ModelConfig,
    error::EngineResult,
    input::ChurnInput,
    portfolio::PortfolioSummary,
    prediction::{self, ChurnResult, ScoreBreakdown},
};
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

// ── Latency strategies ─────────────────────────────────────────────

/// Delay applied before a prediction is computed.
/// Implementations block the calling thread; the wait cannot be cancelled.
pub trait Latency: Send + Sync {
    fn wait(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl Latency for NoLatency {
    fn wait(&self) {}
}

#[derive(Debug, Clone, Copy)]
pub struct FixedLatency(pub Duration);

impl FixedLatency {
    /// Delay the prediction form was tuned around.
    pub const INTERACTIVE: Duration = Duration::from_millis(1500);

    pub fn interactive() -> Self {
        Self(Self::INTERACTIVE)
    }
}

impl Latency for FixedLatency {
    fn wait(&self) {
        std::thread::sleep(self.0);
    }
}

// ── In-flight tracking ─────────────────────────────────────────────

/// Holds one slot in the in-flight counter until dropped, so early
/// returns and panics release it too.
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

// ── Engine ─────────────────────────────────────────────────────────

/// Cloning is cheap; clones share the config and the in-flight counter.
#[derive(Clone)]
pub struct ChurnEngine {
    config:          Arc<ModelConfig>,
    latency:         Arc<dyn Latency>,
    in_flight:       Arc<AtomicUsize>,
    calls:           Arc<AtomicU64>,
    validate_inputs: bool,
}

impl ChurnEngine {
    pub fn new(config: Arc<ModelConfig>) -> Self {
        Self {
            config,
            latency:         Arc::new(NoLatency),
            in_flight:       Arc::new(AtomicUsize::new(0)),
            calls:           Arc::new(AtomicU64::new(0)),
            validate_inputs: true,
        }
    }

    /// Engine over the reference constants with no latency.
    pub fn reference() -> Self {
        Self::new(Arc::new(ModelConfig::reference()))
    }

    pub fn with_latency(mut self, latency: impl Latency + 'static) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    /// Skip boundary validation in `predict`. Finite out-of-range inputs still
    /// produce probabilities in [0,1]; only the raw features go unchecked.
    pub fn without_validation(mut self) -> Self {
        self.validate_inputs = false;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Number of `predict` calls currently in progress across all clones.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Validate, wait out the simulated latency, then score.
    pub fn predict(&self, input: &ChurnInput) -> EngineResult<ChurnResult> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;

        if self.validate_inputs {
            if let Err(e) = input.validate(&self.config.bounds) {
                log::debug!("prediction #{call}: rejected ({e})");
                return Err(e);
            }
        }

        self.latency.wait();

        let result = self.score(input);
        log::debug!(
            "prediction #{call}: p={:.4} risk={} drivers={:?}",
            result.churn_probability,
            result.churn_risk,
            result.key_drivers,
        );
        Ok(result)
    }

    /// The pure pipeline: no latency, no validation, no counters.
    pub fn score(&self, input: &ChurnInput) -> ChurnResult {
        prediction::score(input, &self.config)
    }

    pub fn breakdown(&self, input: &ChurnInput) -> ScoreBreakdown {
        prediction::breakdown(input, &self.config)
    }

    /// Score a batch without latency. Records that fail validation are
    /// skipped and counted rather than failing the whole batch.
    pub fn score_portfolio(&self, inputs: &[ChurnInput]) -> PortfolioSummary {
        let mut results = Vec::with_capacity(inputs.len());
        let mut skipped = 0usize;

        for (i, input) in inputs.iter().enumerate() {
            if self.validate_inputs {
                if let Err(e) = input.validate(&self.config.bounds) {
                    log::warn!("portfolio: skipping record {i}: {e}");
                    skipped += 1;
                    continue;
                }
            }
            results.push(self.score(input));
        }

        let mut summary = PortfolioSummary::from_results(&results);
        summary.skipped = skipped;
        log::debug!(
            "portfolio: scored {} records (skipped {skipped}), high={}",
            summary.total_customers,
            summary.high_risk,
        );
        summary
    }
}

impl std::fmt::Debug for ChurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChurnEngine")
            .field("model_version", &self.config.model_version)
            .field("in_flight", &self.in_flight())
            .field("validate_inputs", &self.validate_inputs)
            .finish()
    }
}
