//! Shared primitive types used across the scoring engine.

/// A probability. Every value the engine reports lies in [0.0, 1.0].
pub type Probability = f64;

/// A stable identifier for a customer record (synthetic or caller-supplied).
pub type CustomerId = String;

/// Logistic squashing used by the XGBoost-style sub-model and the meta-model.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
