//! churn-core — customer churn scoring engine.
//!
//! A stacked model: a Random-Forest-style linear score and an
//! XGBoost-style logistic score, fused by a logistic meta-model, then
//! classified into a risk tier with ranked drivers and recommendations.

pub mod config;
pub mod drivers;
pub mod engine;
pub mod error;
pub mod input;
pub mod portfolio;
pub mod prediction;
pub mod recommendations;
pub mod report;
pub mod rng;
pub mod scoring;
pub mod synthetic;
pub mod types;

pub use config::ModelConfig;
pub use engine::{ChurnEngine, FixedLatency, Latency, NoLatency};
pub use error::{EngineError, EngineResult};
pub use input::ChurnInput;
pub use prediction::{ChurnResult, ScoreBreakdown};
pub use scoring::RiskLevel;
