//! Prediction records and the pure scoring pipeline that builds them.

use crate::{
    config::ModelConfig,
    drivers::{key_drivers, rank_drivers, DriverImpact},
    input::ChurnInput,
    recommendations::generate_recommendations,
    scoring::{self, RiskLevel},
    types::Probability,
};
use serde::{Deserialize, Serialize};

/// What a caller renders: probability, tier, drivers, recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnResult {
    pub churn_probability: Probability,
    pub churn_risk:        RiskLevel,
    pub key_drivers:       Vec<String>,
    pub recommendations:   Vec<String>,
}

/// Intermediate values behind a `ChurnResult`, for tooling and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub random_forest_raw:         f64,
    pub random_forest_probability: Probability,
    pub xgboost_score:             f64,
    pub xgboost_probability:       Probability,
    pub meta_logit:                f64,
    pub churn_probability:         Probability,
    pub churn_risk:                RiskLevel,
    pub driver_impacts:            Vec<DriverImpact>,
}

/// Run the full pipeline. No validation, no delay.
pub fn score(input: &ChurnInput, config: &ModelConfig) -> ChurnResult {
    let rf = scoring::random_forest_probability(input, &config.random_forest);
    let xgb = scoring::xgboost_probability(input, &config.xgboost);
    let churn_probability = scoring::meta_probability(rf, xgb, &config.meta);

    ChurnResult {
        churn_probability,
        churn_risk: RiskLevel::classify(churn_probability, &config.thresholds),
        key_drivers: key_drivers(input, config),
        recommendations: generate_recommendations(input, churn_probability, &config.thresholds),
    }
}

pub fn breakdown(input: &ChurnInput, config: &ModelConfig) -> ScoreBreakdown {
    let random_forest_raw = scoring::random_forest_raw(input, &config.random_forest);
    let random_forest_probability = random_forest_raw.clamp(0.0, 1.0);
    let xgboost_score = scoring::xgboost_score(input, &config.xgboost);
    let xgboost_probability = scoring::xgboost_probability(input, &config.xgboost);
    let meta_logit = scoring::meta_logit(random_forest_probability, xgboost_probability, &config.meta);
    let churn_probability =
        scoring::meta_probability(random_forest_probability, xgboost_probability, &config.meta);

    ScoreBreakdown {
        random_forest_raw,
        random_forest_probability,
        xgboost_score,
        xgboost_probability,
        meta_logit,
        churn_probability,
        churn_risk: RiskLevel::classify(churn_probability, &config.thresholds),
        driver_impacts: rank_drivers(input, config),
    }
}
