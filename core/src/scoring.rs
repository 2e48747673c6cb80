//! Stacked churn model — two sub-models fused by a logistic meta-model.
//!
//! Pipeline:
//!   1. Random-Forest-style linear score, clamped to [0,1]
//!   2. XGBoost-style score squashed through a sigmoid
//!   3. Meta-model: sigmoid((rf_coef * p_rf + xgb_coef * p_xgb) / 10)
//!   4. Threshold partition into low / medium / high
//!
//! Every function here is pure and total over its input.
//! Complaints enter both sub-models as a binary gate, not a count.

use crate::{
    config::{MetaCoefficients, RiskThresholds, WeightSet},
    input::ChurnInput,
    types::{sigmoid, Probability},
};
use serde::{Deserialize, Serialize};

/// Starting probability of the Random-Forest-style sub-model.
pub const RANDOM_FOREST_BASE: f64 = 0.3;

/// Scale applied to the complaint weight when any complaint is present.
pub const COMPLAINT_GATE_SCALE: f64 = 0.8;

/// Divisor the meta-model logit is calibrated against.
pub const META_LOGIT_DIVISOR: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `p > high` → High, `p > medium` → Medium, otherwise Low.
    pub fn classify(p: Probability, thresholds: &RiskThresholds) -> Self {
        if p > thresholds.high {
            RiskLevel::High
        } else if p > thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low    => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High   => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Term that grows as the city tier gets more developed: tier 1 → 2/3,
/// tier 3 → 0. The sign is kept exactly as the model was calibrated.
pub(crate) fn city_tier_factor(city_tier: u8) -> f64 {
    (3.0 - city_tier as f64) / 3.0
}

fn gated(flag: bool, value: f64) -> f64 {
    if flag { value } else { 0.0 }
}

// ── Sub-model A ────────────────────────────────────────────────────

/// Random-Forest-style score before clamping. Exposed so callers can
/// inspect how far outside [0,1] an extreme customer lands.
pub fn random_forest_raw(input: &ChurnInput, w: &WeightSet) -> f64 {
    let mut p = RANDOM_FOREST_BASE;

    p += gated(input.complaints > 0, w.complaints * COMPLAINT_GATE_SCALE);
    p -= (input.cashback_amount / 1000.0) * w.cashback_amount;
    p -= (input.tenure as f64 / 80.0) * w.tenure;
    p -= (input.satisfaction_score as f64 / 15.0) * w.satisfaction_score;
    p -= gated(input.purchased_mobile, w.mobile);
    p -= gated(input.purchased_laptop_accessory, w.laptop_accessory);
    p += city_tier_factor(input.city_tier) * w.city_tier;
    p -= gated(input.purchased_grocery, w.grocery);
    p -= gated(input.purchased_other_products, w.other_products);

    p
}

pub fn random_forest_probability(input: &ChurnInput, w: &WeightSet) -> Probability {
    random_forest_raw(input, w).clamp(0.0, 1.0)
}

// ── Sub-model B ────────────────────────────────────────────────────

/// XGBoost-style raw score (the logit fed to the sigmoid).
pub fn xgboost_score(input: &ChurnInput, w: &WeightSet) -> f64 {
    let mut score = 0.0;

    score += gated(input.complaints > 0, w.complaints / 10.0);
    score -= (input.cashback_amount / 1500.0) * w.cashback_amount / 10.0;
    score -= (input.tenure as f64 / 100.0) * w.tenure / 10.0;
    score -= (input.satisfaction_score as f64 / 15.0) * w.satisfaction_score / 10.0;
    score -= gated(input.purchased_mobile, w.mobile / 15.0);
    score -= gated(input.purchased_laptop_accessory, w.laptop_accessory / 15.0);
    score += city_tier_factor(input.city_tier) * w.city_tier / 15.0;
    score -= gated(input.purchased_grocery, w.grocery / 15.0);
    score -= gated(input.purchased_other_products, w.other_products / 15.0);

    score
}

pub fn xgboost_probability(input: &ChurnInput, w: &WeightSet) -> Probability {
    sigmoid(xgboost_score(input, w)).clamp(0.0, 1.0)
}

// ── Meta-model ─────────────────────────────────────────────────────

pub fn meta_logit(rf: Probability, xgb: Probability, m: &MetaCoefficients) -> f64 {
    (m.random_forest * rf + m.xgboost * xgb) / META_LOGIT_DIVISOR
}

pub fn meta_probability(rf: Probability, xgb: Probability, m: &MetaCoefficients) -> Probability {
    sigmoid(meta_logit(rf, xgb, m)).clamp(0.0, 1.0)
}
