//! Key-driver ranking.
//!
//! Each candidate feature's impact is its input scaling times the
//! meta-weighted sum of both sub-models' coefficients. Candidates are
//! ranked by absolute impact, so a strong negative contributor outranks
//! a weak positive one.

use crate::{
    config::ModelConfig,
    input::ChurnInput,
    scoring::city_tier_factor,
};
use serde::{Deserialize, Serialize};

pub const MAX_KEY_DRIVERS: usize = 3;

pub const COMPLAINTS:     &str = "Customer Complaints";
pub const CASHBACK:       &str = "Cashback Rewards";
pub const TENURE:         &str = "Customer Tenure";
pub const SATISFACTION:   &str = "Satisfaction Score";
pub const CITY_TIER:      &str = "City Tier";
pub const MOBILE:         &str = "Mobile Purchase Activity";
pub const TECH_PURCHASES: &str = "Tech Product Purchases";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverImpact {
    pub factor: String,
    pub impact: f64,
}

/// Every candidate driver for `input`, strongest first.
/// Ties keep candidate insertion order.
pub fn rank_drivers(input: &ChurnInput, config: &ModelConfig) -> Vec<DriverImpact> {
    let rf = &config.random_forest;
    let xgb = &config.xgboost;
    let m = &config.meta;
    let combined = |rf_w: f64, xgb_w: f64| rf_w * m.random_forest + xgb_w * m.xgboost;

    let mut drivers = Vec::with_capacity(7);
    let mut push = |factor: &str, impact: f64| {
        drivers.push(DriverImpact { factor: factor.to_string(), impact });
    };

    if input.complaints > 0 {
        push(COMPLAINTS, combined(rf.complaints, xgb.complaints));
    }

    push(
        CASHBACK,
        (input.cashback_amount / 1000.0) * combined(rf.cashback_amount, xgb.cashback_amount),
    );
    push(
        TENURE,
        (input.tenure as f64 / 80.0) * combined(rf.tenure, xgb.tenure),
    );
    push(
        SATISFACTION,
        (input.satisfaction_score as f64 / 15.0)
            * combined(rf.satisfaction_score, xgb.satisfaction_score),
    );

    if input.city_tier != 1 {
        push(
            CITY_TIER,
            city_tier_factor(input.city_tier) * combined(rf.city_tier, xgb.city_tier),
        );
    }

    if input.purchased_mobile {
        push(MOBILE, combined(rf.mobile, xgb.mobile));
    }

    if input.purchased_laptop_accessory {
        push(TECH_PURCHASES, combined(rf.laptop_accessory, xgb.laptop_accessory));
    }

    // sort_by is stable; NaN impacts compare equal and keep their slot.
    drivers.sort_by(|a, b| {
        b.impact.abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    drivers
}

/// The labels of the top `MAX_KEY_DRIVERS` candidates.
pub fn key_drivers(input: &ChurnInput, config: &ModelConfig) -> Vec<String> {
    rank_drivers(input, config)
        .into_iter()
        .take(MAX_KEY_DRIVERS)
        .map(|d| d.factor)
        .collect()
}
