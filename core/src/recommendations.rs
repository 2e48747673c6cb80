//! Retention recommendations.
//!
//! Feature-triggered messages come first, in a fixed order, followed by
//! exactly one risk-band message. The list is then deduplicated and cut
//! to `MAX_RECOMMENDATIONS`, so five feature messages push the risk-band
//! message out.

use crate::{
    config::RiskThresholds,
    input::ChurnInput,
    scoring::RiskLevel,
    types::Probability,
};

pub const MAX_RECOMMENDATIONS: usize = 5;

pub const ADDRESS_COMPLAINTS: &str =
    "Address customer complaints promptly to improve satisfaction";
pub const IMPROVE_EXPERIENCE: &str =
    "Implement customer experience improvement initiatives";
pub const INCREASE_CASHBACK: &str =
    "Consider increasing cashback rewards for this customer";
pub const FIRST_YEAR_RETENTION: &str =
    "Create special retention offers for new customers in their first year";
pub const TECH_PROMOTIONS: &str =
    "Offer personalized tech product promotions";
pub const GROCERY_OFFERINGS: &str =
    "Introduce grocery product offerings to this customer";

pub const HIGH_RISK_ACTION: &str =
    "Implement immediate retention strategy including personalized outreach";
pub const MEDIUM_RISK_ACTION: &str =
    "Schedule regular check-ins and satisfaction surveys";
pub const LOW_RISK_ACTION: &str =
    "Continue providing excellent service to maintain customer loyalty";

pub const SATISFACTION_TARGET: u8 = 7;
pub const CASHBACK_TARGET: f64 = 200.0;
pub const FIRST_YEAR_MONTHS: u32 = 12;

pub fn city_tier_promotion(city_tier: u8) -> String {
    format!("Develop targeted promotions for customers in Tier {city_tier} cities")
}

pub fn risk_band_message(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High   => HIGH_RISK_ACTION,
        RiskLevel::Medium => MEDIUM_RISK_ACTION,
        RiskLevel::Low    => LOW_RISK_ACTION,
    }
}

/// Messages triggered by individual feature values, before the risk-band
/// message and before truncation.
pub fn feature_recommendations(input: &ChurnInput) -> Vec<String> {
    let mut out = Vec::new();

    if input.complaints > 0 {
        out.push(ADDRESS_COMPLAINTS.to_string());
    }
    if input.satisfaction_score < SATISFACTION_TARGET {
        out.push(IMPROVE_EXPERIENCE.to_string());
    }
    if input.cashback_amount < CASHBACK_TARGET {
        out.push(INCREASE_CASHBACK.to_string());
    }
    if input.tenure < FIRST_YEAR_MONTHS {
        out.push(FIRST_YEAR_RETENTION.to_string());
    }
    if !input.purchased_laptop_accessory && !input.purchased_mobile {
        out.push(TECH_PROMOTIONS.to_string());
    }
    if !input.purchased_grocery {
        out.push(GROCERY_OFFERINGS.to_string());
    }
    if input.city_tier > 1 {
        out.push(city_tier_promotion(input.city_tier));
    }

    out
}

pub fn generate_recommendations(
    input: &ChurnInput,
    probability: Probability,
    thresholds: &RiskThresholds,
) -> Vec<String> {
    let mut all = feature_recommendations(input);
    all.push(risk_band_message(RiskLevel::classify(probability, thresholds)).to_string());

    let mut unique: Vec<String> = Vec::with_capacity(MAX_RECOMMENDATIONS);
    for rec in all {
        if unique.len() == MAX_RECOMMENDATIONS {
            break;
        }
        if !unique.contains(&rec) {
            unique.push(rec);
        }
    }
    unique
}
