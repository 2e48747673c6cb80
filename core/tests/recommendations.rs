//! Recommendation ordering, deduplication and truncation.

use churn_core::{
    config::{ModelConfig, RiskThresholds},
    input::ChurnInput,
    prediction,
    recommendations::{self as recs, generate_recommendations, MAX_RECOMMENDATIONS},
    synthetic,
};

fn satisfied_customer() -> ChurnInput {
    ChurnInput {
        tenure: 36,
        complaints: 0,
        cashback_amount: 300.0,
        satisfaction_score: 8,
        purchased_laptop_accessory: false,
        purchased_grocery: true,
        purchased_other_products: false,
        purchased_mobile: true,
        city_tier: 1,
    }
}

#[test]
fn risk_band_message_is_appended_last() {
    let t = RiskThresholds::default();
    let input = ChurnInput { complaints: 1, ..satisfied_customer() };

    assert_eq!(
        generate_recommendations(&input, 0.9, &t),
        vec![recs::ADDRESS_COMPLAINTS, recs::HIGH_RISK_ACTION],
    );
    assert_eq!(
        generate_recommendations(&input, 0.55, &t),
        vec![recs::ADDRESS_COMPLAINTS, recs::MEDIUM_RISK_ACTION],
    );
    assert_eq!(
        generate_recommendations(&input, 0.4, &t),
        vec![recs::ADDRESS_COMPLAINTS, recs::LOW_RISK_ACTION],
    );
}

/// Five feature messages fill the list and push the risk-band message out.
#[test]
fn five_feature_messages_drop_the_risk_band_message() {
    let config = ModelConfig::reference();
    let result = prediction::score(&ChurnInput::form_default(), &config);

    assert_eq!(
        result.recommendations,
        vec![
            recs::ADDRESS_COMPLAINTS.to_string(),
            recs::INCREASE_CASHBACK.to_string(),
            recs::TECH_PROMOTIONS.to_string(),
            recs::GROCERY_OFFERINGS.to_string(),
            "Develop targeted promotions for customers in Tier 2 cities".to_string(),
        ],
    );
    assert!(!result.recommendations.iter().any(|r| r == recs::MEDIUM_RISK_ACTION));
}

#[test]
fn every_trigger_fires_in_fixed_order_then_truncates() {
    let input = ChurnInput {
        tenure: 3,
        complaints: 4,
        cashback_amount: 50.0,
        satisfaction_score: 3,
        purchased_laptop_accessory: false,
        purchased_grocery: false,
        purchased_other_products: false,
        purchased_mobile: false,
        city_tier: 3,
    };

    let all = recs::feature_recommendations(&input);
    assert_eq!(all.len(), 7);
    assert_eq!(all[6], recs::city_tier_promotion(3));

    let out = generate_recommendations(&input, 0.9, &RiskThresholds::default());
    assert_eq!(
        out,
        vec![
            recs::ADDRESS_COMPLAINTS,
            recs::IMPROVE_EXPERIENCE,
            recs::INCREASE_CASHBACK,
            recs::FIRST_YEAR_RETENTION,
            recs::TECH_PROMOTIONS,
        ],
    );
}

#[test]
fn trigger_thresholds_are_strict() {
    let at_targets = ChurnInput {
        satisfaction_score: recs::SATISFACTION_TARGET,
        cashback_amount: recs::CASHBACK_TARGET,
        tenure: recs::FIRST_YEAR_MONTHS,
        ..satisfied_customer()
    };
    assert!(recs::feature_recommendations(&at_targets).is_empty());

    let below = ChurnInput {
        satisfaction_score: recs::SATISFACTION_TARGET - 1,
        cashback_amount: recs::CASHBACK_TARGET - 0.01,
        tenure: recs::FIRST_YEAR_MONTHS - 1,
        ..satisfied_customer()
    };
    assert_eq!(
        recs::feature_recommendations(&below),
        vec![recs::IMPROVE_EXPERIENCE, recs::INCREASE_CASHBACK, recs::FIRST_YEAR_RETENTION],
    );
}

/// Either tech purchase suppresses the tech promotion.
#[test]
fn tech_promotion_needs_neither_laptop_nor_mobile() {
    let mobile_only = satisfied_customer();
    assert!(!recs::feature_recommendations(&mobile_only).iter().any(|r| r == recs::TECH_PROMOTIONS));

    let laptop_only = ChurnInput {
        purchased_laptop_accessory: true,
        purchased_mobile: false,
        ..satisfied_customer()
    };
    assert!(!recs::feature_recommendations(&laptop_only).iter().any(|r| r == recs::TECH_PROMOTIONS));

    let neither = ChurnInput { purchased_mobile: false, ..satisfied_customer() };
    assert_eq!(recs::feature_recommendations(&neither), vec![recs::TECH_PROMOTIONS]);
}

#[test]
fn recommendations_are_bounded_distinct_and_non_empty() {
    let config = ModelConfig::reference();
    for c in synthetic::generate_customers(5150, 500, &config.bounds) {
        let result = prediction::score(&c.input, &config);
        let r = &result.recommendations;

        assert!(!r.is_empty());
        assert!(r.len() <= MAX_RECOMMENDATIONS);

        let mut seen = r.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), r.len(), "duplicates in {r:?}");
    }
}
