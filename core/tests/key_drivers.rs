//! Key-driver ranking: candidate gating, absolute-impact ordering, ties.

use churn_core::{
    config::ModelConfig,
    drivers::{self, rank_drivers, key_drivers, MAX_KEY_DRIVERS},
    input::ChurnInput,
    synthetic,
};

fn long_standing_buyer() -> ChurnInput {
    ChurnInput {
        tenure: 120,
        complaints: 0,
        cashback_amount: 1000.0,
        satisfaction_score: 10,
        purchased_laptop_accessory: true,
        purchased_grocery: true,
        purchased_other_products: true,
        purchased_mobile: true,
        city_tier: 1,
    }
}

#[test]
fn gated_candidates_follow_their_conditions() {
    let config = ModelConfig::reference();

    // Tier 1, no complaints, no mobile/tech purchases → only the three
    // unconditional candidates.
    let plain = ChurnInput {
        purchased_laptop_accessory: false,
        purchased_mobile: false,
        ..long_standing_buyer()
    };
    let factors: Vec<String> = rank_drivers(&plain, &config).into_iter().map(|d| d.factor).collect();
    assert_eq!(factors.len(), 3);
    for f in [drivers::CASHBACK, drivers::TENURE, drivers::SATISFACTION] {
        assert!(factors.iter().any(|x| x == f), "missing {f}");
    }

    let everything = ChurnInput { complaints: 3, city_tier: 2, ..long_standing_buyer() };
    assert_eq!(rank_drivers(&everything, &config).len(), 7);
}

#[test]
fn long_standing_buyer_ranking() {
    let config = ModelConfig::reference();
    assert_eq!(
        key_drivers(&long_standing_buyer(), &config),
        vec![drivers::TENURE, drivers::TECH_PURCHASES, drivers::MOBILE],
    );
}

/// Impacts use the same scaling as the Random-Forest sub-model, multiplied
/// by the meta-weighted coefficient sum.
#[test]
fn tenure_impact_matches_combined_weight() {
    let config = ModelConfig::reference();
    let input = long_standing_buyer();

    let tenure = rank_drivers(&input, &config)
        .into_iter()
        .find(|d| d.factor == drivers::TENURE)
        .unwrap();
    let combined = config.random_forest.tenure * config.meta.random_forest
        + config.xgboost.tenure * config.meta.xgboost;
    assert!((tenure.impact - 1.5 * combined).abs() < 1e-9, "impact={}", tenure.impact);
}

/// A strong negative contributor outranks weaker positive ones.
#[test]
fn ranking_ignores_sign() {
    let mut config = ModelConfig::reference();
    config.xgboost.cashback_amount = -50.0;

    let input = ChurnInput { cashback_amount: 500.0, ..ChurnInput::form_default() };
    let ranked = rank_drivers(&input, &config);

    assert_eq!(ranked[0].factor, drivers::CASHBACK);
    assert!(ranked[0].impact < 0.0);
    assert_eq!(ranked[1].factor, drivers::COMPLAINTS);
}

/// Equal impacts keep candidate insertion order.
#[test]
fn ties_keep_insertion_order() {
    let config = ModelConfig::reference();
    let input = ChurnInput {
        tenure: 0,
        complaints: 0,
        cashback_amount: 0.0,
        satisfaction_score: 0,
        purchased_laptop_accessory: false,
        purchased_grocery: false,
        purchased_other_products: false,
        purchased_mobile: false,
        city_tier: 1,
    };

    assert_eq!(
        key_drivers(&input, &config),
        vec![drivers::CASHBACK, drivers::TENURE, drivers::SATISFACTION],
    );
}

#[test]
fn key_drivers_are_short_distinct_and_sorted() {
    let config = ModelConfig::reference();
    for c in synthetic::generate_customers(31337, 500, &config.bounds) {
        let ranked = rank_drivers(&c.input, &config);
        let top = key_drivers(&c.input, &config);

        assert!(!top.is_empty());
        assert!(top.len() <= MAX_KEY_DRIVERS);

        let mut seen = top.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), top.len(), "duplicate driver in {top:?}");

        for pair in ranked.windows(2) {
            assert!(pair[0].impact.abs() >= pair[1].impact.abs(),
                "not sorted for {}: {:?}", c.customer_id, ranked);
        }
    }
}
