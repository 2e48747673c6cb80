//! Synthetic customer generation for demos and property tests.
//! Every generated record lies inside the supplied input bounds.

use crate::{config::InputBounds, input::ChurnInput, rng::ScenarioRng, types::CustomerId};
use serde::{Deserialize, Serialize};

/// Share of customers with at least one complaint on record.
pub const COMPLAINT_RATE: f64 = 0.30;
/// Complaint counts for complainers are drawn from 1..=this (capped by bounds).
pub const MAX_SYNTHETIC_COMPLAINTS: u32 = 5;

pub const LAPTOP_ACCESSORY_RATE: f64 = 0.35;
pub const GROCERY_RATE: f64 = 0.30;
pub const OTHER_PRODUCTS_RATE: f64 = 0.25;
pub const MOBILE_RATE: f64 = 0.40;

/// Tier 1 / 2 / 3 population shares.
pub const CITY_TIER_WEIGHTS: [f64; 3] = [0.60, 0.10, 0.30];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCustomer {
    pub customer_id: CustomerId,
    pub input:       ChurnInput,
}

pub fn generate_customers(seed: u64, count: usize, bounds: &InputBounds) -> Vec<SyntheticCustomer> {
    let mut rng = ScenarioRng::new(seed);
    (0..count)
        .map(|i| SyntheticCustomer {
            customer_id: format!("c-{i:06}"),
            input:       generate_input(&mut rng, bounds),
        })
        .collect()
}

pub fn generate_input(rng: &mut ScenarioRng, bounds: &InputBounds) -> ChurnInput {
    let tenure = rng.range_inclusive(bounds.tenure.0 as u64, bounds.tenure.1 as u64) as u32;

    let (c_lo, c_hi) = bounds.complaints;
    let complaints = if rng.chance(COMPLAINT_RATE) && c_hi >= 1 {
        let lo = c_lo.max(1);
        let hi = c_hi.min(MAX_SYNTHETIC_COMPLAINTS).max(lo);
        rng.range_inclusive(lo as u64, hi as u64) as u32
    } else {
        c_lo
    };

    let (cash_lo, cash_hi) = bounds.cashback_amount;
    let cashback = cash_lo + rng.next_f64() * (cash_hi - cash_lo);
    let cashback_amount = ((cashback * 100.0).round() / 100.0).clamp(cash_lo, cash_hi);

    let satisfaction_score = rng.range_inclusive(
        bounds.satisfaction_score.0 as u64,
        bounds.satisfaction_score.1 as u64,
    ) as u8;

    ChurnInput {
        tenure,
        complaints,
        cashback_amount,
        satisfaction_score,
        purchased_laptop_accessory: rng.chance(LAPTOP_ACCESSORY_RATE),
        purchased_grocery:          rng.chance(GROCERY_RATE),
        purchased_other_products:   rng.chance(OTHER_PRODUCTS_RATE),
        purchased_mobile:           rng.chance(MOBILE_RATE),
        city_tier:                  pick_city_tier(rng, bounds.city_tier),
    }
}

fn pick_city_tier(rng: &mut ScenarioRng, (lo, hi): (u8, u8)) -> u8 {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    let mut tier = 3u8;
    for (i, weight) in CITY_TIER_WEIGHTS.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            tier = i as u8 + 1;
            break;
        }
    }
    tier.clamp(lo, hi)
}
