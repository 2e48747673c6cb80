//! The per-customer input record and its boundary validation.

use crate::{
    config::InputBounds,
    error::{EngineError, EngineResult},
};
use serde::{Deserialize, Serialize};

/// Attributes of one customer, as captured by the prediction form.
/// camelCase aliases accept payloads produced by the web form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnInput {
    /// Months as a customer.
    pub tenure: u32,
    pub complaints: u32,
    #[serde(alias = "cashbackAmount")]
    pub cashback_amount: f64,
    /// 1 (worst) to 10 (best).
    #[serde(alias = "satisfactionScore")]
    pub satisfaction_score: u8,
    #[serde(alias = "purchasedLaptopAccessory")]
    pub purchased_laptop_accessory: bool,
    #[serde(alias = "purchasedGrocery")]
    pub purchased_grocery: bool,
    #[serde(alias = "purchasedOtherProducts")]
    pub purchased_other_products: bool,
    #[serde(alias = "purchasedMobile")]
    pub purchased_mobile: bool,
    /// 1 = most developed, 3 = least.
    #[serde(alias = "cityTier")]
    pub city_tier: u8,
}

impl ChurnInput {
    /// The record the prediction form is pre-filled with.
    pub fn form_default() -> Self {
        Self {
            tenure: 12,
            complaints: 1,
            cashback_amount: 150.0,
            satisfaction_score: 7,
            purchased_laptop_accessory: false,
            purchased_grocery: false,
            purchased_other_products: true,
            purchased_mobile: false,
            city_tier: 2,
        }
    }

    /// Check every field against `bounds`, reporting the first violation.
    pub fn validate(&self, bounds: &InputBounds) -> EngineResult<()> {
        check_range("tenure", self.tenure, bounds.tenure)?;
        check_range("complaints", self.complaints, bounds.complaints)?;

        let (lo, hi) = bounds.cashback_amount;
        if !self.cashback_amount.is_finite() {
            return Err(EngineError::InvalidInput {
                field:      "cashback_amount",
                constraint: format!("must be a finite number, got {}", self.cashback_amount),
            });
        }
        check_range("cashback_amount", self.cashback_amount, (lo, hi))?;

        check_range("satisfaction_score", self.satisfaction_score, bounds.satisfaction_score)?;
        check_range("city_tier", self.city_tier, bounds.city_tier)?;
        Ok(())
    }
}

fn check_range<T>(field: &'static str, value: T, (min, max): (T, T)) -> EngineResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(EngineError::InvalidInput {
            field,
            constraint: format!("must be between {min} and {max}, got {value}"),
        });
    }
    Ok(())
}
