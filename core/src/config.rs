//! Model configuration — weight tables, meta-model coefficients, risk
//! thresholds and the input bounds enforced at the engine boundary.
//!
//! RULE: configuration is loaded once and shared behind an `Arc`.
//! Nothing in the engine mutates it after load.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

// ── Sub-model weights ──────────────────────────────────────────────

/// Per-feature coefficients for one sub-model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub complaints:         f64,
    pub cashback_amount:    f64,
    pub tenure:             f64,
    pub satisfaction_score: f64,
    pub mobile:             f64,
    pub laptop_accessory:   f64,
    pub city_tier:          f64,
    pub grocery:            f64,
    pub other_products:     f64,
}

impl WeightSet {
    /// Feature importances exported from the Random Forest model.
    pub fn random_forest_reference() -> Self {
        Self {
            complaints:         0.39462851,
            cashback_amount:    0.08225383,
            tenure:             0.3127214,
            satisfaction_score: 0.09988074,
            mobile:             0.02439683,
            laptop_accessory:   0.00701376,
            city_tier:          0.00416976,
            grocery:            0.04293347,
            other_products:     0.0320017,
        }
    }

    /// Feature gains exported from the XGBoost model. Much larger magnitudes;
    /// the sub-model scales them down before the sigmoid.
    pub fn xgboost_reference() -> Self {
        Self {
            complaints:         6.182362079620361,
            cashback_amount:    2.498544931411743,
            tenure:             8.1933012008667,
            satisfaction_score: 2.7193634510040283,
            mobile:             2.8912057876586914,
            laptop_accessory:   4.488865852355957,
            city_tier:          3.27629017829895,
            grocery:            3.5970733165740967,
            other_products:     3.577709674835205,
        }
    }

    fn named(&self) -> [(&'static str, f64); 9] {
        [
            ("complaints",         self.complaints),
            ("cashback_amount",    self.cashback_amount),
            ("tenure",             self.tenure),
            ("satisfaction_score", self.satisfaction_score),
            ("mobile",             self.mobile),
            ("laptop_accessory",   self.laptop_accessory),
            ("city_tier",          self.city_tier),
            ("grocery",            self.grocery),
            ("other_products",     self.other_products),
        ]
    }
}

// ── Meta-model ─────────────────────────────────────────────────────

/// Logistic-regression coefficients stacking the two sub-model outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaCoefficients {
    pub random_forest: f64,
    pub xgboost:       f64,
}

impl MetaCoefficients {
    pub fn reference() -> Self {
        Self {
            random_forest: 3.14200716,
            xgboost:       3.26506879,
        }
    }
}

// ── Risk thresholds ────────────────────────────────────────────────

/// Cut points over the final probability. Both comparisons are strict,
/// so a value equal to a threshold falls into the lower band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high:   f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { high: 0.7, medium: 0.4 }
    }
}

// ── Input bounds ───────────────────────────────────────────────────

/// Inclusive (min, max) ranges checked by `ChurnInput::validate`.
/// Defaults mirror the prediction form's field limits, except that a
/// zero-month tenure is accepted for brand-new customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub tenure:             (u32, u32),
    pub complaints:         (u32, u32),
    pub cashback_amount:    (f64, f64),
    pub satisfaction_score: (u8, u8),
    pub city_tier:          (u8, u8),
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            tenure:             (0, 120),
            complaints:         (0, 20),
            cashback_amount:    (0.0, 1000.0),
            satisfaction_score: (1, 10),
            city_tier:          (1, 3),
        }
    }
}

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_version: String,
    pub random_forest: WeightSet,
    pub xgboost:       WeightSet,
    pub meta:          MetaCoefficients,
    #[serde(default)]
    pub thresholds:    RiskThresholds,
    #[serde(default)]
    pub bounds:        InputBounds,
}

impl ModelConfig {
    /// The reference constants the stacked model was calibrated with.
    pub fn reference() -> Self {
        Self {
            model_version: "stacked-rf-xgb-1.0".into(),
            random_forest: WeightSet::random_forest_reference(),
            xgboost:       WeightSet::xgboost_reference(),
            meta:          MetaCoefficients::reference(),
            thresholds:    RiskThresholds::default(),
            bounds:        InputBounds::default(),
        }
    }

    /// Load from the data/ directory.
    /// In tests, use ModelConfig::reference().
    pub fn load(data_dir: &str) -> EngineResult<Self> {
        let path = format!("{data_dir}/model/model_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)?;
        log::info!(
            "loaded model config {} from {path}",
            config.model_version,
        );
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> EngineResult<Self> {
        let config: ModelConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        for (model, weights) in [("random_forest", &self.random_forest), ("xgboost", &self.xgboost)] {
            for (feature, value) in weights.named() {
                if !value.is_finite() {
                    return Err(invalid(format!("{model}.{feature} is not finite")));
                }
            }
        }

        if !self.meta.random_forest.is_finite() || !self.meta.xgboost.is_finite() {
            return Err(invalid("meta coefficients must be finite".into()));
        }

        let t = &self.thresholds;
        if !(t.medium > 0.0 && t.medium < t.high && t.high < 1.0) {
            return Err(invalid(format!(
                "thresholds must satisfy 0 < medium < high < 1 (medium={}, high={})",
                t.medium, t.high,
            )));
        }

        let b = &self.bounds;
        let (cash_lo, cash_hi) = b.cashback_amount;
        if b.tenure.0 > b.tenure.1
            || b.complaints.0 > b.complaints.1
            || b.satisfaction_score.0 > b.satisfaction_score.1
            || b.city_tier.0 > b.city_tier.1
            || !(cash_lo.is_finite() && cash_hi.is_finite() && cash_lo <= cash_hi)
        {
            return Err(invalid("input bounds must be ordered (min, max) pairs".into()));
        }

        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::reference()
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidConfig { reason }
}
