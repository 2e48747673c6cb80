//! Portfolio aggregates over a batch of predictions — the numbers behind
//! the dashboard's total / loyal / at-risk customer counters.

use crate::{prediction::ChurnResult, scoring::RiskLevel, types::Probability};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverFrequency {
    pub factor: String,
    pub count:  usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_customers:     usize,
    pub low_risk:            usize,
    pub medium_risk:         usize,
    pub high_risk:           usize,
    pub average_probability: Probability,
    pub max_probability:     Probability,
    /// How often each label appears among key drivers, most frequent first.
    pub driver_frequency:    Vec<DriverFrequency>,
    /// Records left out because they failed validation.
    pub skipped:             usize,
}

impl PortfolioSummary {
    pub fn from_results(results: &[ChurnResult]) -> Self {
        let mut summary = Self {
            total_customers: results.len(),
            ..Self::default()
        };
        if results.is_empty() {
            return summary;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut sum = 0.0;

        for r in results {
            match r.churn_risk {
                RiskLevel::Low    => summary.low_risk += 1,
                RiskLevel::Medium => summary.medium_risk += 1,
                RiskLevel::High   => summary.high_risk += 1,
            }
            sum += r.churn_probability;
            summary.max_probability = summary.max_probability.max(r.churn_probability);

            for driver in &r.key_drivers {
                *counts.entry(driver.as_str()).or_default() += 1;
            }
        }

        summary.average_probability = sum / results.len() as f64;

        let mut freq: Vec<DriverFrequency> = counts
            .into_iter()
            .map(|(factor, count)| DriverFrequency { factor: factor.to_string(), count })
            .collect();
        freq.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.factor.cmp(&b.factor)));
        summary.driver_frequency = freq;

        summary
    }

    /// Customers in the low band.
    pub fn loyal_customers(&self) -> usize {
        self.low_risk
    }

    /// Customers in the high band.
    pub fn at_risk_customers(&self) -> usize {
        self.high_risk
    }
}
