//! Prediction reports — a shareable snapshot of one prediction.
//!
//! A report captures the input, the result and the model version under a
//! fresh id and timestamp. Rendering is plain text; the JSON form is the
//! serde representation.

use crate::{input::ChurnInput, prediction::ChurnResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub report_id:     Uuid,
    pub generated_at:  DateTime<Utc>,
    pub model_version: String,
    pub input:         ChurnInput,
    pub result:        ChurnResult,
}

impl PredictionReport {
    pub fn new(model_version: &str, input: ChurnInput, result: ChurnResult) -> Self {
        Self {
            report_id:     Uuid::new_v4(),
            generated_at:  Utc::now(),
            model_version: model_version.to_string(),
            input,
            result,
        }
    }

    pub fn render_text(&self) -> String {
        let i = &self.input;
        let r = &self.result;
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "=== CHURN PREDICTION REPORT ===");
        let _ = writeln!(out, "  report:        {}", self.report_id);
        let _ = writeln!(out, "  generated:     {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "  model:         {}", self.model_version);
        let _ = writeln!(out);
        let _ = writeln!(out, "--- Customer ---");
        let _ = writeln!(out, "  tenure:        {} months", i.tenure);
        let _ = writeln!(out, "  complaints:    {}", i.complaints);
        let _ = writeln!(out, "  cashback:      ${:.2}", i.cashback_amount);
        let _ = writeln!(out, "  satisfaction:  {}/10", i.satisfaction_score);
        let _ = writeln!(out, "  city tier:     {}", i.city_tier);
        let _ = writeln!(out, "  purchases:     {}", purchases(i));
        let _ = writeln!(out);
        let _ = writeln!(out, "--- Prediction ---");
        let _ = writeln!(out, "  churn probability: {:.1}%", r.churn_probability * 100.0);
        let _ = writeln!(out, "  risk level:        {}", r.churn_risk.as_str().to_uppercase());
        let _ = writeln!(out, "  key drivers:       {}", r.key_drivers.join(", "));
        let _ = writeln!(out);
        let _ = writeln!(out, "--- Recommendations ---");
        for (n, rec) in r.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. {rec}", n + 1);
        }

        out
    }
}

fn purchases(i: &ChurnInput) -> String {
    let flags = [
        (i.purchased_laptop_accessory, "laptop & accessory"),
        (i.purchased_grocery, "grocery"),
        (i.purchased_other_products, "other"),
        (i.purchased_mobile, "mobile"),
    ];
    let bought: Vec<&str> = flags.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
    if bought.is_empty() {
        "none".to_string()
    } else {
        bought.join(", ")
    }
}
