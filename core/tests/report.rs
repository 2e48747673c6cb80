//! Prediction reports: text rendering and JSON form.

use churn_core::{
    engine::ChurnEngine,
    input::ChurnInput,
    recommendations as recs,
    report::PredictionReport,
};

fn form_report() -> PredictionReport {
    let engine = ChurnEngine::reference();
    let input = ChurnInput::form_default();
    let result = engine.predict(&input).unwrap();
    PredictionReport::new(&engine.config().model_version, input, result)
}

#[test]
fn text_report_shows_prediction() {
    let text = form_report().render_text();

    assert!(text.contains("churn probability: 58.2%"), "{text}");
    assert!(text.contains("risk level:        MEDIUM"), "{text}");
    assert!(text.contains("Customer Complaints, Satisfaction Score, Customer Tenure"), "{text}");
    assert!(text.contains(&format!("1. {}", recs::ADDRESS_COMPLAINTS)), "{text}");
    assert!(text.contains("5. Develop targeted promotions for customers in Tier 2 cities"), "{text}");
    assert!(text.contains("purchases:     other"), "{text}");
    assert!(text.contains("stacked-rf-xgb-1.0"), "{text}");
}

#[test]
fn reports_get_distinct_ids() {
    assert_ne!(form_report().report_id, form_report().report_id);
}

#[test]
fn json_report_round_trips_result() {
    let report = form_report();
    let json = serde_json::to_string(&report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["result"]["churn_risk"], "medium");
    assert_eq!(value["input"]["city_tier"], 2);

    let back: PredictionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.report_id, report.report_id);
    assert_eq!(back.result.churn_risk, report.result.churn_risk);
    assert_eq!(back.result.key_drivers, report.result.key_drivers);
    assert_eq!(back.result.recommendations, report.result.recommendations);
    assert!((back.result.churn_probability - report.result.churn_probability).abs() < 1e-12);
}
