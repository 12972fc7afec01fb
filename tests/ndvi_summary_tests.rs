use approx::assert_relative_eq;
use ndvi_charts::ChartError;
use ndvi_charts::core::{HealthClass, NdviSummary};

const FIELD_JSON: &str = r#"{
  "count": 327680, "mean": 0.7385, "median": 0.7727, "std": 0.1879,
  "min": -1.0, "max": 1.0, "p10": 0.6572, "p25": 0.7194,
  "p75": 0.8225, "p90": 0.8665,
  "class_pct": {"Severely Stressed": 3.07, "Stressed": 1.42, "Moderate": 0.51, "Healthy": 13.63, "Very Healthy": 81.37},
  "concern_zone_pct": 3.07
}"#;

#[test]
fn wire_document_parses_into_a_summary() {
    let summary = NdviSummary::from_json_str(FIELD_JSON).expect("valid summary");

    assert_eq!(summary.count(), 327_680);
    assert_relative_eq!(summary.median(), 0.7727);
    assert_relative_eq!(summary.class_pct().get(HealthClass::VeryHealthy), 81.37);
    assert_relative_eq!(summary.class_pct().get(HealthClass::SeverelyStressed), 3.07);
    assert_relative_eq!(summary.iqr(), 0.8225 - 0.7194);
    assert_relative_eq!(summary.class_pct().total(), 100.0, epsilon = 1e-9);
}

#[test]
fn absent_classes_read_as_zero() {
    let json = FIELD_JSON.replace(r#""Moderate": 0.51, "#, "");
    let summary = NdviSummary::from_json_str(&json).expect("valid summary");
    assert_eq!(summary.class_pct().get(HealthClass::Moderate), 0.0);
}

#[test]
fn unknown_class_key_is_rejected() {
    let json = FIELD_JSON.replace("Moderate", "Mediocre");
    let err = NdviSummary::from_json_str(&json).expect_err("unknown class");
    assert!(matches!(err, ChartError::InvalidSummary(_)));
    assert!(err.to_string().contains("Mediocre"));
}

#[test]
fn unordered_percentiles_are_rejected() {
    let json = FIELD_JSON.replace(r#""p25": 0.7194"#, r#""p25": 0.9"#);
    let err = NdviSummary::from_json_str(&json).expect_err("p25 above median");
    assert!(matches!(err, ChartError::InvalidSummary(_)));
}

#[test]
fn negative_std_is_rejected() {
    let json = FIELD_JSON.replace(r#""std": 0.1879"#, r#""std": -0.1"#);
    assert!(NdviSummary::from_json_str(&json).is_err());
}

#[test]
fn percentages_outside_range_are_rejected() {
    let json = FIELD_JSON.replace(r#""Very Healthy": 81.37"#, r#""Very Healthy": 181.37"#);
    assert!(NdviSummary::from_json_str(&json).is_err());

    let json = FIELD_JSON.replace(r#""concern_zone_pct": 3.07"#, r#""concern_zone_pct": -1"#);
    assert!(NdviSummary::from_json_str(&json).is_err());
}

#[test]
fn missing_field_is_reported_as_invalid_summary() {
    let json = FIELD_JSON.replace(r#""mean": 0.7385, "#, "");
    let err = NdviSummary::from_json_str(&json).expect_err("mean missing");
    assert!(matches!(err, ChartError::InvalidSummary(_)));
}

#[test]
fn summary_serializes_back_to_the_wire_shape() {
    let summary = NdviSummary::from_json_str(FIELD_JSON).expect("valid summary");
    let json = summary.to_json_pretty().expect("serialize");

    assert!(json.contains("\"Very Healthy\""));
    assert!(json.contains("\"concern_zone_pct\""));
    let restored = NdviSummary::from_json_str(&json).expect("reparse");
    assert_eq!(restored, summary);
}

#[test]
fn class_orders_are_mirrored() {
    let mut reversed = HealthClass::WORST_TO_BEST;
    reversed.reverse();
    assert_eq!(reversed, HealthClass::BEST_TO_WORST);
    assert_eq!(HealthClass::SeverelyStressed.short_label(), "Severe");
    assert_eq!(HealthClass::VeryHealthy.short_label(), "Very Healthy");
    assert_eq!(HealthClass::from_key("Healthy"), Some(HealthClass::Healthy));
    assert_eq!(HealthClass::from_key("healthy"), None);
}
