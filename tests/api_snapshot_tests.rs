use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndvi_charts::ChartError;
use ndvi_charts::api::{
    NDVI_CARD_VIEW_JSON_SCHEMA_V1, NdviCardView, SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1,
    SparklineChart, SparklineConfig, SparklineSnapshot, build_ndvi_card,
};
use ndvi_charts::core::{NdviSummary, TimeSeries};
use ndvi_charts::interaction::HoverState;
use ndvi_charts::render::NullRenderer;

const FIELD_JSON: &str = r#"{
  "count": 327680, "mean": 0.7385, "median": 0.7727, "std": 0.1879,
  "min": -1.0, "max": 1.0, "p10": 0.6572, "p25": 0.7194,
  "p75": 0.8225, "p90": 0.8665,
  "class_pct": {"Severely Stressed": 3.07, "Stressed": 1.42, "Moderate": 0.51, "Healthy": 13.63, "Very Healthy": 81.37},
  "concern_zone_pct": 3.07
}"#;

fn chart() -> SparklineChart<NullRenderer> {
    let first = NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date");
    let series = TimeSeries::new(vec![2, 5, 3, 8, 6], first.iter_days().take(5).collect())
        .expect("valid series");
    let config = SparklineConfig::new("flights", "#16a34a").expect("valid config");
    SparklineChart::new(NullRenderer::default(), series, config).expect("chart init")
}

#[test]
fn snapshot_preserves_metadata_order_and_geometry() {
    let mut chart = chart();
    chart.pointer_move_chart_x(262.0);
    let snapshot = chart.snapshot();

    assert_eq!(snapshot.series_id, "flights");
    assert_eq!(snapshot.points.len(), 5);
    assert_relative_eq!(snapshot.points[0].x, 32.0);
    assert_relative_eq!(snapshot.points[4].x, 492.0);
    assert_eq!(snapshot.hover, HoverState::Hovering { index: 2 });
    assert_eq!(snapshot.total, 24);
    assert_eq!(snapshot.trend.recent, 24);
    assert_eq!(snapshot.trend.prior, 0);

    let tooltip = snapshot.tooltip.as_ref().expect("tooltip");
    assert_eq!(tooltip.date_label, "Feb 3");
    assert_eq!(tooltip.value_label, "3");

    let keys: Vec<&str> = snapshot.series_metadata.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["color", "first_day", "last_day"]);
    assert_eq!(snapshot.series_metadata["color"], "#16a34a");
    assert_eq!(snapshot.series_metadata["first_day"], "2026-02-01");
    assert_eq!(snapshot.series_metadata["last_day"], "2026-02-05");
}

#[test]
fn idle_snapshot_has_no_tooltip() {
    let snapshot = chart().snapshot();
    assert_eq!(snapshot.hover, HoverState::Idle);
    assert!(snapshot.tooltip.is_none());
}

#[test]
fn snapshot_contract_v1_roundtrip() {
    let mut chart = chart();
    chart.pointer_move_chart_x(492.0);
    let snapshot = chart.snapshot();

    let wrapped = chart.snapshot_json_contract_v1_pretty().expect("contract");
    let value: serde_json::Value = serde_json::from_str(&wrapped).expect("json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1)
    );
    assert_eq!(
        SparklineSnapshot::from_json_compat_str(&wrapped).expect("wrapped parse"),
        snapshot
    );

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    assert_eq!(
        SparklineSnapshot::from_json_compat_str(&bare).expect("bare parse"),
        snapshot
    );
}

#[test]
fn snapshot_contract_rejects_unknown_schema_version() {
    let wrapped = chart().snapshot_json_contract_v1_pretty().expect("contract");
    let future = wrapped.replacen("\"schema_version\": 1", "\"schema_version\": 7", 1);

    let err = SparklineSnapshot::from_json_compat_str(&future).expect_err("version 7");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(err.to_string().contains("unsupported snapshot schema version: 7"));
}

#[test]
fn snapshot_contract_rejects_garbage() {
    let err = SparklineSnapshot::from_json_compat_str("[1, 2, 3]").expect_err("not a snapshot");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn card_view_contract_v1_roundtrip() {
    let summary = NdviSummary::from_json_str(FIELD_JSON).expect("valid summary");
    let view = build_ndvi_card(Some(&summary), NaiveDate::from_ymd_opt(2026, 2, 20));

    let wrapped = view.to_json_contract_v1_pretty().expect("contract");
    let value: serde_json::Value = serde_json::from_str(&wrapped).expect("json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(NDVI_CARD_VIEW_JSON_SCHEMA_V1)
    );
    assert_eq!(NdviCardView::from_json_compat_str(&wrapped).expect("wrapped"), view);

    let bare = view.to_json_pretty().expect("bare");
    assert_eq!(NdviCardView::from_json_compat_str(&bare).expect("bare"), view);
}

#[test]
fn empty_card_view_roundtrips() {
    let view = build_ndvi_card(None, None);
    let bare = view.to_json_pretty().expect("bare");
    let restored = NdviCardView::from_json_compat_str(&bare).expect("parse");
    assert!(restored.is_empty());
    assert_eq!(restored, view);
}

#[test]
fn card_view_contract_rejects_unknown_schema_version() {
    let wrapped = build_ndvi_card(None, None)
        .to_json_contract_v1_pretty()
        .expect("contract");
    let future = wrapped.replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);
    let err = NdviCardView::from_json_compat_str(&future).expect_err("version 2");
    assert!(err.to_string().contains("unsupported card view schema version: 2"));
}
