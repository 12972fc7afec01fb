use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndvi_charts::api::{StatHighlight, parse_ndvi_upload};
use ndvi_charts::{ChartError, build_ndvi_card};

const FIELD_JSON: &str = r#"{
  "count": 327680, "mean": 0.7385, "median": 0.7727, "std": 0.1879,
  "min": -1.0, "max": 1.0, "p10": 0.6572, "p25": 0.7194,
  "p75": 0.8225, "p90": 0.8665,
  "class_pct": {"Severely Stressed": 3.07, "Stressed": 1.42, "Moderate": 0.51, "Healthy": 13.63, "Very Healthy": 81.37},
  "concern_zone_pct": 3.07
}"#;

#[test]
fn valid_upload_carries_summary_and_capture_day() {
    let upload = parse_ndvi_upload(FIELD_JSON, Some("2026-02-20T08:00:00Z")).expect("upload");

    assert_eq!(upload.summary.count(), 327_680);
    assert_eq!(upload.captured_on, NaiveDate::from_ymd_opt(2026, 2, 20));
    assert_eq!(upload.preview.count, 327_680);
    assert_relative_eq!(upload.preview.mean, 0.7385);
    assert_relative_eq!(upload.preview.concern_zone_pct, 3.07);

    let view = build_ndvi_card(Some(&upload.summary), upload.captured_on);
    assert!(!view.is_empty());
}

#[test]
fn blank_capture_timestamp_counts_as_absent() {
    assert_eq!(parse_ndvi_upload(FIELD_JSON, Some("")).expect("upload").captured_on, None);
    assert_eq!(parse_ndvi_upload(FIELD_JSON, Some("   ")).expect("upload").captured_on, None);
    assert_eq!(parse_ndvi_upload(FIELD_JSON, None).expect("upload").captured_on, None);
    assert_eq!(
        parse_ndvi_upload(FIELD_JSON, Some("2026-03-01")).expect("upload").captured_on,
        NaiveDate::from_ymd_opt(2026, 3, 1)
    );
}

#[test]
fn unreadable_capture_timestamp_is_rejected() {
    let err = parse_ndvi_upload(FIELD_JSON, Some("last tuesday")).expect_err("bad timestamp");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn malformed_json_is_a_syntax_error() {
    let err = parse_ndvi_upload("{\"count\": 12,", None).expect_err("truncated document");
    assert!(matches!(err, ChartError::InvalidJson(_)));
    assert!(err.to_string().contains("could not parse JSON"));
}

#[test]
fn missing_field_is_a_summary_error() {
    let json = FIELD_JSON.replace(r#""median": 0.7727, "#, "");
    let err = parse_ndvi_upload(&json, None).expect_err("missing median");
    assert!(matches!(err, ChartError::InvalidSummary(_)));
    assert!(err.to_string().contains("median"));
}

#[test]
fn invalid_statistics_are_rejected() {
    let json = FIELD_JSON.replace(r#""std": 0.1879"#, r#""std": -0.5"#);
    let err = parse_ndvi_upload(&json, None).expect_err("negative std");
    assert!(matches!(err, ChartError::InvalidSummary(_)));
}

#[test]
fn preview_fields_format_the_headline_numbers() {
    let upload = parse_ndvi_upload(FIELD_JSON, None).expect("upload");
    let fields = upload.preview.fields();

    let labels: Vec<&str> = fields.iter().map(|field| field.label.as_str()).collect();
    assert_eq!(labels, vec!["Pixels", "Mean NDVI", "Concern"]);
    assert_eq!(fields[0].value, "327,680");
    assert_eq!(fields[1].value, "0.739");
    assert_eq!(fields[2].value, "3.1%");
    assert!(fields.iter().all(|field| field.highlight.is_none()));
}

#[test]
fn high_concern_share_is_highlighted_in_preview() {
    let json = FIELD_JSON.replace(r#""concern_zone_pct": 3.07"#, r#""concern_zone_pct": 12.5"#);
    let upload = parse_ndvi_upload(&json, None).expect("upload");
    let concern = &upload.preview.fields()[2];

    assert_eq!(concern.value, "12.5%");
    assert_eq!(concern.highlight, Some(StatHighlight::Warn));
}
