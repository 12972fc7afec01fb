use chrono::NaiveDate;
use ndvi_charts::api::{NdviCard, NdviCardConfig, SparklineChart, SparklineConfig, build_ndvi_card};
use ndvi_charts::core::{NdviSummary, TimeSeries, Viewport};
use ndvi_charts::render::{
    CanvasLayerKind, Color, RenderFrame, Renderer, SvgRenderer, TextHAlign, TextPrimitive,
};

const FIELD_JSON: &str = r#"{
  "count": 327680, "mean": 0.7385, "median": 0.7727, "std": 0.1879,
  "min": -1.0, "max": 1.0, "p10": 0.6572, "p25": 0.7194,
  "p75": 0.8225, "p90": 0.8665,
  "class_pct": {"Severely Stressed": 3.07, "Stressed": 1.42, "Moderate": 0.51, "Healthy": 13.63, "Very Healthy": 81.37},
  "concern_zone_pct": 3.07
}"#;

fn series() -> TimeSeries {
    let first = NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date");
    TimeSeries::new(vec![3, 1, 4, 1, 5], first.iter_days().take(5).collect()).expect("valid series")
}

#[test]
fn renderer_is_empty_before_first_render() {
    let renderer = SvgRenderer::new("spark");
    assert_eq!(renderer.backend_name(), "svg");
    assert!(renderer.document().is_empty());
}

#[test]
fn sparkline_document_defines_its_area_gradient() {
    let config = SparklineConfig::new("flights", "#16a34a").expect("valid config");
    let mut chart =
        SparklineChart::new(SvgRenderer::new("spark"), series(), config).expect("chart");
    chart.render().expect("render");

    let svg = chart.into_renderer().into_document();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 500 120""#));
    assert!(svg.contains(r#"<linearGradient id="spark-grad-0""#));
    assert!(svg.contains(r#"fill="url(#spark-grad-0)""#));
    assert!(svg.contains("#16a34a"));
    assert_eq!(svg.matches("<path ").count(), 2);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn gradient_ids_stay_unique_per_prefix() {
    let renderer = SvgRenderer::new("weekly flights");
    let config = SparklineConfig::new("flights", "#2563eb").expect("valid config");
    let mut chart = SparklineChart::new(renderer, series(), config).expect("chart");
    chart.render().expect("render");

    let svg = chart.renderer().document();
    assert!(svg.contains(r#"id="weekly-flights-grad-0""#));
}

#[test]
fn text_content_is_escaped() {
    let mut frame = RenderFrame::new(Viewport::new(200, 40));
    let color = Color::from_hex("#111827").expect("hex");
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new("fields <north> & \"south\"", 4.0, 20.0, 12.0, color, TextHAlign::Left),
    );

    let mut renderer = SvgRenderer::new("escape");
    renderer.render(&frame).expect("render");

    let svg = renderer.document();
    assert!(svg.contains("fields &lt;north&gt; &amp; &quot;south&quot;"));
    assert!(!svg.contains("<north>"));
}

#[test]
fn invalid_frames_are_rejected() {
    let mut renderer = SvgRenderer::new("broken");
    assert!(renderer.render(&RenderFrame::new(Viewport::new(0, 10))).is_err());
    assert!(renderer.document().is_empty());
}

#[test]
fn card_document_contains_its_copy() {
    let summary = NdviSummary::from_json_str(FIELD_JSON).expect("valid summary");
    let view = build_ndvi_card(Some(&summary), NaiveDate::from_ymd_opt(2026, 2, 20));
    let mut card = NdviCard::new(SvgRenderer::new("ndvi-card"), view, NdviCardConfig::default())
        .expect("card");
    card.render().expect("render");

    let svg = card.into_renderer().into_document();
    assert!(svg.contains(r#"viewBox="0 0 640 "#));
    assert!(svg.contains(">NDVI Analysis</text>"));
    assert!(svg.contains(">Very Healthy</text>"));
    assert!(svg.contains("zoomed p10 → p90"));
}

#[test]
fn empty_card_document_shows_placeholder() {
    let mut card = NdviCard::new(
        SvgRenderer::new("ndvi-card"),
        build_ndvi_card(None, None),
        NdviCardConfig::default(),
    )
    .expect("card");
    card.render().expect("render");

    let svg = card.renderer().document();
    assert!(svg.contains(">No NDVI data yet.</text>"));
    assert!(!svg.contains("<linearGradient"));
}
