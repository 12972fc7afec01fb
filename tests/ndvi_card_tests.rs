use approx::assert_relative_eq;
use chrono::NaiveDate;
use indexmap::IndexMap;
use ndvi_charts::api::{
    CARD_TITLE, EMPTY_TITLE, NdviCardView, SegmentLabel, StatHighlight, build_ndvi_card,
};
use ndvi_charts::core::{
    Assessment, BannerIcon, HealthClass, IqrSpread, NdviSummary, RawNdviSummary, Tone,
    TrackGeometry,
};

const FIELD_JSON: &str = r#"{
  "count": 327680, "mean": 0.7385, "median": 0.7727, "std": 0.1879,
  "min": -1.0, "max": 1.0, "p10": 0.6572, "p25": 0.7194,
  "p75": 0.8225, "p90": 0.8665,
  "class_pct": {"Severely Stressed": 3.07, "Stressed": 1.42, "Moderate": 0.51, "Healthy": 13.63, "Very Healthy": 81.37},
  "concern_zone_pct": 3.07
}"#;

fn field() -> NdviSummary {
    NdviSummary::from_json_str(FIELD_JSON).expect("valid summary")
}

/// Worst-to-best class shares with fixed, well-ordered statistics.
fn summary_with(concern: f64, classes: [f64; 5]) -> NdviSummary {
    summary_with_percentiles(concern, classes, [0.40, 0.50, 0.60, 0.70, 0.80])
}

fn summary_with_percentiles(concern: f64, classes: [f64; 5], percentiles: [f64; 5]) -> NdviSummary {
    let class_pct: IndexMap<String, f64> = HealthClass::WORST_TO_BEST
        .iter()
        .zip(classes)
        .map(|(class, pct)| (class.key().to_owned(), pct))
        .collect();
    let [p10, p25, median, p75, p90] = percentiles;
    NdviSummary::new(RawNdviSummary {
        count: 1_000,
        mean: median,
        median,
        std: 0.1,
        min: -1.0,
        max: 1.0,
        p10,
        p25,
        p75,
        p90,
        class_pct,
        concern_zone_pct: concern,
    })
    .expect("valid summary")
}

fn ready(view: &NdviCardView) -> &ndvi_charts::api::NdviCardModel {
    view.model().expect("ready card")
}

#[test]
fn missing_summary_yields_the_empty_state() {
    let view = build_ndvi_card(None, None);
    assert!(view.is_empty());
    match view {
        NdviCardView::Empty(empty) => assert_eq!(empty.title, EMPTY_TITLE),
        NdviCardView::Ready(_) => panic!("expected empty state"),
    }
}

#[test]
fn header_formats_date_and_pixel_count() {
    let summary = field();
    let view = build_ndvi_card(Some(&summary), NaiveDate::from_ymd_opt(2026, 2, 20));
    let header = &ready(&view).header;

    assert_eq!(header.title, CARD_TITLE);
    assert_eq!(header.captured_on.as_deref(), Some("Feb 20, 2026"));
    assert_eq!(header.pixel_count, "327,680 px analyzed");

    let undated = build_ndvi_card(Some(&summary), None);
    assert_eq!(ready(&undated).header.captured_on, None);
}

#[test]
fn severe_concern_produces_a_strong_warning() {
    let assessment = Assessment::derive(&summary_with(20.0, [20.0, 10.0, 10.0, 30.0, 30.0]));
    assert_eq!(assessment.tone, Tone::Warn);
    assert!(assessment.text.contains("20.0%"));
    assert!(assessment.text.starts_with("Significant stress detected."));
}

#[test]
fn mild_concern_produces_a_mild_warning() {
    let assessment = Assessment::derive(&summary_with(8.0, [8.0, 2.0, 0.0, 40.0, 50.0]));
    assert_eq!(assessment.tone, Tone::Warn);
    assert!(assessment.text.starts_with("Mostly healthy with some concern areas."));
    assert!(assessment.text.contains("8.0%"));
}

#[test]
fn strong_health_produces_a_positive_message() {
    let assessment = Assessment::derive(&summary_with(3.0, [3.0, 1.42, 0.58, 13.63, 81.37]));
    assert_eq!(assessment.tone, Tone::Good);
    assert!(assessment.text.starts_with("Field is in strong shape."));
    assert!(assessment.text.contains("95.0%"));
}

#[test]
fn remaining_fields_get_the_neutral_message() {
    let assessment = Assessment::derive(&summary_with(3.0, [3.0, 7.0, 10.0, 40.0, 40.0]));
    assert_eq!(assessment.tone, Tone::Neutral);
    assert!(assessment.text.contains("Mean NDVI of 0.60"));
    assert!(assessment.text.contains("3.0% in concern zones"));
}

#[test]
fn assessment_thresholds_are_strict() {
    let at_severe = Assessment::derive(&summary_with(15.0, [15.0, 0.0, 0.0, 0.0, 85.0]));
    assert!(at_severe.text.starts_with("Mostly healthy"));

    let at_mild = Assessment::derive(&summary_with(5.0, [5.0, 0.0, 0.0, 5.0, 90.0]));
    assert_eq!(at_mild.tone, Tone::Good);

    let at_strong = Assessment::derive(&summary_with(0.0, [0.0, 5.0, 5.0, 40.0, 50.0]));
    assert_eq!(at_strong.tone, Tone::Neutral);
}

#[test]
fn banner_icon_follows_tone() {
    let warn = build_ndvi_card(Some(&summary_with(20.0, [20.0, 10.0, 10.0, 30.0, 30.0])), None);
    assert_eq!(ready(&warn).banner.icon, BannerIcon::Alert);
    assert_eq!(ready(&warn).banner.tone, Tone::Warn);

    let good = build_ndvi_card(Some(&field()), None);
    assert_eq!(ready(&good).banner.icon, BannerIcon::TrendingUp);
}

#[test]
fn segments_run_worst_to_best_and_skip_empty_classes() {
    let summary = summary_with(3.0, [3.0, 0.0, 12.0, 0.0, 85.0]);
    let view = build_ndvi_card(Some(&summary), None);
    let model = ready(&view);

    let classes: Vec<HealthClass> = model.segments.iter().map(|segment| segment.class).collect();
    assert_eq!(
        classes,
        vec![HealthClass::SeverelyStressed, HealthClass::Moderate, HealthClass::VeryHealthy]
    );
    assert_relative_eq!(model.segments[1].start_pct, 3.0);
    assert_relative_eq!(model.segments[2].start_pct, 15.0);
    assert!(model.segment(HealthClass::Stressed).is_none());

    let width_sum: f64 = model.segments.iter().map(|segment| segment.width_pct).sum();
    assert_relative_eq!(width_sum, 100.0, epsilon = 1e-9);
}

#[test]
fn small_segments_move_their_label_into_a_hover_tooltip() {
    let view = build_ndvi_card(Some(&field()), None);
    let model = ready(&view);

    let severe = model.segment(HealthClass::SeverelyStressed).expect("segment");
    assert_eq!(severe.title, "Severely Stressed: 3.1%");
    assert_eq!(severe.label, SegmentLabel::Hover("Severely Stressed: 3.1%".to_owned()));

    let healthy = model.segment(HealthClass::Healthy).expect("segment");
    assert_eq!(healthy.label, SegmentLabel::Inline("13.6%".to_owned()));

    let boundary = build_ndvi_card(Some(&summary_with(0.0, [0.0, 6.0, 0.0, 0.0, 94.0])), None);
    let stressed = ready(&boundary).segment(HealthClass::Stressed).expect("segment");
    assert_eq!(stressed.label, SegmentLabel::Inline("6.0%".to_owned()));
}

#[test]
fn oversized_class_sums_keep_literal_widths() {
    let summary = summary_with(0.0, [0.0, 0.0, 0.0, 70.0, 60.0]);
    let view = build_ndvi_card(Some(&summary), None);
    let model = ready(&view);

    let very_healthy = model.segment(HealthClass::VeryHealthy).expect("segment");
    assert_relative_eq!(very_healthy.percent, 60.0);
    assert_relative_eq!(very_healthy.start_pct, 70.0);
    assert_relative_eq!(very_healthy.width_pct, 60.0);
    let width_sum: f64 = model.segments.iter().map(|segment| segment.width_pct).sum();
    assert_relative_eq!(width_sum, 130.0);
    assert_eq!(very_healthy.label, SegmentLabel::Inline("60.0%".to_owned()));
}

#[test]
fn exact_ties_round_half_up_in_card_copy() {
    let percentiles = [0.05, 0.10, 0.125, 0.15, 0.20];
    let warned = summary_with_percentiles(12.25, [12.25, 10.0, 20.0, 30.0, 27.75], percentiles);
    let view = build_ndvi_card(Some(&warned), None);
    let model = ready(&view);

    assert!(model.banner.text.contains("12.3% of vegetation is severely stressed"));
    assert_eq!(model.stat_cards[0].value, "0.13");
    assert_eq!(model.stat_cards[2].value, "12.3%");

    let neutral = summary_with_percentiles(2.25, [2.25, 10.0, 20.0, 40.0, 27.75], percentiles);
    let assessment = Assessment::derive(&neutral);
    assert_eq!(assessment.tone, Tone::Neutral);
    assert!(assessment.text.contains("Mean NDVI of 0.13 with 2.3% in concern zones"));
}

#[test]
fn legend_lists_every_class_best_to_worst() {
    let summary = summary_with(3.0, [3.0, 0.0, 12.0, 0.0, 85.0]);
    let view = build_ndvi_card(Some(&summary), None);
    let legend = &ready(&view).legend;

    let labels: Vec<&str> = legend.iter().map(|entry| entry.short_label.as_str()).collect();
    assert_eq!(labels, vec!["Very Healthy", "Healthy", "Moderate", "Stressed", "Severe"]);
    assert_eq!(legend[1].percent_label, "0.0%");
    assert_eq!(legend[0].percent_label, "85.0%");
}

#[test]
fn stat_cards_highlight_mean_and_heavy_concern() {
    let view = build_ndvi_card(Some(&field()), None);
    let cards = &ready(&view).stat_cards;

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].label, "Mean NDVI");
    assert_eq!(cards[0].sub, "Median: 0.77");
    assert_eq!(cards[0].highlight, Some(StatHighlight::Good));
    assert_eq!(cards[1].value, "±0.19");
    assert_eq!(cards[1].highlight, None);
    assert_eq!(cards[2].value, "3.1%");
    assert_eq!(cards[2].highlight, None);

    let heavy = build_ndvi_card(Some(&summary_with(12.0, [12.0, 8.0, 10.0, 30.0, 40.0])), None);
    assert_eq!(ready(&heavy).stat_cards[2].highlight, Some(StatHighlight::Warn));

    let at_threshold = summary_with(10.0, [10.0, 8.0, 12.0, 30.0, 40.0]);
    let at_threshold = build_ndvi_card(Some(&at_threshold), None);
    assert_eq!(ready(&at_threshold).stat_cards[2].highlight, None);
}

#[test]
fn track_positions_are_normalized_to_the_p10_p90_span() {
    let geometry = TrackGeometry::from_summary(&field());

    assert_relative_eq!(geometry.p10, 0.0);
    assert_relative_eq!(geometry.p90, 1.0);
    assert_relative_eq!(geometry.median, 0.5517, epsilon = 1e-3);
    assert!(geometry.p25 < geometry.median && geometry.median < geometry.p75);
    assert!(!geometry.degenerate);
}

#[test]
fn collapsed_span_keeps_every_marker_finite() {
    let summary = summary_with_percentiles(0.0, [0.0, 0.0, 0.0, 0.0, 100.0], [0.5; 5]);
    let geometry = TrackGeometry::from_summary(&summary);

    assert!(geometry.degenerate);
    for position in geometry.positions() {
        assert!(position.is_finite());
        assert!((0.0..=1.0).contains(&position));
    }
    assert_relative_eq!(geometry.iqr_width(), 0.0);

    let view = build_ndvi_card(Some(&summary), None);
    let track = &ready(&view).track;
    assert!(track.callouts.iter().all(|callout| callout.position.is_finite()));
}

#[test]
fn iqr_width_picks_the_closing_sentence() {
    assert_eq!(IqrSpread::classify(0.1031), IqrSpread::Tight);
    assert_eq!(IqrSpread::classify(0.20), IqrSpread::Wide);
    assert_eq!(IqrSpread::classify(0.15), IqrSpread::Wide);

    let view = build_ndvi_card(Some(&field()), None);
    let track = &ready(&view).track;
    assert_eq!(track.spread, IqrSpread::Tight);
    assert!(track.interpretation.starts_with("80% of pixels fall between 0.66 and"));
    assert!(track.interpretation.contains("consistent canopy density"));

    let wide =
        summary_with_percentiles(0.0, [0.0, 0.0, 0.0, 0.0, 100.0], [0.3, 0.4, 0.5, 0.6, 0.7]);
    let view = build_ndvi_card(Some(&wide), None);
    assert!(ready(&view).track.interpretation.contains("notable variation"));
}

#[test]
fn track_callouts_accent_only_the_median() {
    let view = build_ndvi_card(Some(&field()), None);
    let track = &ready(&view).track;

    let labels: Vec<&str> = track.callouts.iter().map(|callout| callout.label.as_str()).collect();
    assert_eq!(labels, vec!["p10", "median", "p90"]);
    assert_eq!(
        track.callouts.iter().map(|callout| callout.accent).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert_eq!(track.callouts[1].value_label, "0.77");
    assert_relative_eq!(track.iqr_ticks[0], track.geometry.p25);
    assert_relative_eq!(track.iqr_ticks[1], track.geometry.p75);
}
