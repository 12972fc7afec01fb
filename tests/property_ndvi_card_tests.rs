use indexmap::IndexMap;
use ndvi_charts::api::{NdviCardConfig, build_ndvi_card, layout_ndvi_card};
use ndvi_charts::core::{HealthClass, NdviSummary, RawNdviSummary, normalize_clamped};
use proptest::prelude::*;

fn summary(mut stats: Vec<f64>, classes: [f64; 5], concern: f64) -> NdviSummary {
    stats.sort_by(f64::total_cmp);
    let class_pct: IndexMap<String, f64> = HealthClass::WORST_TO_BEST
        .into_iter()
        .zip(classes)
        .map(|(class, percent)| (class.key().to_owned(), percent))
        .collect();
    NdviSummary::new(RawNdviSummary {
        count: 10_000,
        mean: stats[3],
        median: stats[3],
        std: 0.2,
        min: stats[0],
        max: stats[6],
        p10: stats[1],
        p25: stats[2],
        p75: stats[4],
        p90: stats[5],
        class_pct,
        concern_zone_pct: concern,
    })
    .expect("valid summary")
}

proptest! {
    #[test]
    fn normalized_positions_stay_on_the_rail(
        value in -10.0f64..10.0,
        low in -1.0f64..1.0,
        span in 0.0f64..2.0
    ) {
        let position = normalize_clamped(value, low, low + span);
        prop_assert!(position.is_finite());
        prop_assert!((0.0..=1.0).contains(&position));
    }

    #[test]
    fn segments_keep_literal_widths(
        stats in prop::collection::vec(-1.0f64..1.0, 7),
        classes in prop::array::uniform5(0.0f64..60.0),
        concern in 0.0f64..100.0
    ) {
        let summary = summary(stats, classes, concern);
        let view = build_ndvi_card(Some(&summary), None);
        let model = view.model().expect("ready card");

        let total: f64 = classes.iter().sum();
        let drawn: f64 = model.segments.iter().map(|segment| segment.width_pct).sum();
        prop_assert!((drawn - total).abs() <= 1e-9);
        prop_assert_eq!(
            model.segments.len(),
            classes.iter().filter(|percent| **percent > 0.0).count()
        );
        for segment in &model.segments {
            prop_assert!((segment.width_pct - segment.percent).abs() <= 1e-12);
        }
        let contiguous = model.segments.windows(2).all(|pair| {
            (pair[1].start_pct - (pair[0].start_pct + pair[0].width_pct)).abs() <= 1e-9
        });
        prop_assert!(contiguous);
        prop_assert_eq!(model.legend.len(), 5);
    }

    #[test]
    fn track_positions_are_finite_and_ordered(
        stats in prop::collection::vec(-1.0f64..1.0, 7),
        classes in prop::array::uniform5(0.0f64..20.0)
    ) {
        let summary = summary(stats, classes, 0.0);
        let view = build_ndvi_card(Some(&summary), None);
        let geometry = view.model().expect("ready card").track.geometry;
        let positions = geometry.positions();

        prop_assert!(positions.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)));
        prop_assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert!(geometry.iqr_width() >= 0.0);
    }

    #[test]
    fn card_frames_are_valid_with_one_hit_box_per_segment(
        stats in prop::collection::vec(-1.0f64..1.0, 7),
        classes in prop::array::uniform5(0.0f64..40.0),
        concern in 0.0f64..100.0
    ) {
        let summary = summary(stats, classes, concern);
        let view = build_ndvi_card(Some(&summary), None);
        let layout = layout_ndvi_card(&view, &NdviCardConfig::default(), None).expect("layout");

        prop_assert!(layout.frame.validate().is_ok());
        let segments = view.model().expect("ready card").segments.len();
        prop_assert!(layout.segment_hit_boxes.len() <= segments);
        for hit in &layout.segment_hit_boxes {
            prop_assert!(hit.x >= 24.0 - 1e-9);
            prop_assert!(hit.x + hit.width <= 616.0 + 1e-6);
        }
    }
}
