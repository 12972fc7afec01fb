#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use ndvi_charts::ChartError;
use ndvi_charts::api::{NdviCard, NdviCardConfig, SparklineChart, SparklineConfig, build_ndvi_card};
use ndvi_charts::core::TimeSeries;
use ndvi_charts::render::CairoRenderer;

fn series() -> TimeSeries {
    let first = NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date");
    TimeSeries::new(vec![2, 5, 3, 8, 6], first.iter_days().take(5).collect()).expect("valid series")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 120).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_draws_a_hovered_sparkline() {
    let renderer = CairoRenderer::new(500, 120).expect("renderer");
    let config = SparklineConfig::new("flights", "#16a34a").expect("valid config");
    let mut chart = SparklineChart::new(renderer, series(), config).expect("chart init");
    chart.pointer_move_chart_x(262.0);

    let counts = chart.build_render_frame().expect("frame").counts();
    chart.render().expect("render");
    let renderer = chart.into_renderer();
    let stats = renderer.last_stats();

    assert_eq!(stats.paths_drawn, 2);
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.texts_drawn, counts.texts);
    assert_eq!(stats.circles_drawn, counts.circles);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_the_card_on_external_context() {
    let view = build_ndvi_card(None, None);
    let config = NdviCardConfig::default();
    let renderer = CairoRenderer::new(640, 200).expect("renderer");
    let mut card = NdviCard::new(renderer, view, config).expect("card init");

    let surface = ImageSurface::create(Format::ARgb32, 640, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    card.render_on_cairo_context(&context).expect("render on context");

    let renderer = card.into_renderer();
    assert_eq!(renderer.last_stats().texts_drawn, 2);
    assert_eq!(renderer.last_stats().circles_drawn, 1);
}
