//! ndvi-charts: deterministic display models for flight analytics.
//!
//! Two renderers share one primitive pipeline: a smoothed daily-count
//! sparkline with a hover tooltip, and a vegetation-health card built from an
//! NDVI statistics snapshot. Both produce a backend-agnostic
//! [`render::RenderFrame`] that any [`render::Renderer`] can draw.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    NdviCard, NdviCardConfig, NdviCardView, SparklineChart, SparklineConfig, build_ndvi_card,
    parse_ndvi_upload, render_ndvi_card, render_sparkline,
};
pub use core::{NdviSummary, TimeSeries};
pub use error::{ChartError, ChartResult};
