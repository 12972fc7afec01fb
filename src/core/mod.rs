pub mod assessment;
pub mod curve;
pub mod format;
pub mod ndvi_summary;
pub mod percentile_track;
pub mod scale;
pub mod ticks;
pub mod time_series;
pub mod types;

pub use assessment::{Assessment, BannerIcon, Tone};
pub use curve::{
    AreaGeometry, CubicSegment, CurvePoint, DEFAULT_CURVE_TENSION, SmoothCurve, area_under,
    project_daily_points, smooth_curve,
};
pub use ndvi_summary::{ClassPercentages, HealthClass, NdviSummary, RawNdviSummary};
pub use percentile_track::{IqrSpread, TIGHT_IQR_THRESHOLD, TrackGeometry, normalize_clamped};
pub use scale::LinearScale;
pub use ticks::{VALUE_AXIS_MIN_MAX, day_tick_indices, value_axis_max, value_ticks};
pub use time_series::{TimeSeries, TrendDirection, WeeklyTrend};
pub use types::{ChartPadding, PlotArea, Viewport};
