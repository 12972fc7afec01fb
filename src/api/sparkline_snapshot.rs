use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CurvePoint, PlotArea, Viewport, WeeklyTrend};
use crate::interaction::HoverState;
use crate::render::Renderer;

use super::{SparklineChart, TooltipLayout};

/// Serializable state of one sparkline, used by regression tests and hosts
/// that draw the chart themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineSnapshot {
    pub series_id: String,
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub axis_max: u64,
    pub points: Vec<CurvePoint>,
    pub value_ticks: Vec<u64>,
    pub day_ticks: Vec<usize>,
    pub hover: HoverState,
    pub tooltip: Option<TooltipLayout>,
    pub total: u64,
    pub trend: WeeklyTrend,
    pub series_metadata: IndexMap<String, String>,
}

impl<R: Renderer> SparklineChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> SparklineSnapshot {
        let layout = self.layout();
        let series = self.series();

        let mut series_metadata = IndexMap::new();
        series_metadata.insert("color".to_owned(), self.config().color.to_hex_rgb());
        if let (Some(first), Some(last)) = (series.days().first(), series.days().last()) {
            series_metadata.insert("first_day".to_owned(), first.to_string());
            series_metadata.insert("last_day".to_owned(), last.to_string());
        }

        SparklineSnapshot {
            series_id: self.config().series_id.clone(),
            viewport: self.config().viewport,
            plot: layout.plot,
            axis_max: layout.axis_max,
            points: layout.points().to_vec(),
            value_ticks: layout.value_ticks.to_vec(),
            day_ticks: layout.day_ticks.to_vec(),
            hover: self.hover_state(),
            tooltip: self.tooltip(),
            total: series.total(),
            trend: series.weekly_trend(),
            series_metadata,
        }
    }
}
