use serde::{Deserialize, Serialize};

use crate::core::{ChartPadding, DEFAULT_CURVE_TENSION, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_HOVER_TOLERANCE_PX;
use crate::render::Color;

/// Fixed drawing colors of a sparkline. The series color lives on
/// [`SparklineConfig`] because every chart on a page gets its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineStyle {
    pub grid_color: Color,
    pub baseline_color: Color,
    pub axis_label_color: Color,
    pub axis_font_size_px: f64,
    pub y_label_gap_px: f64,
    pub x_label_bottom_inset_px: f64,
    pub line_width: f64,
    pub area_top_opacity: f64,
    pub marker_radius: f64,
    pub hover_line_opacity: f64,
    pub hover_dash_px: f64,
    pub hover_dot_radius: f64,
    pub hover_ring_width: f64,
}

impl Default for SparklineStyle {
    fn default() -> Self {
        Self {
            grid_color: Color::rgb8(0xe2, 0xe8, 0xf0),
            baseline_color: Color::rgb8(0xcb, 0xd5, 0xe1),
            axis_label_color: Color::rgb8(0x94, 0xa3, 0xb8),
            axis_font_size_px: 9.0,
            y_label_gap_px: 6.0,
            x_label_bottom_inset_px: 4.0,
            line_width: 2.0,
            area_top_opacity: 0.12,
            marker_radius: 2.5,
            hover_line_opacity: 0.5,
            hover_dash_px: 3.0,
            hover_dot_radius: 4.0,
            hover_ring_width: 2.0,
        }
    }
}

/// Floating date/value box shown while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub width: f64,
    pub height: f64,
    /// Gap between the box bottom and the hovered point when placed above.
    pub gap_above_px: f64,
    /// Offset of the box top below the point when flipped.
    pub offset_below_px: f64,
    pub corner_radius: f64,
    pub background: Color,
    pub border_color: Color,
    pub date_color: Color,
    pub date_font_size_px: f64,
    pub date_baseline_px: f64,
    pub value_font_size_px: f64,
    pub value_baseline_px: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            width: 90.0,
            height: 38.0,
            gap_above_px: 10.0,
            offset_below_px: 12.0,
            corner_radius: 4.0,
            background: Color::WHITE,
            border_color: Color::rgb8(0xe2, 0xe8, 0xf0),
            date_color: Color::rgb8(0x94, 0xa3, 0xb8),
            date_font_size_px: 9.0,
            date_baseline_px: 14.0,
            value_font_size_px: 13.0,
            value_baseline_px: 29.0,
        }
    }
}

/// Serializable sparkline setup.
///
/// `series_id` namespaces backend resources such as SVG gradient ids so several
/// charts can share a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineConfig {
    pub series_id: String,
    pub color: Color,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_padding")]
    pub padding: ChartPadding,
    #[serde(default = "default_curve_tension")]
    pub curve_tension: f64,
    #[serde(default = "default_hover_tolerance_px")]
    pub hover_tolerance_px: f64,
    #[serde(default = "default_static_marker_count")]
    pub static_marker_count: usize,
    #[serde(default)]
    pub style: SparklineStyle,
    #[serde(default)]
    pub tooltip: TooltipStyle,
}

impl SparklineConfig {
    /// Default 500x120 chart drawn in `color_hex` (`#rrggbb`).
    pub fn new(series_id: impl Into<String>, color_hex: &str) -> ChartResult<Self> {
        Ok(Self::with_color(series_id, Color::from_hex(color_hex)?))
    }

    #[must_use]
    pub fn with_color(series_id: impl Into<String>, color: Color) -> Self {
        Self {
            series_id: series_id.into(),
            color,
            viewport: default_viewport(),
            padding: default_padding(),
            curve_tension: default_curve_tension(),
            hover_tolerance_px: default_hover_tolerance_px(),
            static_marker_count: default_static_marker_count(),
            style: SparklineStyle::default(),
            tooltip: TooltipStyle::default(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: ChartPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_curve_tension(mut self, tension: f64) -> Self {
        self.curve_tension = tension;
        self
    }

    #[must_use]
    pub fn with_hover_tolerance_px(mut self, tolerance: f64) -> Self {
        self.hover_tolerance_px = tolerance;
        self
    }

    #[must_use]
    pub fn with_static_marker_count(mut self, count: usize) -> Self {
        self.static_marker_count = count;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SparklineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipStyle) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Plot rectangle left after padding.
    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::inside(self.viewport, self.padding)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.series_id.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "sparkline series id must not be empty".to_owned(),
            ));
        }
        self.color.validate()?;
        self.plot_area()?;
        if !(self.curve_tension.is_finite() && (0.0..=0.5).contains(&self.curve_tension)) {
            return Err(ChartError::InvalidData(format!(
                "curve tension must be in [0, 0.5], got {}",
                self.curve_tension
            )));
        }
        if !(self.hover_tolerance_px.is_finite() && self.hover_tolerance_px >= 0.0) {
            return Err(ChartError::InvalidData(
                "hover tolerance must be finite and >= 0".to_owned(),
            ));
        }

        let style = self.style;
        for (name, value) in [
            ("axis font size", style.axis_font_size_px),
            ("line width", style.line_width),
            ("marker radius", style.marker_radius),
            ("hover dash", style.hover_dash_px),
            ("hover dot radius", style.hover_dot_radius),
            ("tooltip width", self.tooltip.width),
            ("tooltip height", self.tooltip.height),
            ("tooltip date font size", self.tooltip.date_font_size_px),
            ("tooltip value font size", self.tooltip.value_font_size_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("area top opacity", style.area_top_opacity),
            ("hover line opacity", style.hover_line_opacity),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ChartError::InvalidData(format!("{name} must be in [0, 1]")));
            }
        }
        for color in [
            style.grid_color,
            style.baseline_color,
            style.axis_label_color,
            self.tooltip.background,
            self.tooltip.border_color,
            self.tooltip.date_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(500, 120)
}

fn default_padding() -> ChartPadding {
    ChartPadding::new(12.0, 8.0, 30.0, 32.0)
}

fn default_curve_tension() -> f64 {
    DEFAULT_CURVE_TENSION
}

fn default_hover_tolerance_px() -> f64 {
    DEFAULT_HOVER_TOLERANCE_PX
}

fn default_static_marker_count() -> usize {
    3
}
