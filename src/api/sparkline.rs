use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::format::format_month_day;
use crate::core::{
    AreaGeometry, CurvePoint, LinearScale, PlotArea, SmoothCurve, TimeSeries, area_under,
    day_tick_indices, project_daily_points, smooth_curve, value_axis_max, value_ticks,
};
use crate::error::ChartResult;
use crate::interaction::{ElementBounds, HoverBand, HoverState, HoverTracker, PointerEvent};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathCommand,
    PathFill, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextVAlign,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::SparklineConfig;
use super::layout_helpers::clamp_span;

/// Hover-independent geometry of one sparkline.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineLayout {
    pub plot: PlotArea,
    pub axis_max: u64,
    pub area: AreaGeometry,
    pub value_ticks: SmallVec<[u64; 3]>,
    pub day_ticks: SmallVec<[usize; 5]>,
    value_scale: LinearScale,
}

impl SparklineLayout {
    /// Projected samples, one per day.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.area.curve.points
    }

    #[must_use]
    pub fn curve(&self) -> &SmoothCurve {
        &self.area.curve
    }

    #[must_use]
    pub fn point_xs(&self) -> Vec<f64> {
        self.points().iter().map(|point| point.x).collect()
    }

    pub fn value_to_y(&self, value: u64) -> ChartResult<f64> {
        self.value_scale.domain_to_pixel(value as f64)
    }
}

/// Projects `series` into the plot described by `config`.
pub fn layout_sparkline(
    series: &TimeSeries,
    config: &SparklineConfig,
) -> ChartResult<SparklineLayout> {
    let plot = config.plot_area()?;
    let axis_max = value_axis_max(series.values());
    let points = project_daily_points(series.values(), axis_max, plot)?;
    let curve = smooth_curve(&points, config.curve_tension);

    Ok(SparklineLayout {
        plot,
        axis_max,
        area: area_under(curve, plot.bottom),
        value_ticks: value_ticks(axis_max),
        day_ticks: day_tick_indices(series.len()),
        value_scale: LinearScale::new(0.0, axis_max as f64, plot.bottom, plot.top)?,
    })
}

/// Resolved position and text of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipLayout {
    pub index: usize,
    pub anchor: CurvePoint,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub date_label: String,
    pub value_label: String,
}

/// Tooltip for the sample at `index`, or `None` when the index is out of range.
///
/// The box is centered over the point and kept inside the plot's horizontal
/// span; it sits above the point unless that would cross the top edge.
#[must_use]
pub fn tooltip_layout(
    layout: &SparklineLayout,
    series: &TimeSeries,
    config: &SparklineConfig,
    index: usize,
) -> Option<TooltipLayout> {
    let anchor = *layout.points().get(index)?;
    let value = *series.values().get(index)?;
    let day = *series.days().get(index)?;
    let style = config.tooltip;

    let x = clamp_span(
        anchor.x - style.width / 2.0,
        style.width,
        layout.plot.left,
        layout.plot.right,
    );
    let above = anchor.y - style.height - style.gap_above_px;
    let y = if above < 0.0 {
        anchor.y + style.offset_below_px
    } else {
        above
    };

    Some(TooltipLayout {
        index,
        anchor,
        x,
        y,
        width: style.width,
        height: style.height,
        date_label: format_month_day(day),
        value_label: value.to_string(),
    })
}

/// Builds the complete frame for `series` under `hover`.
pub fn render_sparkline(
    series: &TimeSeries,
    config: &SparklineConfig,
    hover: HoverState,
) -> ChartResult<RenderFrame> {
    config.validate()?;
    let layout = layout_sparkline(series, config)?;
    compose_sparkline_frame(series, config, &layout, hover)
}

fn compose_sparkline_frame(
    series: &TimeSeries,
    config: &SparklineConfig,
    layout: &SparklineLayout,
    hover: HoverState,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(config.viewport);
    let style = config.style;
    let color = config.color;
    let plot = layout.plot;
    let hovered = hover.index().filter(|index| *index < series.len());

    for tick in &layout.value_ticks {
        let y = layout.value_to_y(*tick)?;
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(plot.left, y, plot.right, y, 1.0, style.grid_color),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                tick.to_string(),
                plot.left - style.y_label_gap_px,
                y,
                style.axis_font_size_px,
                style.axis_label_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle)
            .monospace(),
        );
    }

    let area_top = layout
        .points()
        .iter()
        .map(|point| point.y)
        .fold(plot.bottom, f64::min);
    frame.push_path(
        CanvasLayerKind::Series,
        PathPrimitive::new(area_commands(&layout.area)).with_fill(PathFill::VerticalGradient {
            top_y: area_top,
            bottom_y: plot.bottom,
            top_color: color.with_alpha(style.area_top_opacity),
            bottom_color: color.with_alpha(0.0),
        }),
    );
    frame.push_path(
        CanvasLayerKind::Series,
        PathPrimitive::new(curve_commands(layout.curve())).with_stroke(
            style.line_width,
            color,
            true,
        ),
    );

    let marker_start = series.len().saturating_sub(config.static_marker_count);
    for (index, point) in layout.points().iter().enumerate().skip(marker_start) {
        if hovered == Some(index) {
            continue;
        }
        frame.push_circle(
            CanvasLayerKind::Overlay,
            CirclePrimitive::new(point.x, point.y, style.marker_radius, color),
        );
    }

    let label_y = f64::from(config.viewport.height) - style.x_label_bottom_inset_px;
    for index in &layout.day_ticks {
        let (Some(point), Some(day)) = (layout.points().get(*index), series.days().get(*index))
        else {
            continue;
        };
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_month_day(*day),
                point.x,
                label_y,
                style.axis_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
            ),
        );
    }
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(
            plot.left,
            plot.bottom,
            plot.right,
            plot.bottom,
            1.0,
            style.baseline_color,
        ),
    );

    if let Some(tooltip) = hovered.and_then(|index| tooltip_layout(layout, series, config, index))
    {
        push_hover(&mut frame, config, plot, &tooltip);
    }

    Ok(frame)
}

fn push_hover(
    frame: &mut RenderFrame,
    config: &SparklineConfig,
    plot: PlotArea,
    tooltip: &TooltipLayout,
) {
    let style = config.style;
    let color = config.color;
    let anchor = tooltip.anchor;

    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(
            anchor.x,
            plot.top,
            anchor.x,
            plot.bottom,
            1.0,
            color.with_alpha(style.hover_line_opacity),
        )
        .with_stroke_style(LineStrokeStyle::Dashed {
            dash: style.hover_dash_px,
            gap: style.hover_dash_px,
        }),
    );
    frame.push_circle(
        CanvasLayerKind::Crosshair,
        CirclePrimitive::new(anchor.x, anchor.y, style.hover_dot_radius, Color::WHITE)
            .with_stroke(style.hover_ring_width, color),
    );

    let box_style = config.tooltip;
    frame.push_rect(
        CanvasLayerKind::Tooltip,
        RectPrimitive::new(
            tooltip.x,
            tooltip.y,
            tooltip.width,
            tooltip.height,
            box_style.background,
        )
        .with_border(1.0, box_style.border_color)
        .with_corner_radius(box_style.corner_radius),
    );
    let center_x = tooltip.x + tooltip.width / 2.0;
    frame.push_text(
        CanvasLayerKind::Tooltip,
        TextPrimitive::new(
            tooltip.date_label.clone(),
            center_x,
            tooltip.y + box_style.date_baseline_px,
            box_style.date_font_size_px,
            box_style.date_color,
            TextHAlign::Center,
        ),
    );
    frame.push_text(
        CanvasLayerKind::Tooltip,
        TextPrimitive::new(
            tooltip.value_label.clone(),
            center_x,
            tooltip.y + box_style.value_baseline_px,
            box_style.value_font_size_px,
            color,
            TextHAlign::Center,
        )
        .bold()
        .monospace(),
    );
}

fn curve_commands(curve: &SmoothCurve) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(curve.segments.len() + 1);
    if let Some(first) = curve.points.first() {
        commands.push(PathCommand::MoveTo {
            x: first.x,
            y: first.y,
        });
    }
    commands.extend(curve.segments.iter().map(|segment| PathCommand::CubicTo {
        c1x: segment.control1.x,
        c1y: segment.control1.y,
        c2x: segment.control2.x,
        c2y: segment.control2.y,
        x: segment.end.x,
        y: segment.end.y,
    }));
    commands
}

fn area_commands(area: &AreaGeometry) -> Vec<PathCommand> {
    let mut commands = curve_commands(&area.curve);
    if let Some(corners) = area.baseline_corners() {
        commands.extend(
            corners
                .into_iter()
                .map(|corner| PathCommand::LineTo {
                    x: corner.x,
                    y: corner.y,
                }),
        );
        commands.push(PathCommand::Close);
    }
    commands
}

/// Interactive sparkline: one series, one config, one hover state.
#[derive(Debug)]
pub struct SparklineChart<R: Renderer> {
    renderer: R,
    config: SparklineConfig,
    series: TimeSeries,
    layout: SparklineLayout,
    point_xs: Vec<f64>,
    hover: HoverTracker,
}

impl<R: Renderer> SparklineChart<R> {
    pub fn new(renderer: R, series: TimeSeries, config: SparklineConfig) -> ChartResult<Self> {
        config.validate()?;
        let layout = layout_sparkline(&series, &config)?;
        let hover = HoverTracker::new(HoverBand::around(
            layout.plot.left,
            layout.plot.right,
            config.hover_tolerance_px,
        ));
        debug!(
            series_id = %config.series_id,
            points = series.len(),
            axis_max = layout.axis_max,
            "create sparkline"
        );

        Ok(Self {
            renderer,
            point_xs: layout.point_xs(),
            config,
            series,
            layout,
            hover,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SparklineConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn layout(&self) -> &SparklineLayout {
        &self.layout
    }

    /// Replaces the series and clears hover, since indices no longer refer to
    /// the same days.
    pub fn set_series(&mut self, series: TimeSeries) -> ChartResult<()> {
        let layout = layout_sparkline(&series, &self.config)?;
        debug!(
            series_id = %self.config.series_id,
            previous_points = self.series.len(),
            points = series.len(),
            axis_max = layout.axis_max,
            "replace sparkline series"
        );
        self.point_xs = layout.point_xs();
        self.layout = layout;
        self.series = series;
        self.hover.on_pointer_leave();
        Ok(())
    }

    /// Handles a pointer move in client coordinates over an element laid out
    /// at `bounds`.
    pub fn pointer_move(&mut self, event: PointerEvent, bounds: ElementBounds) -> HoverState {
        match bounds.to_chart_x(event, f64::from(self.config.viewport.width)) {
            Some(x) => self.pointer_move_chart_x(x),
            None => self.hover.on_pointer_leave(),
        }
    }

    /// Handles a pointer move already expressed in chart coordinates.
    pub fn pointer_move_chart_x(&mut self, x: f64) -> HoverState {
        self.hover.on_pointer_move(x, &self.point_xs)
    }

    pub fn pointer_leave(&mut self) -> HoverState {
        self.hover.on_pointer_leave()
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipLayout> {
        let index = self.hover.state().index()?;
        tooltip_layout(&self.layout, &self.series, &self.config, index)
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        compose_sparkline_frame(&self.series, &self.config, &self.layout, self.hover.state())
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Draws into a host-owned Cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
