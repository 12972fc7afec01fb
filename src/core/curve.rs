use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PlotArea};
use crate::error::ChartResult;

/// Horizontal share of the gap between neighbors used for control points.
pub const DEFAULT_CURVE_TENSION: f64 = 0.4;

/// Vertex in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One cubic Bezier piece between two adjacent samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub start: CurvePoint,
    pub control1: CurvePoint,
    pub control2: CurvePoint,
    pub end: CurvePoint,
}

/// Smoothed polyline through every projected sample.
///
/// `points` holds the N samples the curve passes through; `segments` holds
/// the N - 1 cubic pieces joining them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothCurve {
    pub points: Vec<CurvePoint>,
    pub segments: Vec<CubicSegment>,
}

/// Closed area under a smooth curve.
///
/// The outline follows the curve, drops to `baseline_y` under the last point,
/// runs back to the first point's x and closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub curve: SmoothCurve,
    pub baseline_y: f64,
}

impl AreaGeometry {
    /// The two baseline corners appended after the curve, last x first.
    #[must_use]
    pub fn baseline_corners(&self) -> Option<[CurvePoint; 2]> {
        let first = self.curve.points.first()?;
        let last = self.curve.points.last()?;
        Some([
            CurvePoint::new(last.x, self.baseline_y),
            CurvePoint::new(first.x, self.baseline_y),
        ])
    }
}

/// Projects daily values onto the plot: index `i` of `len` maps onto
/// `[plot.left, plot.right]`, values `[0, axis_max]` onto `[plot.bottom, plot.top]`.
pub fn project_daily_points(
    values: &[u64],
    axis_max: u64,
    plot: PlotArea,
) -> ChartResult<Vec<CurvePoint>> {
    debug_assert!(values.len() >= 2, "daily projection needs at least two samples");

    let x_scale = LinearScale::new(0.0, (values.len() - 1) as f64, plot.left, plot.right)?;
    let y_scale = LinearScale::new(0.0, axis_max as f64, plot.bottom, plot.top)?;

    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            Ok(CurvePoint::new(
                x_scale.domain_to_pixel(idx as f64)?,
                y_scale.domain_to_pixel(*value as f64)?,
            ))
        })
        .collect()
}

/// Joins points with cubic pieces whose control points sit `tension` of the
/// horizontal gap away from each endpoint, at that endpoint's height.
#[must_use]
pub fn smooth_curve(points: &[CurvePoint], tension: f64) -> SmoothCurve {
    let segments = points
        .windows(2)
        .map(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            let dx = next.x - prev.x;
            CubicSegment {
                start: prev,
                control1: CurvePoint::new(prev.x + dx * tension, prev.y),
                control2: CurvePoint::new(next.x - dx * tension, next.y),
                end: next,
            }
        })
        .collect();

    SmoothCurve {
        points: points.to_vec(),
        segments,
    }
}

#[must_use]
pub fn area_under(curve: SmoothCurve, baseline_y: f64) -> AreaGeometry {
    AreaGeometry { curve, baseline_y }
}
