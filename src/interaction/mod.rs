use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Horizontal slack around the plot inside which hover stays active.
pub const DEFAULT_HOVER_TOLERANCE_PX: f64 = 10.0;

/// Two-state hover machine owned by one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { index: usize },
}

impl HoverState {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { index } => Some(index),
        }
    }

    #[must_use]
    pub fn is_hovering(self, index: usize) -> bool {
        self.index() == Some(index)
    }
}

/// Pointer position in the host's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// On-screen box the chart was laid out into, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps a client x onto a chart whose intrinsic width is `intrinsic_width`.
    ///
    /// The rendered box may be scaled relative to the intrinsic canvas, so the
    /// offset is rescaled by the width ratio. Returns `None` for a collapsed
    /// box or non-finite input.
    #[must_use]
    pub fn to_chart_x(self, event: PointerEvent, intrinsic_width: f64) -> Option<f64> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return None;
        }
        let x = (event.client_x - self.left) / self.width * intrinsic_width;
        x.is_finite().then_some(x)
    }

    /// Vertical counterpart of [`ElementBounds::to_chart_x`].
    #[must_use]
    pub fn to_chart_y(self, event: PointerEvent, intrinsic_height: f64) -> Option<f64> {
        if !(self.height.is_finite() && self.height > 0.0) {
            return None;
        }
        let y = (event.client_y - self.top) / self.height * intrinsic_height;
        y.is_finite().then_some(y)
    }
}

/// Inclusive x range where pointer movement may produce a hover target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverBand {
    pub min_x: f64,
    pub max_x: f64,
}

impl HoverBand {
    /// Plot span widened by `tolerance` on both sides.
    #[must_use]
    pub fn around(plot_left: f64, plot_right: f64, tolerance: f64) -> Self {
        Self {
            min_x: plot_left - tolerance,
            max_x: plot_right + tolerance,
        }
    }

    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

/// Index whose x is closest to `pointer_x`; the earliest index wins ties.
///
/// Linear scan: series are a few dozen samples long.
#[must_use]
pub fn nearest_index(xs: &[f64], pointer_x: f64) -> Option<usize> {
    if !pointer_x.is_finite() {
        return None;
    }
    xs.iter()
        .enumerate()
        .filter(|(_, x)| x.is_finite())
        .min_by_key(|(_, x)| OrderedFloat((**x - pointer_x).abs()))
        .map(|(idx, _)| idx)
}

/// Drives [`HoverState`] from pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTracker {
    state: HoverState,
    band: HoverBand,
}

impl HoverTracker {
    #[must_use]
    pub fn new(band: HoverBand) -> Self {
        Self {
            state: HoverState::Idle,
            band,
        }
    }

    #[must_use]
    pub fn state(self) -> HoverState {
        self.state
    }

    #[must_use]
    pub fn band(self) -> HoverBand {
        self.band
    }

    pub fn set_band(&mut self, band: HoverBand) {
        self.band = band;
    }

    /// Pointer moved to chart-space `x` over samples at `xs`.
    pub fn on_pointer_move(&mut self, x: f64, xs: &[f64]) -> HoverState {
        let next = if self.band.contains(x) {
            nearest_index(xs, x).map_or(HoverState::Idle, |index| HoverState::Hovering { index })
        } else {
            HoverState::Idle
        };
        self.transition(next)
    }

    pub fn on_pointer_leave(&mut self) -> HoverState {
        self.transition(HoverState::Idle)
    }

    fn transition(&mut self, next: HoverState) -> HoverState {
        if next != self.state {
            trace!(from = ?self.state, to = ?next, "hover transition");
            self.state = next;
        }
        self.state
    }
}
