use serde::{Deserialize, Serialize};

use crate::core::NdviSummary;

/// IQR widths below this read as a consistent canopy.
pub const TIGHT_IQR_THRESHOLD: f64 = 0.15;

/// Position used for every marker when the p10..p90 span collapses.
pub const DEGENERATE_TRACK_POSITION: f64 = 0.5;

/// Linear rescale of `[low, high]` onto `[0, 1]`, clamped.
///
/// A collapsed or non-finite span yields [`DEGENERATE_TRACK_POSITION`]
/// instead of a non-finite position.
#[must_use]
pub fn normalize_clamped(value: f64, low: f64, high: f64) -> f64 {
    let span = high - low;
    if !(span.is_finite() && span > 0.0) {
        return DEGENERATE_TRACK_POSITION;
    }
    let position = (value - low) / span;
    if position.is_nan() {
        return DEGENERATE_TRACK_POSITION;
    }
    position.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IqrSpread {
    Tight,
    Wide,
}

impl IqrSpread {
    #[must_use]
    pub fn classify(iqr: f64) -> Self {
        if iqr < TIGHT_IQR_THRESHOLD {
            IqrSpread::Tight
        } else {
            IqrSpread::Wide
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            IqrSpread::Tight => "a tight range, indicating consistent canopy density.",
            IqrSpread::Wide => "a wider range, indicating notable variation across the field.",
        }
    }
}

/// Normalized marker positions on the zoomed `[p10, p90]` rail, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub p10: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub degenerate: bool,
}

impl TrackGeometry {
    #[must_use]
    pub fn from_summary(summary: &NdviSummary) -> Self {
        let (low, high) = (summary.p10(), summary.p90());
        let norm = |value: f64| normalize_clamped(value, low, high);
        Self {
            p10: norm(low),
            p25: norm(summary.p25()),
            median: norm(summary.median()),
            p75: norm(summary.p75()),
            p90: norm(high),
            degenerate: !(high - low > 0.0),
        }
    }

    /// Left edge of the interquartile band.
    #[must_use]
    pub fn iqr_start(self) -> f64 {
        self.p25
    }

    /// Width of the interquartile band, never negative.
    #[must_use]
    pub fn iqr_width(self) -> f64 {
        (self.p75 - self.p25).max(0.0)
    }

    #[must_use]
    pub fn positions(self) -> [f64; 5] {
        [self.p10, self.p25, self.median, self.p75, self.p90]
    }
}
