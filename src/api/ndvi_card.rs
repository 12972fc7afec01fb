use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::format::{format_count, format_fixed, format_long_date, format_percent};
use crate::core::{Assessment, BannerIcon, HealthClass, IqrSpread, NdviSummary, Tone, TrackGeometry};

/// Segments at or above this share print their percentage inside the bar.
pub const INLINE_LABEL_MIN_PCT: f64 = 6.0;
/// Concern share above which the concern stat card is highlighted.
pub const CONCERN_CARD_WARN_PCT: f64 = 10.0;
/// Largest drift of the class sum from 100 accepted without a warning.
pub const CLASS_SUM_TOLERANCE_PCT: f64 = 2.0;

pub const CARD_TITLE: &str = "NDVI Analysis";
pub const EMPTY_TITLE: &str = "No NDVI data yet.";
pub const EMPTY_DETAIL: &str = "Analytics will appear here once the first flight is processed.";
pub const DISTRIBUTION_HEADING: &str = "Vegetation health distribution";
pub const TRACK_HEADING: &str = "Value spread: p10 to p90";
pub const TRACK_AXIS_CAPTION: &str = "zoomed p10 → p90";
pub const FOOTER_TEXT: &str = "NDVI (Normalized Difference Vegetation Index) runs from −1 to 1. \
Values above 0.6 indicate active green vegetation. Concern zones are pixels below 0.2.";

/// What the card shows: the placeholder or a full model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NdviCardView {
    Empty(EmptyState),
    Ready(Box<NdviCardModel>),
}

impl NdviCardView {
    #[must_use]
    pub fn model(&self) -> Option<&NdviCardModel> {
        match self {
            NdviCardView::Empty(_) => None,
            NdviCardView::Ready(model) => Some(model),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, NdviCardView::Empty(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    pub detail: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: EMPTY_TITLE.to_owned(),
            detail: EMPTY_DETAIL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeader {
    pub title: String,
    /// Capture day formatted like `Feb 20, 2026`.
    pub captured_on: Option<String>,
    /// Pixel count formatted like `327,680 px analyzed`.
    pub pixel_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub tone: Tone,
    pub icon: BannerIcon,
}

/// How a bar segment shows its percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentLabel {
    /// Printed inside the segment.
    Inline(String),
    /// Shown in a tooltip above the segment while it is hovered.
    Hover(String),
}

/// One stacked-bar segment in percent units of the bar width.
///
/// `width_pct` is the literal class share and `start_pct` the running sum of
/// the shares before it; neither is renormalized. Layout clips the drawn span
/// at the bar's right edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub class: HealthClass,
    pub percent: f64,
    pub start_pct: f64,
    pub width_pct: f64,
    pub title: String,
    pub label: SegmentLabel,
}

impl BarSegment {
    #[must_use]
    pub fn center_pct(&self) -> f64 {
        self.start_pct + self.width_pct / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub class: HealthClass,
    pub short_label: String,
    pub percent: f64,
    pub percent_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatHighlight {
    Good,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub sub: String,
    pub highlight: Option<StatHighlight>,
}

/// Labeled marker below the percentile rail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCallout {
    pub label: String,
    pub value: f64,
    pub value_label: String,
    pub position: f64,
    pub accent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTrack {
    pub geometry: TrackGeometry,
    /// Rail positions of the p25 and p75 boundary ticks.
    pub iqr_ticks: [f64; 2],
    pub callouts: Vec<TrackCallout>,
    pub axis_low: String,
    pub axis_caption: String,
    pub axis_high: String,
    pub spread: IqrSpread,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviCardModel {
    pub header: CardHeader,
    pub banner: Banner,
    pub distribution_heading: String,
    pub segments: Vec<BarSegment>,
    pub legend: Vec<LegendEntry>,
    pub stat_cards: Vec<StatCard>,
    pub track_heading: String,
    pub track: PercentileTrack,
    pub footer: String,
}

impl NdviCardModel {
    #[must_use]
    pub fn segment(&self, class: HealthClass) -> Option<&BarSegment> {
        self.segments.iter().find(|segment| segment.class == class)
    }
}

/// Builds the card for an optional summary; no summary yields the empty state.
#[must_use]
pub fn build_ndvi_card(
    summary: Option<&NdviSummary>,
    captured_on: Option<NaiveDate>,
) -> NdviCardView {
    let Some(summary) = summary else {
        return NdviCardView::Empty(EmptyState::default());
    };

    let class_total = summary.class_pct().total();
    if (class_total - 100.0).abs() > CLASS_SUM_TOLERANCE_PCT {
        warn!(
            class_total,
            tolerance = CLASS_SUM_TOLERANCE_PCT,
            "health class percentages do not sum to 100; drawing literal values"
        );
    }

    let assessment = Assessment::derive(summary);
    let segments = build_segments(summary);
    debug!(
        count = summary.count(),
        segments = segments.len(),
        tone = ?assessment.tone,
        "build ndvi card"
    );

    NdviCardView::Ready(Box::new(NdviCardModel {
        header: CardHeader {
            title: CARD_TITLE.to_owned(),
            captured_on: captured_on.map(format_long_date),
            pixel_count: format!("{} px analyzed", format_count(summary.count())),
        },
        banner: Banner {
            icon: assessment.tone.icon(),
            tone: assessment.tone,
            text: assessment.text,
        },
        distribution_heading: DISTRIBUTION_HEADING.to_owned(),
        segments,
        legend: build_legend(summary),
        stat_cards: build_stat_cards(summary),
        track_heading: TRACK_HEADING.to_owned(),
        track: build_track(summary),
        footer: FOOTER_TEXT.to_owned(),
    }))
}

fn build_segments(summary: &NdviSummary) -> Vec<BarSegment> {
    let mut cursor = 0.0_f64;
    summary
        .class_pct()
        .iter()
        .filter(|(_, percent)| *percent > 0.0)
        .map(|(class, percent)| {
            let start_pct = cursor;
            cursor += percent;

            let title = format!("{}: {}", class.key(), format_percent(percent));
            let label = if percent >= INLINE_LABEL_MIN_PCT {
                SegmentLabel::Inline(format_percent(percent))
            } else {
                SegmentLabel::Hover(title.clone())
            };
            BarSegment {
                class,
                percent,
                start_pct,
                width_pct: percent,
                title,
                label,
            }
        })
        .collect()
}

fn build_legend(summary: &NdviSummary) -> Vec<LegendEntry> {
    HealthClass::BEST_TO_WORST
        .into_iter()
        .map(|class| {
            let percent = summary.class_pct().get(class);
            LegendEntry {
                class,
                short_label: class.short_label().to_owned(),
                percent,
                percent_label: format_percent(percent),
            }
        })
        .collect()
}

fn build_stat_cards(summary: &NdviSummary) -> Vec<StatCard> {
    let concern = summary.concern_zone_pct();
    vec![
        StatCard {
            label: "Mean NDVI".to_owned(),
            value: format_fixed(summary.mean(), 2),
            sub: format!("Median: {}", format_fixed(summary.median(), 2)),
            highlight: Some(StatHighlight::Good),
        },
        StatCard {
            label: "Std deviation".to_owned(),
            value: format!("±{}", format_fixed(summary.std(), 2)),
            sub: "Spread across field".to_owned(),
            highlight: None,
        },
        StatCard {
            label: "Concern zone".to_owned(),
            value: format_percent(concern),
            sub: "Severely stressed pixels".to_owned(),
            highlight: (concern > CONCERN_CARD_WARN_PCT).then_some(StatHighlight::Warn),
        },
    ]
}

fn build_track(summary: &NdviSummary) -> PercentileTrack {
    let geometry = TrackGeometry::from_summary(summary);
    let spread = IqrSpread::classify(summary.iqr());
    let callout = |label: &str, value: f64, position: f64, accent: bool| TrackCallout {
        label: label.to_owned(),
        value,
        value_label: format_fixed(value, 2),
        position,
        accent,
    };

    PercentileTrack {
        geometry,
        iqr_ticks: [geometry.p25, geometry.p75],
        callouts: vec![
            callout("p10", summary.p10(), geometry.p10, false),
            callout("median", summary.median(), geometry.median, true),
            callout("p90", summary.p90(), geometry.p90, false),
        ],
        axis_low: format_fixed(summary.p10(), 2),
        axis_caption: TRACK_AXIS_CAPTION.to_owned(),
        axis_high: format_fixed(summary.p90(), 2),
        spread,
        interpretation: format!(
            "80% of pixels fall between {} and {}. The green band (IQR) shows the middle 50%, spanning {}–{}, {}",
            format_fixed(summary.p10(), 2),
            format_fixed(summary.p90(), 2),
            format_fixed(summary.p25(), 2),
            format_fixed(summary.p75(), 2),
            spread.description()
        ),
    }
}
