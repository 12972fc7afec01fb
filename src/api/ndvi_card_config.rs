use serde::{Deserialize, Serialize};

use crate::core::{HealthClass, Tone};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::StatHighlight;

const SLATE_50: Color = Color::rgb8(0xf8, 0xfa, 0xfc);
const SLATE_100: Color = Color::rgb8(0xf1, 0xf5, 0xf9);
const SLATE_200: Color = Color::rgb8(0xe2, 0xe8, 0xf0);
const SLATE_300: Color = Color::rgb8(0xcb, 0xd5, 0xe1);
const SLATE_400: Color = Color::rgb8(0x94, 0xa3, 0xb8);
const SLATE_500: Color = Color::rgb8(0x64, 0x74, 0x8b);
const SLATE_600: Color = Color::rgb8(0x47, 0x55, 0x69);
const SLATE_700: Color = Color::rgb8(0x33, 0x41, 0x55);
const SLATE_900: Color = Color::rgb8(0x0f, 0x17, 0x2a);
const GREEN_50: Color = Color::rgb8(0xf0, 0xfd, 0xf4);
const GREEN_100: Color = Color::rgb8(0xdc, 0xfc, 0xe7);
const GREEN_200: Color = Color::rgb8(0xbb, 0xf7, 0xd0);
const GREEN_400: Color = Color::rgb8(0x4a, 0xde, 0x80);
const GREEN_600: Color = Color::rgb8(0x16, 0xa3, 0x4a);
const GREEN_700: Color = Color::rgb8(0x15, 0x80, 0x3d);
const GREEN_800: Color = Color::rgb8(0x16, 0x65, 0x34);
const AMBER_50: Color = Color::rgb8(0xff, 0xfb, 0xeb);
const AMBER_100: Color = Color::rgb8(0xfe, 0xf3, 0xc7);
const AMBER_500: Color = Color::rgb8(0xf5, 0x9e, 0x0b);
const AMBER_800: Color = Color::rgb8(0x92, 0x40, 0x0e);
const RED_50: Color = Color::rgb8(0xfe, 0xf2, 0xf2);
const RED_100: Color = Color::rgb8(0xfe, 0xe2, 0xe2);
const RED_500: Color = Color::rgb8(0xef, 0x44, 0x44);
const RED_600: Color = Color::rgb8(0xdc, 0x26, 0x26);
const ORANGE_400: Color = Color::rgb8(0xfb, 0x92, 0x3c);
const ORANGE_500: Color = Color::rgb8(0xf9, 0x73, 0x16);
const YELLOW_400: Color = Color::rgb8(0xfa, 0xcc, 0x15);
const YELLOW_600: Color = Color::rgb8(0xca, 0x8a, 0x04);

/// Bar/swatch color and legend text color of one health class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthClassStyle {
    pub bar: Color,
    pub text: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BannerStyle {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub icon: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatCardStyle {
    pub background: Color,
    pub border: Color,
    pub value: Color,
}

/// Every color the NDVI card draws with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NdviPalette {
    /// Worst to best, same order as [`HealthClass::WORST_TO_BEST`].
    pub classes: [HealthClassStyle; 5],
    pub banner_warn: BannerStyle,
    pub banner_good: BannerStyle,
    pub banner_neutral: BannerStyle,
    pub stat_warn: StatCardStyle,
    pub stat_good: StatCardStyle,
    pub stat_plain: StatCardStyle,
    pub card_background: Color,
    pub card_border: Color,
    pub divider: Color,
    pub footer_background: Color,
    pub title: Color,
    pub muted: Color,
    pub faint: Color,
    pub body: Color,
    pub emphasis: Color,
    pub rail: Color,
    pub iqr_band: Color,
    pub iqr_tick: Color,
    pub median: Color,
    pub callout_accent: Color,
    pub callout_accent_label: Color,
    pub callout_dot: Color,
    pub segment_label: Color,
    pub segment_tooltip_background: Color,
    pub segment_tooltip_text: Color,
    pub leaf: Color,
}

impl Default for NdviPalette {
    fn default() -> Self {
        let style = |bar, text| HealthClassStyle { bar, text };
        Self {
            classes: [
                style(RED_500, RED_600),
                style(ORANGE_400, ORANGE_500),
                style(YELLOW_400, YELLOW_600),
                style(GREEN_400, GREEN_600),
                style(GREEN_600, GREEN_700),
            ],
            banner_warn: BannerStyle {
                background: AMBER_50,
                border: AMBER_100,
                text: AMBER_800,
                icon: AMBER_500,
            },
            banner_good: BannerStyle {
                background: GREEN_50,
                border: GREEN_100,
                text: GREEN_800,
                icon: GREEN_600,
            },
            banner_neutral: BannerStyle {
                background: SLATE_50,
                border: SLATE_100,
                text: SLATE_700,
                icon: GREEN_600,
            },
            stat_warn: StatCardStyle {
                background: RED_50,
                border: RED_100,
                value: RED_600,
            },
            stat_good: StatCardStyle {
                background: GREEN_50,
                border: GREEN_100,
                value: GREEN_700,
            },
            stat_plain: StatCardStyle {
                background: Color::WHITE,
                border: SLATE_200,
                value: SLATE_900,
            },
            card_background: Color::WHITE,
            card_border: SLATE_200,
            divider: SLATE_100,
            footer_background: SLATE_50.with_alpha(0.6),
            title: SLATE_900,
            muted: SLATE_400,
            faint: SLATE_300,
            body: SLATE_500,
            emphasis: SLATE_600,
            rail: SLATE_100,
            iqr_band: GREEN_200,
            iqr_tick: GREEN_400.with_alpha(0.6),
            median: GREEN_600,
            callout_accent: GREEN_600,
            callout_accent_label: GREEN_700,
            callout_dot: SLATE_300,
            segment_label: Color::WHITE.with_alpha(0.9),
            segment_tooltip_background: SLATE_900,
            segment_tooltip_text: Color::WHITE,
            leaf: GREEN_600,
        }
    }
}

impl NdviPalette {
    #[must_use]
    pub fn class_style(&self, class: HealthClass) -> HealthClassStyle {
        let slot = HealthClass::WORST_TO_BEST
            .iter()
            .position(|candidate| *candidate == class)
            .unwrap_or_default();
        self.classes[slot]
    }

    #[must_use]
    pub fn banner_style(&self, tone: Tone) -> BannerStyle {
        match tone {
            Tone::Warn => self.banner_warn,
            Tone::Good => self.banner_good,
            Tone::Neutral => self.banner_neutral,
        }
    }

    #[must_use]
    pub fn stat_style(&self, highlight: Option<StatHighlight>) -> StatCardStyle {
        match highlight {
            Some(StatHighlight::Warn) => self.stat_warn,
            Some(StatHighlight::Good) => self.stat_good,
            None => self.stat_plain,
        }
    }

    fn colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = self
            .classes
            .iter()
            .flat_map(|style| [style.bar, style.text])
            .collect();
        for banner in [self.banner_warn, self.banner_good, self.banner_neutral] {
            colors.extend([banner.background, banner.border, banner.text, banner.icon]);
        }
        for stat in [self.stat_warn, self.stat_good, self.stat_plain] {
            colors.extend([stat.background, stat.border, stat.value]);
        }
        colors.extend([
            self.card_background,
            self.card_border,
            self.divider,
            self.footer_background,
            self.title,
            self.muted,
            self.faint,
            self.body,
            self.emphasis,
            self.rail,
            self.iqr_band,
            self.iqr_tick,
            self.median,
            self.callout_accent,
            self.callout_accent_label,
            self.callout_dot,
            self.segment_label,
            self.segment_tooltip_background,
            self.segment_tooltip_text,
            self.leaf,
        ]);
        colors
    }
}

/// Serializable NDVI card setup. Heights of text blocks follow the content,
/// so only the width is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviCardConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_content_padding_px")]
    pub content_padding_px: f64,
    #[serde(default = "default_bar_height_px")]
    pub bar_height_px: f64,
    #[serde(default = "default_segment_gap_px")]
    pub segment_gap_px: f64,
    #[serde(default = "default_hovered_segment_opacity")]
    pub hovered_segment_opacity: f64,
    #[serde(default = "default_rail_height_px")]
    pub rail_height_px: f64,
    #[serde(default = "default_stat_card_height_px")]
    pub stat_card_height_px: f64,
    #[serde(default)]
    pub palette: NdviPalette,
}

impl Default for NdviCardConfig {
    fn default() -> Self {
        Self::new(default_width())
    }
}

impl NdviCardConfig {
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width,
            content_padding_px: default_content_padding_px(),
            bar_height_px: default_bar_height_px(),
            segment_gap_px: default_segment_gap_px(),
            hovered_segment_opacity: default_hovered_segment_opacity(),
            rail_height_px: default_rail_height_px(),
            stat_card_height_px: default_stat_card_height_px(),
            palette: NdviPalette::default(),
        }
    }

    #[must_use]
    pub fn with_content_padding_px(mut self, padding: f64) -> Self {
        self.content_padding_px = padding;
        self
    }

    #[must_use]
    pub fn with_bar_height_px(mut self, height: f64) -> Self {
        self.bar_height_px = height;
        self
    }

    #[must_use]
    pub fn with_hovered_segment_opacity(mut self, opacity: f64) -> Self {
        self.hovered_segment_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: NdviPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Width available to the bar, rail and stat cards.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        f64::from(self.width) - 2.0 * self.content_padding_px
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("content padding", self.content_padding_px),
            ("segment gap", self.segment_gap_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("bar height", self.bar_height_px),
            ("rail height", self.rail_height_px),
            ("stat card height", self.stat_card_height_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !(self.hovered_segment_opacity.is_finite()
            && (0.0..=1.0).contains(&self.hovered_segment_opacity))
        {
            return Err(ChartError::InvalidData(
                "hovered segment opacity must be in [0, 1]".to_owned(),
            ));
        }
        if self.content_width() < MIN_CONTENT_WIDTH_PX {
            return Err(ChartError::InvalidData(format!(
                "card width {} leaves less than {MIN_CONTENT_WIDTH_PX}px of content",
                self.width
            )));
        }
        for color in self.palette.colors() {
            color.validate()?;
        }
        Ok(())
    }
}

const MIN_CONTENT_WIDTH_PX: f64 = 240.0;

fn default_width() -> u32 {
    640
}

fn default_content_padding_px() -> f64 {
    24.0
}

fn default_bar_height_px() -> f64 {
    32.0
}

fn default_segment_gap_px() -> f64 {
    1.0
}

fn default_hovered_segment_opacity() -> f64 {
    0.85
}

fn default_rail_height_px() -> f64 {
    12.0
}

fn default_stat_card_height_px() -> f64 {
    84.0
}
