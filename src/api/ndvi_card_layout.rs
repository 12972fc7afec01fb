use serde::{Deserialize, Serialize};

use crate::core::{BannerIcon, HealthClass, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, TextVAlign,
};

use super::layout_helpers::{clamp_span, estimate_label_text_width_px, wrap_text};
use super::{
    Banner, CardHeader, EmptyState, NdviCardConfig, NdviCardModel, NdviCardView, PercentileTrack,
    SegmentLabel, StatCard,
};

const HEADER_HEIGHT_PX: f64 = 52.0;
const HEADER_CENTER_Y: f64 = 26.0;
const BANNER_PADDING_Y: f64 = 12.0;
const BANNER_FONT_PX: f64 = 14.0;
const BANNER_LINE_PX: f64 = 21.0;
const BANNER_TEXT_INDENT_PX: f64 = 26.0;
const BODY_PADDING_Y: f64 = 20.0;
const SECTION_GAP_PX: f64 = 24.0;
const HEADING_FONT_PX: f64 = 10.0;
const SEGMENT_LABEL_FONT_PX: f64 = 10.0;
const SEGMENT_TOOLTIP_HEIGHT_PX: f64 = 22.0;
const SEGMENT_TOOLTIP_GAP_PX: f64 = 8.0;
const LEGEND_FONT_PX: f64 = 12.0;
const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_ROW_PX: f64 = 20.0;
const STAT_CARD_GAP_PX: f64 = 12.0;
const CALLOUT_BLOCK_PX: f64 = 44.0;
const TRACK_FONT_PX: f64 = 9.0;
const BODY_FONT_PX: f64 = 12.0;
const BODY_LINE_PX: f64 = 18.0;
const FOOTER_FONT_PX: f64 = 11.0;
const FOOTER_LINE_PX: f64 = 17.0;
const FOOTER_PADDING_Y: f64 = 12.0;

/// Pointer target of one stacked-bar segment, in card coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentHitBox {
    pub class: HealthClass,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SegmentHitBox {
    /// Half-open horizontally so neighbors never both claim their shared edge.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Frame plus the hit boxes needed to resolve segment hover.
#[derive(Debug, Clone, PartialEq)]
pub struct NdviCardLayout {
    pub frame: RenderFrame,
    pub segment_hit_boxes: Vec<SegmentHitBox>,
}

impl NdviCardLayout {
    #[must_use]
    pub fn size(&self) -> Viewport {
        self.frame.viewport
    }

    #[must_use]
    pub fn segment_at(&self, x: f64, y: f64) -> Option<HealthClass> {
        segment_at(&self.segment_hit_boxes, x, y)
    }
}

pub(crate) fn segment_at(hit_boxes: &[SegmentHitBox], x: f64, y: f64) -> Option<HealthClass> {
    hit_boxes
        .iter()
        .find(|hit_box| hit_box.contains(x, y))
        .map(|hit_box| hit_box.class)
}

/// Lays out the card; `hovered` marks the segment under the pointer.
pub fn layout_ndvi_card(
    view: &NdviCardView,
    config: &NdviCardConfig,
    hovered: Option<HealthClass>,
) -> ChartResult<NdviCardLayout> {
    config.validate()?;
    let mut composer = CardComposer::new(config);
    match view {
        NdviCardView::Empty(empty) => composer.empty_state(empty),
        NdviCardView::Ready(model) => composer.model(model, hovered),
    }
    Ok(composer.finish())
}

/// Builds the card frame; see [`layout_ndvi_card`].
pub fn render_ndvi_card(
    view: &NdviCardView,
    config: &NdviCardConfig,
    hovered: Option<HealthClass>,
) -> ChartResult<RenderFrame> {
    Ok(layout_ndvi_card(view, config, hovered)?.frame)
}

struct CardComposer<'a> {
    config: &'a NdviCardConfig,
    frame: RenderFrame,
    hit_boxes: Vec<SegmentHitBox>,
    width: f64,
    left: f64,
    right: f64,
    cursor_y: f64,
}

impl<'a> CardComposer<'a> {
    fn new(config: &'a NdviCardConfig) -> Self {
        let width = f64::from(config.width);
        Self {
            config,
            frame: RenderFrame::new(Viewport::new(config.width, 1)),
            hit_boxes: Vec::new(),
            width,
            left: config.content_padding_px,
            right: width - config.content_padding_px,
            cursor_y: 0.0,
        }
    }

    fn content_width(&self) -> f64 {
        self.right - self.left
    }

    fn text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        if !text.text.is_empty() {
            self.frame.push_text(kind, text);
        }
    }

    fn finish(self) -> NdviCardLayout {
        let palette = &self.config.palette;
        let height = self.cursor_y.ceil().max(1.0);
        let mut frame = RenderFrame::new(Viewport::new(self.config.width, height as u32));
        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.5, 0.5, self.width - 1.0, height - 1.0, palette.card_background)
                .with_border(1.0, palette.card_border)
                .with_corner_radius(4.0),
        );
        frame.append(self.frame);
        NdviCardLayout {
            frame,
            segment_hit_boxes: self.hit_boxes,
        }
    }

    fn empty_state(&mut self, empty: &EmptyState) {
        let palette = self.config.palette;
        let center_x = self.width / 2.0;
        self.frame.push_circle(
            CanvasLayerKind::Overlay,
            CirclePrimitive::new(center_x, 56.0, 14.0, palette.card_border),
        );
        self.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                empty.title.clone(),
                center_x,
                92.0,
                14.0,
                palette.muted,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .monospace(),
        );
        let lines = wrap_text(&empty.detail, BODY_FONT_PX, self.content_width());
        for (idx, line) in lines.iter().enumerate() {
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    line.clone(),
                    center_x,
                    114.0 + idx as f64 * BODY_LINE_PX,
                    BODY_FONT_PX,
                    palette.muted,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        self.cursor_y = 114.0 + lines.len().saturating_sub(1) as f64 * BODY_LINE_PX + 40.0;
    }

    fn model(&mut self, model: &NdviCardModel, hovered: Option<HealthClass>) {
        self.header(&model.header);
        self.banner(&model.banner);
        self.cursor_y += BODY_PADDING_Y;
        self.heading(&model.distribution_heading, 24.0);
        self.stacked_bar(model, hovered);
        self.legend(model);
        self.cursor_y += SECTION_GAP_PX;
        self.stat_cards(&model.stat_cards);
        self.cursor_y += SECTION_GAP_PX;
        self.heading(&model.track_heading, 32.0);
        self.track(&model.track);
        self.cursor_y += BODY_PADDING_Y;
        self.footer(&model.footer);
    }

    fn header(&mut self, header: &CardHeader) {
        let palette = self.config.palette;
        self.frame.push_circle(
            CanvasLayerKind::Overlay,
            CirclePrimitive::new(self.left + 6.0, HEADER_CENTER_Y, 5.0, palette.leaf),
        );
        let title_x = self.left + 18.0;
        self.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                header.title.clone(),
                title_x,
                HEADER_CENTER_Y,
                14.0,
                palette.title,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle)
            .bold()
            .monospace(),
        );
        if let Some(captured_on) = &header.captured_on {
            let x = title_x + estimate_label_text_width_px(&header.title, 14.0) + 8.0;
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    captured_on.clone(),
                    x,
                    HEADER_CENTER_Y,
                    12.0,
                    palette.muted,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        self.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                header.pixel_count.clone(),
                self.right,
                HEADER_CENTER_Y,
                12.0,
                palette.muted,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle)
            .monospace(),
        );
        self.frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                0.0,
                HEADER_HEIGHT_PX,
                self.width,
                HEADER_HEIGHT_PX,
                1.0,
                palette.divider,
            ),
        );
        self.cursor_y = HEADER_HEIGHT_PX;
    }

    fn banner(&mut self, banner: &Banner) {
        let style = self.config.palette.banner_style(banner.tone);
        let lines = wrap_text(
            &banner.text,
            BANNER_FONT_PX,
            self.content_width() - BANNER_TEXT_INDENT_PX,
        );
        let height = 2.0 * BANNER_PADDING_Y + lines.len().max(1) as f64 * BANNER_LINE_PX;
        let top = self.cursor_y;

        self.frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.0, top, self.width, height, style.background),
        );
        self.frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, top + height, self.width, top + height, 1.0, style.border),
        );

        let first_line_y = top + BANNER_PADDING_Y + BANNER_LINE_PX / 2.0;
        self.frame.push_circle(
            CanvasLayerKind::Overlay,
            CirclePrimitive::new(self.left + 8.0, first_line_y, 8.0, style.icon),
        );
        let glyph = match banner.icon {
            BannerIcon::Alert => "!",
            BannerIcon::TrendingUp => "↗",
        };
        self.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                glyph,
                self.left + 8.0,
                first_line_y,
                11.0,
                Color::WHITE,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .bold(),
        );
        for (idx, line) in lines.into_iter().enumerate() {
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    line,
                    self.left + BANNER_TEXT_INDENT_PX,
                    first_line_y + idx as f64 * BANNER_LINE_PX,
                    BANNER_FONT_PX,
                    style.text,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        self.cursor_y = top + height;
    }

    fn heading(&mut self, heading: &str, advance: f64) {
        self.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                heading.to_uppercase(),
                self.left,
                self.cursor_y,
                HEADING_FONT_PX,
                self.config.palette.muted,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Top)
            .bold()
            .monospace(),
        );
        self.cursor_y += advance;
    }

    fn stacked_bar(&mut self, model: &NdviCardModel, hovered: Option<HealthClass>) {
        let config = self.config;
        let palette = config.palette;
        let bar_top = self.cursor_y;
        let bar_height = config.bar_height_px;
        let content_width = self.content_width();

        // Oversized class sums keep literal widths in the model; only the
        // drawn span stops at the bar's right edge.
        let visible: Vec<_> = model
            .segments
            .iter()
            .filter_map(|segment| {
                let start_pct = segment.start_pct.min(100.0);
                let end_pct = (segment.start_pct + segment.width_pct).min(100.0);
                (end_pct > start_pct).then_some((segment, start_pct, end_pct - start_pct))
            })
            .collect();
        let mut hover_tooltip = None;
        for (idx, &(segment, start_pct, width_pct)) in visible.iter().enumerate() {
            let x = self.left + start_pct / 100.0 * content_width;
            let full_width = width_pct / 100.0 * content_width;
            let gap = if idx + 1 < visible.len() {
                config.segment_gap_px
            } else {
                0.0
            };
            let drawn_width = (full_width - gap).max(0.0);
            let is_hovered = hovered == Some(segment.class);

            let mut fill = palette.class_style(segment.class).bar;
            if is_hovered {
                fill = fill.with_alpha(fill.alpha * config.hovered_segment_opacity);
            }
            self.frame.push_rect(
                CanvasLayerKind::Series,
                RectPrimitive::new(x, bar_top, drawn_width, bar_height, fill),
            );
            self.hit_boxes.push(SegmentHitBox {
                class: segment.class,
                x,
                y: bar_top,
                width: full_width,
                height: bar_height,
            });

            match &segment.label {
                SegmentLabel::Inline(text) => self.text(
                    CanvasLayerKind::Overlay,
                    TextPrimitive::new(
                        text.clone(),
                        x + drawn_width / 2.0,
                        bar_top + bar_height / 2.0,
                        SEGMENT_LABEL_FONT_PX,
                        palette.segment_label,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle)
                    .bold()
                    .monospace(),
                ),
                SegmentLabel::Hover(text) if is_hovered => {
                    hover_tooltip = Some((text.clone(), x + drawn_width / 2.0));
                }
                SegmentLabel::Hover(_) => {}
            }
        }

        if let Some((text, center_x)) = hover_tooltip {
            let width = estimate_label_text_width_px(&text, SEGMENT_LABEL_FONT_PX) + 16.0;
            let x = clamp_span(center_x - width / 2.0, width, 0.0, self.width);
            let y = bar_top - SEGMENT_TOOLTIP_GAP_PX - SEGMENT_TOOLTIP_HEIGHT_PX;
            self.frame.push_rect(
                CanvasLayerKind::Tooltip,
                RectPrimitive::new(
                    x,
                    y,
                    width,
                    SEGMENT_TOOLTIP_HEIGHT_PX,
                    palette.segment_tooltip_background,
                )
                .with_corner_radius(4.0),
            );
            self.text(
                CanvasLayerKind::Tooltip,
                TextPrimitive::new(
                    text,
                    x + width / 2.0,
                    y + SEGMENT_TOOLTIP_HEIGHT_PX / 2.0,
                    SEGMENT_LABEL_FONT_PX,
                    palette.segment_tooltip_text,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Middle)
                .monospace(),
            );
        }

        self.cursor_y = bar_top + bar_height + 12.0;
    }

    fn legend(&mut self, model: &NdviCardModel) {
        let palette = self.config.palette;
        let mut x = self.left;
        let mut row_top = self.cursor_y;
        for entry in &model.legend {
            let label_width = estimate_label_text_width_px(&entry.short_label, LEGEND_FONT_PX);
            let percent_width = estimate_label_text_width_px(&entry.percent_label, LEGEND_FONT_PX);
            let entry_width = LEGEND_SWATCH_PX + 6.0 + label_width + 6.0 + percent_width;
            if x > self.left && x + entry_width > self.right {
                x = self.left;
                row_top += LEGEND_ROW_PX;
            }

            let center_y = row_top + 8.0;
            let style = palette.class_style(entry.class);
            self.frame.push_rect(
                CanvasLayerKind::Series,
                RectPrimitive::new(
                    x,
                    center_y - LEGEND_SWATCH_PX / 2.0,
                    LEGEND_SWATCH_PX,
                    LEGEND_SWATCH_PX,
                    style.bar,
                )
                .with_corner_radius(2.0),
            );
            let label_x = x + LEGEND_SWATCH_PX + 6.0;
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    entry.short_label.clone(),
                    label_x,
                    center_y,
                    LEGEND_FONT_PX,
                    palette.body,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle),
            );
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    entry.percent_label.clone(),
                    label_x + label_width + 6.0,
                    center_y,
                    LEGEND_FONT_PX,
                    style.text,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle)
                .bold()
                .monospace(),
            );
            x += entry_width + 16.0;
        }
        self.cursor_y = row_top + 16.0;
    }

    fn stat_cards(&mut self, cards: &[StatCard]) {
        if cards.is_empty() {
            return;
        }
        let palette = self.config.palette;
        let count = cards.len() as f64;
        let card_width = (self.content_width() - STAT_CARD_GAP_PX * (count - 1.0)) / count;
        let height = self.config.stat_card_height_px;
        let top = self.cursor_y;

        for (idx, card) in cards.iter().enumerate() {
            let x = self.left + idx as f64 * (card_width + STAT_CARD_GAP_PX);
            let style = palette.stat_style(card.highlight);
            self.frame.push_rect(
                CanvasLayerKind::Background,
                RectPrimitive::new(x, top, card_width, height, style.background)
                    .with_border(1.0, style.border)
                    .with_corner_radius(4.0),
            );
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    card.label.to_uppercase(),
                    x + 16.0,
                    top + 20.0,
                    10.0,
                    palette.muted,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle)
                .monospace(),
            );
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    card.value.clone(),
                    x + 16.0,
                    top + height * 0.55,
                    24.0,
                    style.value,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle)
                .bold()
                .monospace(),
            );
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    card.sub.clone(),
                    x + 16.0,
                    top + height - 14.0,
                    11.0,
                    palette.muted,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        self.cursor_y = top + height;
    }

    fn track(&mut self, track: &PercentileTrack) {
        let config = self.config;
        let palette = config.palette;
        let content_width = self.content_width();
        let rail_top = self.cursor_y;
        let rail_height = config.rail_height_px;
        let rail_center = rail_top + rail_height / 2.0;
        let left = self.left;
        let at = move |position: f64| left + position * content_width;

        self.frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(self.left, rail_top, content_width, rail_height, palette.rail)
                .with_corner_radius(rail_height / 2.0),
        );
        let geometry = track.geometry;
        self.frame.push_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(
                at(geometry.iqr_start()),
                rail_top,
                geometry.iqr_width() * content_width,
                rail_height,
                palette.iqr_band,
            )
            .with_corner_radius(2.0),
        );
        for position in track.iqr_ticks {
            let x = at(position);
            self.frame.push_line(
                CanvasLayerKind::Overlay,
                LinePrimitive::new(
                    x,
                    rail_center - 8.0,
                    x,
                    rail_center + 8.0,
                    1.0,
                    palette.iqr_tick,
                ),
            );
        }
        let median_x = at(geometry.median);
        self.frame.push_line(
            CanvasLayerKind::Overlay,
            LinePrimitive::new(
                median_x,
                rail_center - 10.0,
                median_x,
                rail_center + 10.0,
                2.0,
                palette.median,
            ),
        );

        let callout_top = rail_top + rail_height + 10.0;
        for callout in &track.callouts {
            let x = at(callout.position);
            let (dot, label_color) = if callout.accent {
                (palette.callout_accent, palette.callout_accent_label)
            } else {
                (palette.callout_dot, palette.muted)
            };
            self.frame.push_circle(
                CanvasLayerKind::Overlay,
                CirclePrimitive::new(x, callout_top + 3.0, 3.0, dot),
            );
            let mut label = TextPrimitive::new(
                callout.label.clone(),
                x,
                callout_top + 16.0,
                TRACK_FONT_PX,
                label_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .monospace();
            if callout.accent {
                label = label.bold();
            }
            self.text(CanvasLayerKind::Axis, label);
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    callout.value_label.clone(),
                    x,
                    callout_top + 30.0,
                    10.0,
                    palette.emphasis,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Middle)
                .bold()
                .monospace(),
            );
        }

        let axis_y = callout_top + CALLOUT_BLOCK_PX + 10.0;
        for (text, x, align, color) in [
            (&track.axis_low, self.left, TextHAlign::Left, palette.muted),
            (
                &track.axis_caption,
                self.left + content_width / 2.0,
                TextHAlign::Center,
                palette.faint,
            ),
            (&track.axis_high, self.right, TextHAlign::Right, palette.muted),
        ] {
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(text.clone(), x, axis_y, TRACK_FONT_PX, color, align)
                    .with_v_align(TextVAlign::Middle)
                    .monospace(),
            );
        }

        self.cursor_y = axis_y + 22.0;
        let lines = wrap_text(&track.interpretation, BODY_FONT_PX, content_width);
        for (idx, line) in lines.iter().enumerate() {
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    line.clone(),
                    self.left,
                    self.cursor_y + idx as f64 * BODY_LINE_PX,
                    BODY_FONT_PX,
                    palette.muted,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Top),
            );
        }
        self.cursor_y += lines.len() as f64 * BODY_LINE_PX;
    }

    fn footer(&mut self, footer: &str) {
        let palette = self.config.palette;
        let top = self.cursor_y;
        let lines = wrap_text(footer, FOOTER_FONT_PX, self.content_width());
        let height = 2.0 * FOOTER_PADDING_Y + lines.len() as f64 * FOOTER_LINE_PX;

        self.frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.0, top, self.width, height, palette.footer_background),
        );
        self.frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, top, self.width, top, 1.0, palette.divider),
        );
        for (idx, line) in lines.into_iter().enumerate() {
            self.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    line,
                    self.left,
                    top + FOOTER_PADDING_Y + idx as f64 * FOOTER_LINE_PX,
                    FOOTER_FONT_PX,
                    palette.muted,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Top),
            );
        }
        self.cursor_y = top + height;
    }
}
