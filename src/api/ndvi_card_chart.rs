use tracing::{debug, trace};

use crate::core::{HealthClass, Viewport};
use crate::error::ChartResult;
use crate::interaction::{ElementBounds, PointerEvent};
use crate::render::{RenderFrame, Renderer};
#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::ndvi_card_layout::segment_at;
use super::{NdviCardConfig, NdviCardView, SegmentHitBox, layout_ndvi_card};

/// Interactive NDVI card: tracks which bar segment the pointer is over.
#[derive(Debug)]
pub struct NdviCard<R: Renderer> {
    renderer: R,
    config: NdviCardConfig,
    view: NdviCardView,
    segment_hit_boxes: Vec<SegmentHitBox>,
    size: Viewport,
    hovered: Option<HealthClass>,
}

impl<R: Renderer> NdviCard<R> {
    pub fn new(renderer: R, view: NdviCardView, config: NdviCardConfig) -> ChartResult<Self> {
        let layout = layout_ndvi_card(&view, &config, None)?;
        debug!(
            empty = view.is_empty(),
            width = layout.size().width,
            height = layout.size().height,
            segments = layout.segment_hit_boxes.len(),
            "create ndvi card"
        );
        Ok(Self {
            renderer,
            config,
            view,
            size: layout.size(),
            segment_hit_boxes: layout.segment_hit_boxes,
            hovered: None,
        })
    }

    #[must_use]
    pub fn view(&self) -> &NdviCardView {
        &self.view
    }

    #[must_use]
    pub fn config(&self) -> &NdviCardConfig {
        &self.config
    }

    /// Card size; the height follows the wrapped text blocks.
    #[must_use]
    pub fn size(&self) -> Viewport {
        self.size
    }

    #[must_use]
    pub fn segment_hit_boxes(&self) -> &[SegmentHitBox] {
        &self.segment_hit_boxes
    }

    #[must_use]
    pub fn hovered_segment(&self) -> Option<HealthClass> {
        self.hovered
    }

    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        bounds: ElementBounds,
    ) -> Option<HealthClass> {
        let x = bounds.to_chart_x(event, f64::from(self.size.width));
        let y = bounds.to_chart_y(event, f64::from(self.size.height));
        match (x, y) {
            (Some(x), Some(y)) => self.pointer_move_chart(x, y),
            _ => self.pointer_leave(),
        }
    }

    pub fn pointer_move_chart(&mut self, x: f64, y: f64) -> Option<HealthClass> {
        self.set_hovered(segment_at(&self.segment_hit_boxes, x, y))
    }

    pub fn pointer_leave(&mut self) -> Option<HealthClass> {
        self.set_hovered(None)
    }

    fn set_hovered(&mut self, next: Option<HealthClass>) -> Option<HealthClass> {
        if next != self.hovered {
            trace!(from = ?self.hovered, to = ?next, "segment hover transition");
            self.hovered = next;
        }
        self.hovered
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        Ok(layout_ndvi_card(&self.view, &self.config, self.hovered)?.frame)
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
