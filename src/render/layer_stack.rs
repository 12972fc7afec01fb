use serde::{Deserialize, Serialize};

/// Draw layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    Overlay,
    Crosshair,
    Axis,
    Tooltip,
}

impl CanvasLayerKind {
    /// Canonical paint order.
    pub const STACK: [CanvasLayerKind; 7] = [
        CanvasLayerKind::Background,
        CanvasLayerKind::Grid,
        CanvasLayerKind::Series,
        CanvasLayerKind::Overlay,
        CanvasLayerKind::Crosshair,
        CanvasLayerKind::Axis,
        CanvasLayerKind::Tooltip,
    ];

    #[must_use]
    pub fn stack_position(self) -> usize {
        Self::STACK
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(Self::STACK.len())
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn tooltip_paints_above_axis_labels() {
        assert!(
            CanvasLayerKind::Tooltip.stack_position() > CanvasLayerKind::Axis.stack_position()
        );
        assert!(
            CanvasLayerKind::Crosshair.stack_position() > CanvasLayerKind::Series.stack_position()
        );
        assert_eq!(CanvasLayerKind::Background.stack_position(), 0);
    }
}
