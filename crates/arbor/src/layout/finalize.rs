//! Conversion from abstract units to world coordinates.

use log::debug;

use arbor_core::geometry::Point;

use crate::layout::{LayoutDirection, context::LayoutContext};

/// Layers with more nodes than this get extra sibling spacing.
const WIDE_LAYER_THRESHOLD: usize = 5;
const WIDE_LAYER_FACTOR: f32 = 1.3;

/// Trees with more layers than this get extra depth spacing.
const DEEP_TREE_THRESHOLD: usize = 5;
const DEEP_TREE_FACTOR: f32 = 1.2;

/// Scales abstract positions into world space and applies the direction.
#[derive(Debug, Clone)]
pub(crate) struct CoordinateFinalizer {
    spacing_x: f32,
    spacing_y: f32,
    direction: LayoutDirection,
}

impl CoordinateFinalizer {
    /// Create a finalizer
    ///
    /// `spacing_x` separates siblings, `spacing_y` separates layers. Both are
    /// expected to be finite; the engine sanitizes them beforehand.
    pub(crate) fn new(spacing_x: f32, spacing_y: f32, direction: LayoutDirection) -> Self {
        Self {
            spacing_x,
            spacing_y,
            direction,
        }
    }

    /// Spacing after the adaptive multipliers for the context's tree shape.
    pub(crate) fn effective_spacing(&self, ctx: &LayoutContext<'_>) -> (f32, f32) {
        let mut spacing_x = self.spacing_x;
        let mut spacing_y = self.spacing_y;
        if ctx.widest_layer() > WIDE_LAYER_THRESHOLD {
            spacing_x *= WIDE_LAYER_FACTOR;
        }
        if ctx.layer_count() > DEEP_TREE_THRESHOLD {
            spacing_y *= DEEP_TREE_FACTOR;
        }
        (spacing_x, spacing_y)
    }

    /// Rewrites every node position in world coordinates.
    pub(crate) fn finalize(&self, ctx: &mut LayoutContext<'_>) {
        let (spacing_x, spacing_y) = self.effective_spacing(ctx);
        debug!(
            spacing_x = spacing_x,
            spacing_y = spacing_y,
            direction:? = self.direction;
            "Finalizing coordinates"
        );

        for node in &mut ctx.nodes {
            let sibling_axis = node.position().x() * spacing_x;
            let depth_axis = node.layer() as f32 * spacing_y;
            let position = match self.direction {
                LayoutDirection::TopToBottom => Point::new(sibling_axis, depth_axis),
                LayoutDirection::LeftToRight => Point::new(depth_axis, sibling_axis),
            };
            node.set_position(position);
        }
    }
}
