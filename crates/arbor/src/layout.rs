//! Layered layout of behavior trees.
//!
//! The pipeline runs in six phases, each consuming the previous phase's
//! output through a per-call [`context::LayoutContext`]:
//!
//! 1. [`layering`] assigns every reachable node a BFS layer.
//! 2. [`layering`] seeds the in-layer order from discovery order.
//! 3. [`crossing`] reorders layers with the barycenter heuristic.
//! 4. [`centering`] places nodes in abstract units, parents centered over children.
//! 5. [`collision`] separates same-layer nodes that still overlap.
//! 6. [`finalize`] scales abstract units to world units and applies the direction.
//!
//! [`LayoutEngine`] drives the phases and caches the last result.
//!
//! # Preconditions
//!
//! The input is expected to be a strict tree. A node reachable through
//! several parents is laid out once, under the parent that discovers it
//! first; general DAG layout is not attempted.

mod centering;
mod collision;
mod context;
mod crossing;
mod engine;
mod finalize;
mod layering;

pub use engine::{LayoutEngine, LayoutRequest};

use serde::{Deserialize, Serialize};

use arbor_core::{
    geometry::{Point, Size},
    identifier::NodeId,
};

/// Orientation of the finished layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Root at the top, layers grow downward.
    #[default]
    TopToBottom,
    /// Root at the left, layers grow rightward.
    LeftToRight,
}

/// Layout record of a single node.
///
/// During the pipeline `position` holds abstract units; once
/// [`LayoutEngine::compute`] returns it holds world coordinates of the box
/// center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    node_id: NodeId,
    layer: usize,
    order_in_layer: usize,
    position: Point,
    size: Size,
}

impl NodeLayout {
    pub(crate) fn new(node_id: NodeId, layer: usize) -> Self {
        Self {
            node_id,
            layer,
            order_in_layer: 0,
            position: Point::default(),
            size: Size::default(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// BFS depth from the root.
    pub fn layer(&self) -> usize {
        self.layer
    }

    /// 0-based rank within the node's layer.
    pub fn order_in_layer(&self) -> usize {
        self.order_in_layer
    }

    /// Center of the node box.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Box size as supplied by the layout request.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub(crate) fn set_order_in_layer(&mut self, order: usize) {
        self.order_in_layer = order;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_x(&mut self, x: f32) {
        self.position = self.position.with_x(x);
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

/// A parent to child link of the laid-out tree, with routing anchors.
///
/// `from` sits on the parent box side facing the child and `to` on the child
/// box side facing the parent, according to the layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutEdge {
    source: NodeId,
    target: NodeId,
    from: Point,
    to: Point,
}

impl LayoutEdge {
    pub(crate) fn new(source: NodeId, target: NodeId, from: Point, to: Point) -> Self {
        Self {
            source,
            target,
            from,
            to,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }
}
