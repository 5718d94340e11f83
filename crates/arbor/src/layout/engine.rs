//! Layout engine driving the pipeline phases.

use std::collections::HashMap;

use log::{debug, info, warn};

use arbor_core::{
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
    tree::Tree,
};

use crate::{
    config::LayoutConfig,
    layout::{
        LayoutDirection, LayoutEdge, NodeLayout, centering, collision::CollisionResolver,
        context::LayoutContext, crossing::CrossingReducer, finalize::CoordinateFinalizer,
        layering,
    },
};

/// Input of a single layout computation.
///
/// Borrows the tree for the duration of the call. Box sizes are not used by
/// the placement itself; they are echoed into the resulting [`NodeLayout`]s
/// and used for edge anchors and bounds.
#[derive(Debug, Clone)]
pub struct LayoutRequest<'t> {
    tree: &'t Tree,
    spacing_x: f32,
    spacing_y: f32,
    node_sizes: HashMap<NodeId, Size>,
    default_node_size: Option<Size>,
}

impl<'t> LayoutRequest<'t> {
    /// Creates a request with the given sibling and layer spacing.
    pub fn new(tree: &'t Tree, spacing_x: f32, spacing_y: f32) -> Self {
        Self {
            tree,
            spacing_x,
            spacing_y,
            node_sizes: HashMap::new(),
            default_node_size: None,
        }
    }

    /// Sets the box size of a single node.
    pub fn with_node_size(mut self, id: NodeId, size: Size) -> Self {
        self.node_sizes.insert(id, size);
        self
    }

    /// Sets the box size used for nodes without an explicit size.
    ///
    /// When unset, the engine's configured node size is used.
    pub fn with_default_node_size(mut self, size: Size) -> Self {
        self.default_node_size = Some(size);
        self
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }
}

/// Layered tree layout engine.
///
/// Each call to [`compute`](Self::compute) runs the full pipeline on a fresh
/// working context and caches only the finished result, which stays
/// available through the accessors until the next call.
///
/// # Examples
///
/// ```
/// # use arbor::{LayoutEngine, tree::{NodeKind, TreeBuilder}, identifier::NodeId};
/// let tree = TreeBuilder::new(0)
///     .composite(0, NodeKind::Selector, [1, 2])
///     .leaf(1, NodeKind::Condition)
///     .leaf(2, NodeKind::Action)
///     .build()
///     .unwrap();
///
/// let mut engine = LayoutEngine::new();
/// let layouts = engine.compute_layout(&tree, 100.0, 80.0);
/// assert_eq!(layouts.len(), 3);
///
/// let root = engine.node_layout(NodeId::new(0)).unwrap();
/// assert_eq!(root.position().x(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    direction: LayoutDirection,
    layouts: Vec<NodeLayout>,
    index: HashMap<NodeId, usize>,
    layers: Vec<Vec<NodeId>>,
    edges: Vec<LayoutEdge>,
}

impl LayoutEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Creates an engine with the given configuration.
    ///
    /// The configured direction becomes the engine's initial direction.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            direction: config.direction(),
            config,
            layouts: Vec::new(),
            index: HashMap::new(),
            layers: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Sets the direction applied by the next computation.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Lays out `tree` with the given spacing and default box sizes.
    pub fn compute_layout(&mut self, tree: &Tree, spacing_x: f32, spacing_y: f32) -> &[NodeLayout] {
        self.compute(&LayoutRequest::new(tree, spacing_x, spacing_y))
    }

    /// Runs the full layout pipeline.
    ///
    /// Returns one [`NodeLayout`] per node reachable from the root, in BFS
    /// discovery order. An empty tree or an unresolved root yields an empty
    /// slice. Previous results are discarded.
    pub fn compute(&mut self, request: &LayoutRequest<'_>) -> &[NodeLayout] {
        self.clear();

        let tree = request.tree;
        if tree.root_node().is_none() {
            if tree.is_empty() {
                debug!("Empty tree, nothing to lay out");
            } else {
                warn!(root:% = tree.root(), node_count = tree.len(); "Root node not found in tree");
            }
            return &self.layouts;
        }

        let spacing_x = sanitize_spacing("x", request.spacing_x, self.config.spacing_x());
        let spacing_y = sanitize_spacing("y", request.spacing_y, self.config.spacing_y());
        info!(
            node_count = tree.len(),
            direction:? = self.direction;
            "Computing tree layout"
        );

        let mut ctx = LayoutContext::new(tree);
        layering::assign_layers(&mut ctx);
        layering::initialize_ordering(&mut ctx);
        CrossingReducer::new(self.config.crossing_passes()).reduce(&mut ctx);
        centering::place(&mut ctx);
        CollisionResolver::new(
            self.config.collision_padding(),
            self.config.collision_iterations(),
        )
        .resolve(&mut ctx);
        CoordinateFinalizer::new(spacing_x, spacing_y, self.direction).finalize(&mut ctx);

        let default_size = request
            .default_node_size
            .unwrap_or_else(|| self.config.node_size());
        for node in &mut ctx.nodes {
            let size = request
                .node_sizes
                .get(&node.node_id())
                .copied()
                .unwrap_or(default_size);
            node.set_size(size);
        }

        self.edges = collect_edges(&ctx, self.direction);
        self.layers = ctx
            .layers
            .iter()
            .map(|layer| layer.iter().map(|&idx| ctx.nodes[idx].node_id()).collect())
            .collect();
        self.index = ctx.index;
        self.layouts = ctx.nodes;

        info!(
            laid_out = self.layouts.len(),
            layer_count = self.layers.len(),
            edge_count = self.edges.len();
            "Tree layout computed"
        );
        &self.layouts
    }

    /// Layout of the node with `id` from the last computation.
    pub fn node_layout(&self, id: NodeId) -> Option<&NodeLayout> {
        self.index.get(&id).map(|&idx| &self.layouts[idx])
    }

    /// All layouts from the last computation, in BFS discovery order.
    pub fn layouts(&self) -> &[NodeLayout] {
        &self.layouts
    }

    /// Node ids per layer, each sorted by `order_in_layer`.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Parent to child edges of the laid-out spanning tree.
    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Bounding box of every laid-out node box, or `None` when nothing was laid out.
    pub fn bounds(&self) -> Option<Bounds> {
        self.layouts
            .iter()
            .map(|node| node.position().to_bounds(node.size()))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Uniform scale factor that fits the layout into `viewport`.
    ///
    /// Returns `1.0` when there is nothing to fit or either size covers no area.
    pub fn fit_scale(&self, viewport: Size) -> f32 {
        let Some(bounds) = self.bounds() else {
            return 1.0;
        };
        let content = bounds.to_size();
        if content.is_degenerate() || viewport.is_degenerate() {
            return 1.0;
        }
        (viewport.width() / content.width()).min(viewport.height() / content.height())
    }

    fn clear(&mut self) {
        self.layouts.clear();
        self.index.clear();
        self.layers.clear();
        self.edges.clear();
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_valid_spacing(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Returns `value` when usable, otherwise the configured spacing (or zero).
fn sanitize_spacing(axis: &str, value: f32, configured: f32) -> f32 {
    if is_valid_spacing(value) {
        return value;
    }
    let fallback = if is_valid_spacing(configured) {
        configured
    } else {
        0.0
    };
    warn!(axis:% = axis, value = value, fallback = fallback; "Invalid spacing replaced");
    fallback
}

/// Builds the spanning-tree edges with anchors on the facing box sides.
///
/// Expects the child lists already sorted by centering.
fn collect_edges(ctx: &LayoutContext<'_>, direction: LayoutDirection) -> Vec<LayoutEdge> {
    let mut edges = Vec::new();
    for (parent_idx, children) in ctx.tree_children.iter().enumerate() {
        let parent = &ctx.nodes[parent_idx];
        for &child_idx in children {
            let child = &ctx.nodes[child_idx];
            let (from, to) = match direction {
                LayoutDirection::TopToBottom => (
                    parent.position().add_point(Point::new(0.0, parent.height() / 2.0)),
                    child.position().sub_point(Point::new(0.0, child.height() / 2.0)),
                ),
                LayoutDirection::LeftToRight => (
                    parent.position().add_point(Point::new(parent.width() / 2.0, 0.0)),
                    child.position().sub_point(Point::new(child.width() / 2.0, 0.0)),
                ),
            };
            edges.push(LayoutEdge::new(parent.node_id(), child.node_id(), from, to));
        }
    }
    edges
}
