//! Barycenter crossing reduction.
//!
//! Each pass reorders every layer by the mean rank of its neighbors in the
//! adjacent layer. Even passes sweep top to bottom using parents, odd passes
//! sweep bottom to top using children. The pass count is fixed; there is no
//! convergence check.

use log::debug;

use crate::layout::context::LayoutContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    /// Rank against parents in the layer above.
    Forward,
    /// Rank against children in the layer below.
    Backward,
}

/// Crossing reducer using the barycenter heuristic.
#[derive(Debug, Clone)]
pub(crate) struct CrossingReducer {
    passes: usize,
}

impl CrossingReducer {
    /// Create a new reducer running `passes` alternating sweeps
    pub(crate) fn new(passes: usize) -> Self {
        Self { passes }
    }

    /// Runs every pass over the context's layers.
    pub(crate) fn reduce(&self, ctx: &mut LayoutContext<'_>) {
        let layer_count = ctx.layer_count();
        if layer_count < 2 {
            return;
        }

        for pass in 0..self.passes {
            if pass % 2 == 0 {
                for layer in 1..layer_count {
                    reorder_layer(ctx, layer, Sweep::Forward);
                }
            } else {
                for layer in (0..layer_count - 1).rev() {
                    reorder_layer(ctx, layer, Sweep::Backward);
                }
            }
        }

        debug!(passes = self.passes, layer_count = layer_count; "Crossing reduction finished");
    }
}

/// Stable-sorts one layer by barycenter and rewrites the ranks.
fn reorder_layer(ctx: &mut LayoutContext<'_>, layer: usize, sweep: Sweep) {
    let mut keyed: Vec<(usize, f32)> = ctx.layers[layer]
        .iter()
        .map(|&idx| (idx, barycenter(ctx, idx, sweep)))
        .collect();

    // `sort_by` is stable, so equal barycenters keep their current order.
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (order, &(idx, _)) in keyed.iter().enumerate() {
        ctx.nodes[idx].set_order_in_layer(order);
    }
    ctx.layers[layer] = keyed.into_iter().map(|(idx, _)| idx).collect();
}

/// Mean rank of the node's laid-out neighbors, or its own rank when it has none.
fn barycenter(ctx: &LayoutContext<'_>, idx: usize, sweep: Sweep) -> f32 {
    let node = &ctx.nodes[idx];
    let id = node.node_id();

    let (sum, count) = match sweep {
        Sweep::Forward => ctx
            .parents
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|&parent| ctx.index_of(parent))
            .fold((0.0, 0_usize), |(sum, count), parent_idx| {
                (sum + ctx.nodes[parent_idx].order_in_layer() as f32, count + 1)
            }),
        Sweep::Backward => ctx
            .tree()
            .node(id)
            .into_iter()
            .flat_map(|tree_node| tree_node.child_links())
            .filter_map(|child| ctx.index_of(child))
            .fold((0.0, 0_usize), |(sum, count), child_idx| {
                (sum + ctx.nodes[child_idx].order_in_layer() as f32, count + 1)
            }),
    };

    if count == 0 {
        node.order_in_layer() as f32
    } else {
        sum / count as f32
    }
}
