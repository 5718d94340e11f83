//! Layer assignment and initial ordering.
//!
//! Layers come from a breadth-first traversal of the tree, so every node
//! lands on its shortest distance from the root. The traversal also records
//! which node discovered which, giving the spanning tree that the centering
//! phase walks.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::layout::{NodeLayout, context::LayoutContext};

/// Assigns a layer to every node reachable from the root.
///
/// Fills `nodes`, `index`, `layers`, `tree_children` and `parents`. Does
/// nothing beyond the parent map when the root does not resolve.
pub(crate) fn assign_layers(ctx: &mut LayoutContext<'_>) {
    let tree = ctx.tree();

    if let Some(root) = tree.root_node() {
        let mut queue = VecDeque::from([(root.id(), 0_usize, None::<usize>)]);
        let mut discovered = HashSet::from([root.id()]);
        let mut max_layer = 0;

        while let Some((id, layer, discovered_by)) = queue.pop_front() {
            let Some(node) = tree.node(id) else {
                continue;
            };

            let idx = ctx.nodes.len();
            ctx.nodes.push(NodeLayout::new(id, layer));
            ctx.index.insert(id, idx);
            ctx.tree_children.push(Vec::new());
            if let Some(parent_idx) = discovered_by {
                ctx.tree_children[parent_idx].push(idx);
            }
            max_layer = max_layer.max(layer);

            for child in node.child_links() {
                if tree.node(child).is_none() {
                    trace!(parent:% = id, child:% = child; "Skipping dangling child reference");
                    continue;
                }
                if discovered.insert(child) {
                    queue.push_back((child, layer + 1, Some(idx)));
                }
            }
        }

        // Discovery order is already sorted by layer, so each bucket keeps it.
        ctx.layers = vec![Vec::new(); max_layer + 1];
        for (idx, node) in ctx.nodes.iter().enumerate() {
            ctx.layers[node.layer()].push(idx);
        }
    }

    for node in tree.nodes() {
        for child in node.child_links() {
            if tree.node(child).is_some() {
                ctx.parents.entry(child).or_default().push(node.id());
            }
        }
    }

    debug!(
        node_count = ctx.nodes.len(),
        layer_count = ctx.layers.len(),
        unreachable = tree.len() - ctx.nodes.len();
        "Layers assigned"
    );
}

/// Seeds `order_in_layer` with each node's rank in its BFS layer list.
pub(crate) fn initialize_ordering(ctx: &mut LayoutContext<'_>) {
    for layer in &ctx.layers {
        for (order, &idx) in layer.iter().enumerate() {
            ctx.nodes[idx].set_order_in_layer(order);
        }
    }
}
