//! Parent-over-children placement in abstract units.
//!
//! A simplified Buchheim-Walker pass: leaves take one abstract unit each from
//! a cursor that runs left to right, and every internal node sits at the
//! midpoint of the span its children took. The walk is post-order over an
//! explicit stack, so each subtree ends up on its own contiguous range.

use log::{debug, trace};

use crate::layout::context::LayoutContext;

/// Abstract width reserved by one leaf.
pub(crate) const UNIT_WIDTH: f32 = 1.0;

/// Assigns abstract x coordinates to every laid-out node.
///
/// Only `position.x` is written. Children are visited in `order_in_layer`
/// order, following the BFS spanning tree recorded during layering.
pub(crate) fn place(ctx: &mut LayoutContext<'_>) {
    let Some(root) = ctx.root_index() else {
        return;
    };
    ctx.sort_tree_children();
    let extent = place_subtree(ctx, root, 0.0);
    debug!(extent = extent; "Subtrees centered");
}

/// A node whose children are still being placed.
#[derive(Debug, Clone, Copy)]
struct Frame {
    idx: usize,
    /// Cursor when the node was entered.
    start: f32,
    /// Position in `tree_children[idx]` of the next child to visit.
    next_child: usize,
}

/// Places the subtree rooted at `root` starting at `cursor`.
///
/// Walks the subtree in post-order with an explicit stack, so depth is
/// bounded by memory rather than by the call stack. Returns the cursor just
/// past the subtree's last leaf.
fn place_subtree(ctx: &mut LayoutContext<'_>, root: usize, cursor: f32) -> f32 {
    let mut cursor = cursor;
    let mut stack = vec![Frame {
        idx: root,
        start: cursor,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some(&child) = ctx.tree_children[frame.idx].get(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame {
                idx: child,
                start: cursor,
                next_child: 0,
            });
            continue;
        }

        let Frame { idx, start, .. } = *frame;
        stack.pop();
        cursor = finish_node(ctx, idx, start, cursor);
    }
    cursor
}

/// Positions `idx` once all of its children are placed.
///
/// `end` is the cursor after the last child. Returns the cursor past the node.
fn finish_node(ctx: &mut LayoutContext<'_>, idx: usize, start: f32, end: f32) -> f32 {
    if ctx.tree_children[idx].is_empty() {
        ctx.nodes[idx].set_x(start);
        return start + UNIT_WIDTH;
    }

    let center = (start + end - UNIT_WIDTH) / 2.0;
    ctx.nodes[idx].set_x(center);
    trace!(node:% = ctx.nodes[idx].node_id(), x = center; "Node centered over children");

    if center < start {
        let deficit = start - center;
        shift_subtree(ctx, idx, deficit);
        return end + deficit;
    }
    end
}

/// Moves a node and all of its spanning-tree descendants right by `delta`.
fn shift_subtree(ctx: &mut LayoutContext<'_>, idx: usize, delta: f32) {
    let mut stack = vec![idx];
    while let Some(current) = stack.pop() {
        let x = ctx.nodes[current].position().x();
        ctx.nodes[current].set_x(x + delta);
        stack.extend(ctx.tree_children[current].iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        identifier::NodeId,
        tree::{NodeKind, Tree, TreeBuilder},
    };

    use super::*;
    use crate::layout::{crossing::CrossingReducer, layering};

    fn placed(tree: &Tree) -> LayoutContext<'_> {
        let mut ctx = LayoutContext::new(tree);
        layering::assign_layers(&mut ctx);
        layering::initialize_ordering(&mut ctx);
        CrossingReducer::new(10).reduce(&mut ctx);
        place(&mut ctx);
        ctx
    }

    fn x_of(ctx: &LayoutContext<'_>, id: u32) -> f32 {
        let idx = ctx.index_of(NodeId::new(id)).unwrap();
        ctx.nodes[idx].position().x()
    }

    #[test]
    fn test_single_node_sits_at_origin() {
        let tree = TreeBuilder::new(0).leaf(0, NodeKind::Action).build().unwrap();
        let ctx = placed(&tree);
        assert_eq!(x_of(&ctx, 0), 0.0);
    }

    #[test]
    fn test_parent_centered_over_two_leaves() {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Selector, [1, 2])
            .leaf(1, NodeKind::Condition)
            .leaf(2, NodeKind::Action)
            .build()
            .unwrap();
        let ctx = placed(&tree);

        assert_eq!(x_of(&ctx, 1), 0.0);
        assert_eq!(x_of(&ctx, 2), 1.0);
        assert_eq!(x_of(&ctx, 0), 0.5);
    }

    #[test]
    fn test_decorator_sits_above_its_child() {
        let tree = TreeBuilder::new(0)
            .decorator(0, NodeKind::Inverter, 1)
            .leaf(1, NodeKind::Action)
            .build()
            .unwrap();
        let ctx = placed(&tree);
        assert_eq!(x_of(&ctx, 0), x_of(&ctx, 1));
    }

    #[test]
    fn test_subtrees_occupy_disjoint_ranges() {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Selector, [1, 2])
            .composite(1, NodeKind::Sequence, [3, 4, 5])
            .decorator(2, NodeKind::Repeater, 6)
            .leaf(3, NodeKind::Action)
            .leaf(4, NodeKind::Action)
            .leaf(5, NodeKind::Action)
            .leaf(6, NodeKind::Condition)
            .build()
            .unwrap();
        let ctx = placed(&tree);

        assert_eq!(ctx.layer_xs(2), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(x_of(&ctx, 1), 1.0);
        assert_eq!(x_of(&ctx, 2), 3.0);
        assert_eq!(x_of(&ctx, 0), 1.5);
    }

    #[test]
    fn test_parent_is_centered_over_children_span() {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Sequence, [1, 2, 3])
            .composite(1, NodeKind::Selector, [4, 5])
            .leaf(2, NodeKind::Action)
            .composite(3, NodeKind::Selector, [6, 7, 8])
            .leaf(4, NodeKind::Action)
            .leaf(5, NodeKind::Action)
            .leaf(6, NodeKind::Action)
            .leaf(7, NodeKind::Action)
            .leaf(8, NodeKind::Action)
            .build()
            .unwrap();
        let ctx = placed(&tree);

        // Children 1, 2 and 3 cover [0, 6), so the root sits at 2.5.
        assert_eq!(x_of(&ctx, 1), 0.5);
        assert_eq!(x_of(&ctx, 2), 2.0);
        assert_eq!(x_of(&ctx, 3), 4.0);
        assert_eq!(x_of(&ctx, 0), 2.5);
    }

    #[test]
    fn test_children_follow_layer_order() {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Selector, [1, 2])
            .leaf(1, NodeKind::Action)
            .leaf(2, NodeKind::Action)
            .build()
            .unwrap();
        let mut ctx = LayoutContext::new(&tree);
        layering::assign_layers(&mut ctx);
        layering::initialize_ordering(&mut ctx);

        // Swap the two leaves as a crossing pass would.
        let (left, right) = (ctx.layers[1][0], ctx.layers[1][1]);
        ctx.nodes[left].set_order_in_layer(1);
        ctx.nodes[right].set_order_in_layer(0);
        ctx.layers[1].swap(0, 1);
        place(&mut ctx);

        assert_eq!(ctx.tree_children[0], vec![right, left]);
        assert_eq!(x_of(&ctx, 2), 0.0);
        assert_eq!(x_of(&ctx, 1), 1.0);
    }

    #[test]
    fn test_deep_chain_is_placed_without_recursion() {
        let depth = 50_000;
        let tree = (0..depth)
            .fold(TreeBuilder::new(0), |builder, id| {
                builder.decorator(id, NodeKind::Inverter, id + 1)
            })
            .leaf(depth, NodeKind::Action)
            .build()
            .unwrap();
        let ctx = placed(&tree);

        assert_eq!(ctx.nodes.len(), depth as usize + 1);
        assert!(ctx.nodes.iter().all(|node| node.position().x() == 0.0));
    }

    #[test]
    fn test_shift_subtree_moves_descendants() {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Selector, [1, 2])
            .leaf(1, NodeKind::Action)
            .leaf(2, NodeKind::Action)
            .build()
            .unwrap();
        let mut ctx = placed(&tree);

        shift_subtree(&mut ctx, 0, 2.0);
        assert_eq!(x_of(&ctx, 0), 2.5);
        assert_eq!(ctx.layer_xs(1), vec![2.0, 3.0]);
    }
}
