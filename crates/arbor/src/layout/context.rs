//! Working state shared by the layout phases.

use std::collections::HashMap;

use arbor_core::{identifier::NodeId, tree::Tree};

use crate::layout::NodeLayout;

/// Per-call working state of the layout pipeline.
///
/// Nodes are stored in BFS discovery order and addressed by their index in
/// `nodes`. A context is built for exactly one [`Tree`] and dropped once the
/// finished layouts have been taken out of it.
#[derive(Debug)]
pub(crate) struct LayoutContext<'t> {
    tree: &'t Tree,

    /// Layout records, indexed by discovery order.
    pub(crate) nodes: Vec<NodeLayout>,

    /// Node id to index into `nodes`.
    pub(crate) index: HashMap<NodeId, usize>,

    /// Node indices per layer, kept sorted by `order_in_layer`.
    pub(crate) layers: Vec<Vec<usize>>,

    /// Child id to the ids of every node that declares it, reachable or not.
    pub(crate) parents: HashMap<NodeId, Vec<NodeId>>,

    /// Children of each node in the BFS spanning tree. In discovery order
    /// until [`LayoutContext::sort_tree_children`] runs, in layer order after.
    pub(crate) tree_children: Vec<Vec<usize>>,
}

impl<'t> LayoutContext<'t> {
    pub(crate) fn new(tree: &'t Tree) -> Self {
        Self {
            tree,
            nodes: Vec::new(),
            index: HashMap::new(),
            layers: Vec::new(),
            parents: HashMap::new(),
            tree_children: Vec::new(),
        }
    }

    pub(crate) fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Index of the node with `id`, if it was reached from the root.
    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Index of the root node, if any node was laid out.
    pub(crate) fn root_index(&self) -> Option<usize> {
        self.layers.first().and_then(|layer| layer.first()).copied()
    }

    pub(crate) fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Size of the most populated layer.
    pub(crate) fn widest_layer(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Sorts every spanning-tree child list by `order_in_layer`.
    ///
    /// Run once ordering is final; later phases iterate the lists as they are.
    pub(crate) fn sort_tree_children(&mut self) {
        let nodes = &self.nodes;
        for children in &mut self.tree_children {
            children.sort_by_key(|&child| nodes[child].order_in_layer());
        }
    }

    /// Abstract x positions of a layer, in order.
    #[cfg(test)]
    pub(crate) fn layer_xs(&self, layer: usize) -> Vec<f32> {
        self.layers[layer]
            .iter()
            .map(|&idx| self.nodes[idx].position().x())
            .collect()
    }

    /// Node ids of a layer, in order.
    #[cfg(test)]
    pub(crate) fn layer_ids(&self, layer: usize) -> Vec<u32> {
        self.layers[layer]
            .iter()
            .map(|&idx| self.nodes[idx].node_id().value())
            .collect()
    }
}
