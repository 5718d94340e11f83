//! The behavior-tree input model.
//!
//! A [`Tree`] is an immutable, flat collection of [`TreeNode`]s addressed by
//! [`NodeId`] plus the id of its root. It is owned by the caller and only
//! borrowed by the layout engine for the duration of one layout pass.
//!
//! Nodes come in three categories, see [`NodeCategory`]:
//!
//! - **Composite** nodes ([`NodeKind::Selector`], [`NodeKind::Sequence`]) own an
//!   ordered list of children.
//! - **Decorator** nodes ([`NodeKind::Inverter`], [`NodeKind::Repeater`]) own at
//!   most one child.
//! - **Leaf** nodes ([`NodeKind::Condition`], [`NodeKind::Action`]) own none.
//!
//! The constructors on [`TreeNode`] enforce that a node never mixes composite
//! and decorator child semantics. Child ids are *not* required to resolve:
//! dangling references are tolerated here and skipped by consumers.

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::NodeId;

/// Errors raised while assembling a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("node {id} of kind {kind} cannot be built as a {expected} node")]
    KindMismatch {
        id: NodeId,
        kind: NodeKind,
        expected: NodeCategory,
    },
}

/// Structural category of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Composite,
    Decorator,
    Leaf,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Composite => "composite",
            Self::Decorator => "decorator",
            Self::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

/// The kind of a behavior-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Selector,
    Sequence,
    Inverter,
    Repeater,
    Condition,
    Action,
}

impl NodeKind {
    /// Returns the structural category of this kind.
    pub fn category(self) -> NodeCategory {
        match self {
            Self::Selector | Self::Sequence => NodeCategory::Composite,
            Self::Inverter | Self::Repeater => NodeCategory::Decorator,
            Self::Condition | Self::Action => NodeCategory::Leaf,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Selector => "Selector",
            Self::Sequence => "Sequence",
            Self::Inverter => "Inverter",
            Self::Repeater => "Repeater",
            Self::Condition => "Condition",
            Self::Action => "Action",
        };
        f.write_str(name)
    }
}

/// A single node of a behavior tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    id: NodeId,
    kind: NodeKind,
    children: Vec<NodeId>,
    decorated: Option<NodeId>,
}

impl TreeNode {
    /// Creates a composite node with an ordered list of children.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KindMismatch`] if `kind` is not a composite kind.
    pub fn composite(
        id: NodeId,
        kind: NodeKind,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<Self, TreeError> {
        Self::expect_category(id, kind, NodeCategory::Composite)?;
        Ok(Self {
            id,
            kind,
            children: children.into_iter().collect(),
            decorated: None,
        })
    }

    /// Creates a decorator node wrapping at most one child.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KindMismatch`] if `kind` is not a decorator kind.
    pub fn decorator(
        id: NodeId,
        kind: NodeKind,
        child: Option<NodeId>,
    ) -> Result<Self, TreeError> {
        Self::expect_category(id, kind, NodeCategory::Decorator)?;
        Ok(Self {
            id,
            kind,
            children: Vec::new(),
            decorated: child,
        })
    }

    /// Creates a leaf node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KindMismatch`] if `kind` is not a leaf kind.
    pub fn leaf(id: NodeId, kind: NodeKind) -> Result<Self, TreeError> {
        Self::expect_category(id, kind, NodeCategory::Leaf)?;
        Ok(Self {
            id,
            kind,
            children: Vec::new(),
            decorated: None,
        })
    }

    fn expect_category(
        id: NodeId,
        kind: NodeKind,
        expected: NodeCategory,
    ) -> Result<(), TreeError> {
        if kind.category() == expected {
            Ok(())
        } else {
            Err(TreeError::KindMismatch { id, kind, expected })
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Ordered children of a composite node; empty for other kinds.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The wrapped child of a decorator node.
    pub fn decorated_child(&self) -> Option<NodeId> {
        self.decorated
    }

    /// All declared child links, in order, regardless of node category.
    ///
    /// Ids are yielded as declared; they may not resolve in the owning tree.
    pub fn child_links(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().copied().chain(self.decorated)
    }

    /// Returns true if the node declares no child links at all.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.decorated.is_none()
    }
}

/// An immutable behavior tree: a root id and a flat collection of nodes.
///
/// Nodes keep their insertion order, which makes every scan over the tree
/// deterministic.
#[derive(Debug, Clone)]
pub struct Tree {
    root: NodeId,
    nodes: IndexMap<NodeId, TreeNode>,
}

impl Tree {
    /// Creates a tree from its root id and nodes.
    ///
    /// The root id does not need to resolve; such a tree lays out as empty.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateNode`] if two nodes share an id.
    pub fn new(
        root: NodeId,
        nodes: impl IntoIterator<Item = TreeNode>,
    ) -> Result<Self, TreeError> {
        let mut map = IndexMap::new();
        for node in nodes {
            let id = node.id();
            if map.insert(id, node).is_some() {
                return Err(TreeError::DuplicateNode(id));
            }
        }
        trace!(root:% = root, node_count = map.len(); "Tree assembled");
        Ok(Self { root, nodes: map })
    }

    /// Returns the id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root node, if the root id resolves.
    pub fn root_node(&self) -> Option<&TreeNode> {
        self.nodes.get(&self.root)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Returns the number of nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental builder for [`Tree`].
///
/// The first construction error is kept and reported by [`TreeBuilder::build`],
/// so nodes can be chained without checking every step.
///
/// # Examples
///
/// ```
/// use arbor_core::tree::{NodeKind, TreeBuilder};
///
/// let tree = TreeBuilder::new(0)
///     .composite(0, NodeKind::Selector, [1, 2])
///     .leaf(1, NodeKind::Condition)
///     .leaf(2, NodeKind::Action)
///     .build()
///     .expect("valid tree");
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.root_node().map(|node| node.children().len()), Some(2));
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    root: NodeId,
    nodes: Vec<TreeNode>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    /// Starts a tree rooted at `root`.
    pub fn new(root: u32) -> Self {
        Self {
            root: NodeId::new(root),
            nodes: Vec::new(),
            error: None,
        }
    }

    /// Adds an already constructed node.
    pub fn node(mut self, node: TreeNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a composite node.
    pub fn composite(
        self,
        id: u32,
        kind: NodeKind,
        children: impl IntoIterator<Item = u32>,
    ) -> Self {
        let children = children.into_iter().map(NodeId::new);
        let node = TreeNode::composite(NodeId::new(id), kind, children);
        self.push(node)
    }

    /// Adds a decorator node wrapping `child`.
    pub fn decorator(self, id: u32, kind: NodeKind, child: u32) -> Self {
        let node = TreeNode::decorator(NodeId::new(id), kind, Some(NodeId::new(child)));
        self.push(node)
    }

    /// Adds a leaf node.
    pub fn leaf(self, id: u32, kind: NodeKind) -> Self {
        let node = TreeNode::leaf(NodeId::new(id), kind);
        self.push(node)
    }

    fn push(mut self, node: Result<TreeNode, TreeError>) -> Self {
        match node {
            Ok(node) => self.nodes.push(node),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Returns the first node construction error, or
    /// [`TreeError::DuplicateNode`] if two nodes share an id.
    pub fn build(self) -> Result<Tree, TreeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Tree::new(self.root, self.nodes)
    }
}
