//! TOML tree documents.
//!
//! A document names the root and lists every node as a `[[nodes]]` table:
//!
//! ```toml
//! root = 0
//!
//! [[nodes]]
//! id = 0
//! kind = "selector"
//! children = [1, 2]
//!
//! [[nodes]]
//! id = 1
//! kind = "inverter"
//! child = 2
//! width = 80.0
//! height = 30.0
//!
//! [[nodes]]
//! id = 2
//! kind = "action"
//! ```
//!
//! Problems are reported as [`ArborError::Parse`] carrying the source and a
//! byte span (the offending node's `id` value for structural problems), so
//! callers can show a snippet.

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
};

use log::debug;
use serde::Deserialize;
use toml::Spanned;

use arbor_core::{
    geometry::Size,
    identifier::NodeId,
    tree::{NodeCategory, NodeKind, Tree, TreeNode},
};

use crate::error::ArborError;

/// A parsed tree plus the optional per-node box sizes it declares.
#[derive(Debug, Clone)]
pub struct TreeDocument {
    tree: Tree,
    node_sizes: HashMap<NodeId, Size>,
}

impl TreeDocument {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Box sizes declared in the document, keyed by node id.
    pub fn node_sizes(&self) -> &HashMap<NodeId, Size> {
        &self.node_sizes
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    root: u32,
    #[serde(default)]
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: Spanned<u32>,
    kind: NodeKind,
    #[serde(default)]
    children: Vec<u32>,
    child: Option<u32>,
    width: Option<f32>,
    height: Option<f32>,
}

impl RawNode {
    fn id(&self) -> NodeId {
        NodeId::new(*self.id.get_ref())
    }

    fn to_tree_node(&self) -> Result<TreeNode, String> {
        let id = self.id();
        let node = match self.kind.category() {
            NodeCategory::Composite => {
                if self.child.is_some() {
                    return Err(format!(
                        "node {id}: {} is a composite, use `children` instead of `child`",
                        self.kind
                    ));
                }
                let children = self.children.iter().copied().map(NodeId::new);
                TreeNode::composite(id, self.kind, children)
            }
            NodeCategory::Decorator => {
                if !self.children.is_empty() {
                    return Err(format!(
                        "node {id}: {} is a decorator, use `child` instead of `children`",
                        self.kind
                    ));
                }
                TreeNode::decorator(id, self.kind, self.child.map(NodeId::new))
            }
            NodeCategory::Leaf => {
                if self.child.is_some() || !self.children.is_empty() {
                    return Err(format!(
                        "node {id}: {} is a leaf and takes no children",
                        self.kind
                    ));
                }
                TreeNode::leaf(id, self.kind)
            }
        };
        node.map_err(|err| err.to_string())
    }

    fn size(&self) -> Result<Option<Size>, String> {
        let id = self.id();
        match (self.width, self.height) {
            (None, None) => Ok(None),
            (Some(width), Some(height)) => {
                let valid = |v: f32| v.is_finite() && v >= 0.0;
                if valid(width) && valid(height) {
                    Ok(Some(Size::new(width, height)))
                } else {
                    Err(format!(
                        "node {id}: width and height must be finite and non-negative"
                    ))
                }
            }
            _ => Err(format!("node {id}: `width` and `height` must be given together")),
        }
    }
}

/// Parses a tree document.
///
/// # Errors
///
/// Returns [`ArborError::Parse`] for TOML syntax errors, unknown node kinds,
/// children declared on the wrong node category, invalid box sizes and
/// duplicate node ids.
pub fn parse(source: &str) -> Result<TreeDocument, ArborError> {
    let raw: RawDocument = toml::from_str(source).map_err(|err| {
        ArborError::new_parse_error(err.message().trim_end(), source, err.span())
    })?;

    let error = |message: String, span: Range<usize>| {
        ArborError::new_parse_error(message, source, Some(span))
    };

    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(raw.nodes.len());
    let mut node_sizes = HashMap::new();
    for raw_node in &raw.nodes {
        let id = raw_node.id();
        let span = raw_node.id.span();
        if !seen.insert(id) {
            return Err(error(format!("duplicate node id {id}"), span));
        }

        nodes.push(raw_node.to_tree_node().map_err(|msg| error(msg, span.clone()))?);
        if let Some(size) = raw_node.size().map_err(|msg| error(msg, span))? {
            node_sizes.insert(id, size);
        }
    }

    let tree = Tree::new(NodeId::new(raw.root), nodes)?;
    debug!(
        root:% = tree.root(),
        node_count = tree.len(),
        sized_nodes = node_sizes.len();
        "Tree document parsed"
    );

    Ok(TreeDocument { tree, node_sizes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(source: &str) -> (String, Option<Range<usize>>) {
        match parse(source) {
            Err(ArborError::Parse { message, span, .. }) => (message, span),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_full_document() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "selector"
children = [1, 2]

[[nodes]]
id = 1
kind = "inverter"
child = 3
width = 80.0
height = 30.0

[[nodes]]
id = 2
kind = "action"

[[nodes]]
id = 3
kind = "condition"
"#;
        let document = parse(source).unwrap();
        let tree = document.tree();

        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.len(), 4);
        assert_eq!(
            tree.node(NodeId::new(0)).unwrap().children(),
            &[NodeId::new(1), NodeId::new(2)]
        );
        assert_eq!(
            tree.node(NodeId::new(1)).unwrap().decorated_child(),
            Some(NodeId::new(3))
        );
        assert_eq!(
            document.node_sizes().get(&NodeId::new(1)),
            Some(&Size::new(80.0, 30.0))
        );
        assert!(!document.node_sizes().contains_key(&NodeId::new(2)));
    }

    #[test]
    fn test_document_without_nodes_is_empty() {
        let document = parse("root = 3").unwrap();
        assert!(document.tree().is_empty());
    }

    #[test]
    fn test_dangling_children_are_accepted() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "sequence"
children = [1, 42]

[[nodes]]
id = 1
kind = "action"
"#;
        let document = parse(source).unwrap();
        assert_eq!(document.tree().len(), 2);
    }

    #[test]
    fn test_syntax_error_has_span() {
        let (_, span) = parse_error("root = ");
        assert!(span.is_some());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "parallel"
"#;
        let (message, span) = parse_error(source);
        assert!(message.contains("parallel"));
        assert!(span.is_some());
    }

    #[test]
    fn test_children_on_decorator_are_rejected() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "repeater"
children = [1]
"#;
        let (message, span) = parse_error(source);
        assert!(message.contains("decorator"));
        assert_eq!(&source[span.unwrap()], "0");
    }

    #[test]
    fn test_child_on_leaf_is_rejected() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "action"
child = 1
"#;
        let (message, _) = parse_error(source);
        assert!(message.contains("leaf"));
    }

    #[test]
    fn test_duplicate_id_points_at_second_node() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "action"

[[nodes]]
id = 0
kind = "condition"
"#;
        let (message, span) = parse_error(source);
        assert_eq!(message, "duplicate node id #0");
        let span = span.unwrap();
        assert_eq!(&source[span.clone()], "0");
        assert!(span.start > source.find("kind = \"action\"").unwrap());
    }

    #[test]
    fn test_partial_size_is_rejected() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "action"
width = 10.0
"#;
        let (message, _) = parse_error(source);
        assert!(message.contains("together"));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let source = r#"
root = 0

[[nodes]]
id = 0
kind = "action"
width = -10.0
height = 5.0
"#;
        let (message, _) = parse_error(source);
        assert!(message.contains("non-negative"));
    }
}
