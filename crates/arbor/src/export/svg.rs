//! SVG preview export.
//!
//! Draws every node as a rounded box labeled with its kind and id, and every
//! spanning-tree edge as a straight line between its anchors. The document is
//! sized to the layout bounds plus a fixed margin.

use log::debug;
use svg::{
    Document,
    node::element::{Group, Line, Rectangle, Text},
};

use arbor_core::{
    geometry::{Bounds, Insets},
    tree::Tree,
};

use super::Exporter;
use crate::{
    config::StyleConfig,
    error::ArborError,
    layout::{LayoutEdge, LayoutEngine, NodeLayout},
};

const MARGIN: f32 = 20.0;
const FONT_FAMILY: &str = "Arial";
const FONT_SIZE: f32 = 12.0;

const DEFAULT_FILL: &str = "white";
const DEFAULT_STROKE: &str = "black";

/// SVG exporter with colors resolved from a [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<String>,
    fill: String,
    stroke: String,
}

impl SvgExporter {
    /// Creates an exporter using the colors of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if a configured color does not parse.
    pub fn new(style: &StyleConfig) -> Result<Self, ArborError> {
        Ok(Self {
            background: style.background_color()?.map(|color| color.to_string()),
            fill: style
                .node_fill_color()?
                .map_or_else(|| DEFAULT_FILL.to_string(), |color| color.to_string()),
            stroke: style
                .stroke_color()?
                .map_or_else(|| DEFAULT_STROKE.to_string(), |color| color.to_string()),
        })
    }

    fn render_background(&self, bounds: Bounds) -> Option<Rectangle> {
        self.background.as_ref().map(|color| {
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", color.as_str())
        })
    }

    fn render_edge(&self, edge: &LayoutEdge) -> Line {
        Line::new()
            .set("x1", edge.from().x())
            .set("y1", edge.from().y())
            .set("x2", edge.to().x())
            .set("y2", edge.to().y())
            .set("stroke", self.stroke.as_str())
            .set("stroke-width", 1.5)
    }

    fn render_node(&self, tree: &Tree, node: &NodeLayout) -> Group {
        let top_left = node.position().to_bounds(node.size()).min_point();
        let label = match tree.node(node.node_id()) {
            Some(tree_node) => format!("{} {}", tree_node.kind(), node.node_id()),
            None => node.node_id().to_string(),
        };

        let rect = Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", node.width())
            .set("height", node.height())
            .set("rx", 4.0)
            .set("fill", self.fill.as_str())
            .set("stroke", self.stroke.as_str());
        let text = Text::new(label)
            .set("x", node.position().x())
            .set("y", node.position().y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", FONT_SIZE);

        Group::new()
            .set("data-node-id", node.node_id().value())
            .add(rect)
            .add(text)
    }
}

impl Exporter for SvgExporter {
    fn export(&self, tree: &Tree, engine: &LayoutEngine) -> Result<String, ArborError> {
        let bounds = engine
            .bounds()
            .unwrap_or_default()
            .add_padding(Insets::uniform(MARGIN));

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if let Some(background) = self.render_background(bounds) {
            doc = doc.add(background);
        }

        let edges = engine
            .edges()
            .iter()
            .fold(Group::new(), |group, edge| group.add(self.render_edge(edge)));
        let nodes = engine
            .layouts()
            .iter()
            .fold(Group::new(), |group, node| group.add(self.render_node(tree, node)));
        doc = doc.add(edges).add(nodes);

        debug!(
            nodes = engine.layouts().len(),
            edges = engine.edges().len(),
            width = bounds.width(),
            height = bounds.height();
            "SVG preview rendered"
        );
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::tree::{NodeKind, TreeBuilder};

    use super::*;

    fn computed() -> (Tree, LayoutEngine) {
        let tree = TreeBuilder::new(0)
            .composite(0, NodeKind::Selector, [1, 2])
            .leaf(1, NodeKind::Condition)
            .leaf(2, NodeKind::Action)
            .build()
            .unwrap();
        let mut engine = LayoutEngine::new();
        engine.compute_layout(&tree, 100.0, 80.0);
        (tree, engine)
    }

    #[test]
    fn test_svg_contains_nodes_and_edges() {
        let (tree, engine) = computed();
        let svg = SvgExporter::new(&StyleConfig::default())
            .unwrap()
            .export(&tree, &engine)
            .unwrap();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("Selector #0"));
        assert!(svg.contains("Action #2"));
        // Bounds are [-50, 150] x [-20, 100] before the margin.
        assert!(svg.contains(r#"viewBox="-70 -40 240 160""#));
    }

    #[test]
    fn test_background_is_drawn_when_configured() {
        let (tree, engine) = computed();
        let style: StyleConfig = toml::from_str(r##"background_color = "#ffeedd""##).unwrap();
        let svg = SvgExporter::new(&style).unwrap().export(&tree, &engine).unwrap();

        assert_eq!(svg.matches("<rect").count(), 4);
    }

    #[test]
    fn test_invalid_color_is_a_config_error() {
        let style: StyleConfig = toml::from_str(r#"stroke_color = "not-a-color""#).unwrap();
        assert!(matches!(SvgExporter::new(&style), Err(ArborError::Config(_))));
    }
}
