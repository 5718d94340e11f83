//! TOML layout report.

use serde::Serialize;

use arbor_core::tree::Tree;

use super::Exporter;
use crate::{
    error::ArborError,
    layout::{LayoutDirection, LayoutEdge, LayoutEngine, NodeLayout},
};

#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    root: u32,
    direction: LayoutDirection,
    nodes: &'a [NodeLayout],
    edges: &'a [LayoutEdge],
}

/// Serializes node layouts and edges as a TOML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlExporter;

impl Exporter for TomlExporter {
    fn export(&self, tree: &Tree, engine: &LayoutEngine) -> Result<String, ArborError> {
        let report = LayoutReport {
            root: tree.root().value(),
            direction: engine.layout_direction(),
            nodes: engine.layouts(),
            edges: engine.edges(),
        };
        toml::to_string(&report).map_err(|err| ArborError::Export(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::tree::{NodeKind, TreeBuilder};

    use super::*;

    #[test]
    fn test_report_round_trips_through_toml() {
        let tree = TreeBuilder::new(0)
            .decorator(0, NodeKind::Repeater, 1)
            .leaf(1, NodeKind::Action)
            .build()
            .unwrap();
        let mut engine = LayoutEngine::new();
        engine.set_layout_direction(LayoutDirection::LeftToRight);
        engine.compute_layout(&tree, 100.0, 80.0);

        let report = TomlExporter.export(&tree, &engine).unwrap();
        let value: toml::Table = toml::from_str(&report).unwrap();

        assert_eq!(value["root"].as_integer(), Some(0));
        assert_eq!(value["direction"].as_str(), Some("left_to_right"));

        let nodes = value["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1]["node_id"].as_integer(), Some(1));
        assert_eq!(nodes[1]["layer"].as_integer(), Some(1));
        assert_eq!(nodes[1]["position"]["x"].as_float(), Some(80.0));

        let edges = value["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["source"].as_integer(), Some(0));
        assert_eq!(edges[0]["target"].as_integer(), Some(1));
    }
}
