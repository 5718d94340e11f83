//! Plain-text table export.

use std::fmt::{self, Write};

use arbor_core::tree::Tree;

use super::Exporter;
use crate::{
    error::ArborError,
    layout::{LayoutDirection, LayoutEngine},
};

/// Renders one row per laid-out node, in BFS discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl TextExporter {
    fn write_table(out: &mut String, tree: &Tree, engine: &LayoutEngine) -> fmt::Result {
        let direction = match engine.layout_direction() {
            LayoutDirection::TopToBottom => "top-to-bottom",
            LayoutDirection::LeftToRight => "left-to-right",
        };
        writeln!(
            out,
            "# {} nodes, {} layers, {direction}",
            engine.layouts().len(),
            engine.layers().len()
        )?;
        writeln!(
            out,
            "{:<6} {:<10} {:>5} {:>5} {:>10} {:>10} {:>8} {:>8}",
            "id", "kind", "layer", "order", "x", "y", "width", "height"
        )?;

        for node in engine.layouts() {
            let kind = tree
                .node(node.node_id())
                .map_or_else(|| "?".to_string(), |tree_node| tree_node.kind().to_string());
            writeln!(
                out,
                "{:<6} {:<10} {:>5} {:>5} {:>10.2} {:>10.2} {:>8.2} {:>8.2}",
                node.node_id().to_string(),
                kind,
                node.layer(),
                node.order_in_layer(),
                node.position().x(),
                node.position().y(),
                node.width(),
                node.height()
            )?;
        }
        Ok(())
    }
}

impl Exporter for TextExporter {
    fn export(&self, tree: &Tree, engine: &LayoutEngine) -> Result<String, ArborError> {
        let mut out = String::new();
        Self::write_table(&mut out, tree, engine)
            .map_err(|err| ArborError::Export(err.to_string()))?;
        Ok(out)
    }
}
