//! Arbor - layered layout for behavior trees.
//!
//! Positions the nodes of a behavior tree on a plane for rendering: parents
//! centered over their children, few edge crossings, no overlapping boxes.
//! The [`LayoutEngine`] runs the layout pipeline; [`TreeLayoutBuilder`] adds
//! TOML tree documents and exporters around it.

pub mod config;
pub mod document;
pub mod export;

mod error;
mod layout;

pub use arbor_core::{geometry, identifier, tree};

pub use error::ArborError;
pub use layout::{LayoutDirection, LayoutEdge, LayoutEngine, LayoutRequest, NodeLayout};

use log::{debug, info};

use config::AppConfig;
use document::TreeDocument;
use export::{ExportFormat, Exporter, report::TomlExporter, svg::SvgExporter, text::TextExporter};

/// Builder for parsing, laying out and exporting behavior trees.
///
/// # Examples
///
/// ```
/// use arbor::{TreeLayoutBuilder, export::ExportFormat};
///
/// let source = r#"
/// root = 0
///
/// [[nodes]]
/// id = 0
/// kind = "inverter"
/// child = 1
///
/// [[nodes]]
/// id = 1
/// kind = "action"
/// "#;
///
/// let builder = TreeLayoutBuilder::default();
/// let document = builder.parse(source).unwrap();
///
/// let engine = builder.layout(&document);
/// assert_eq!(engine.layouts().len(), 2);
///
/// let table = builder.render(&document, ExportFormat::Text).unwrap();
/// assert!(table.contains("Inverter"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeLayoutBuilder {
    config: AppConfig,
    direction: Option<LayoutDirection>,
}

impl TreeLayoutBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            direction: None,
        }
    }

    /// Overrides the configured layout direction.
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML tree document.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Parse`] for malformed documents.
    pub fn parse(&self, source: &str) -> Result<TreeDocument, ArborError> {
        info!("Parsing tree document");
        document::parse(source)
    }

    /// Lays out a document with the configured spacing and the document's box sizes.
    ///
    /// The returned engine holds the computed layout.
    pub fn layout(&self, document: &TreeDocument) -> LayoutEngine {
        let layout_config = self.config.layout();
        let mut engine = LayoutEngine::with_config(layout_config.clone());
        if let Some(direction) = self.direction {
            engine.set_layout_direction(direction);
        }

        let request = document.node_sizes().iter().fold(
            LayoutRequest::new(
                document.tree(),
                layout_config.spacing_x(),
                layout_config.spacing_y(),
            ),
            |request, (&id, &size)| request.with_node_size(id, size),
        );
        engine.compute(&request);
        engine
    }

    /// Lays out a document and renders it in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] for invalid style colors and
    /// [`ArborError::Export`] if serialization fails.
    pub fn render(
        &self,
        document: &TreeDocument,
        format: ExportFormat,
    ) -> Result<String, ArborError> {
        let engine = self.layout(document);
        debug!(format:? = format; "Rendering layout");

        let tree = document.tree();
        match format {
            ExportFormat::Text => TextExporter.export(tree, &engine),
            ExportFormat::Toml => TomlExporter.export(tree, &engine),
            ExportFormat::Svg => SvgExporter::new(self.config.style())?.export(tree, &engine),
        }
    }
}
