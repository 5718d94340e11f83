//! Export of computed layouts.
//!
//! Every backend implements [`Exporter`] and turns a computed
//! [`LayoutEngine`] into a string. Writing the string anywhere is left to the
//! caller.
//!
//! # Available Backends
//!
//! - [`text::TextExporter`] - aligned table for quick inspection
//! - [`report::TomlExporter`] - machine-readable TOML report
//! - [`svg::SvgExporter`] - static SVG preview

pub mod report;
pub mod svg;
pub mod text;

use serde::{Deserialize, Serialize};

use arbor_core::tree::Tree;

use crate::{error::ArborError, layout::LayoutEngine};

/// Output formats understood by [`TreeLayoutBuilder::render`](crate::TreeLayoutBuilder::render).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Text,
    Toml,
    Svg,
}

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Renders the engine's last computed layout.
    ///
    /// `tree` is the tree the layout was computed for; it supplies node
    /// kinds for labels.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Export`] if the layout cannot be converted to
    /// the target format.
    fn export(&self, tree: &Tree, engine: &LayoutEngine) -> Result<String, ArborError>;
}
