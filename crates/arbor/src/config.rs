//! Configuration types for Arbor tree layout.
//!
//! This module provides configuration structures that control how trees are
//! laid out and how previews are styled. All types implement
//! [`serde::Deserialize`] so they can be loaded from external sources, and
//! every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing, pass counts and the default [`LayoutDirection`].
//! - [`StyleConfig`] - Colors used when rendering a layout preview.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().crossing_passes(), 10);
//! assert_eq!(config.layout().collision_iterations(), 15);
//! assert!(config.layout().validate().is_ok());
//! assert!(config.style().background_color().is_ok());
//! ```

use std::str::FromStr;

use color::DynamicColor;
use serde::Deserialize;

use arbor_core::geometry::Size;

use crate::{error::ArborError, layout::LayoutDirection};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ArborError> {
        self.layout.validate()?;
        self.style.background_color()?;
        self.style.node_fill_color()?;
        self.style.stroke_color()?;
        Ok(())
    }
}

/// Layout pipeline configuration.
///
/// Spacing values are in world units. The collision padding is in abstract
/// units, where every node occupies exactly `1.0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between adjacent leaf centers along the sibling axis.
    spacing_x: f32,

    /// Distance between adjacent layers along the depth axis.
    spacing_y: f32,

    /// Number of alternating barycenter passes.
    crossing_passes: usize,

    /// Upper bound on collision resolution iterations.
    collision_iterations: usize,

    /// Extra separation required between same-layer nodes, in abstract units.
    collision_padding: f32,

    /// Direction used by engines created from this configuration.
    direction: LayoutDirection,

    /// Box width echoed for nodes without an explicit size.
    node_width: f32,

    /// Box height echoed for nodes without an explicit size.
    node_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_x: 120.0,
            spacing_y: 100.0,
            crossing_passes: 10,
            collision_iterations: 15,
            collision_padding: 0.0,
            direction: LayoutDirection::default(),
            node_width: 100.0,
            node_height: 40.0,
        }
    }
}

impl LayoutConfig {
    pub fn spacing_x(&self) -> f32 {
        self.spacing_x
    }

    pub fn spacing_y(&self) -> f32 {
        self.spacing_y
    }

    pub fn crossing_passes(&self) -> usize {
        self.crossing_passes
    }

    pub fn collision_iterations(&self) -> usize {
        self.collision_iterations
    }

    pub fn collision_padding(&self) -> f32 {
        self.collision_padding
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Returns the default node box size.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    /// Set the spacing between sibling centers and between layers
    pub fn with_spacing(mut self, spacing_x: f32, spacing_y: f32) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    /// Set the number of crossing reduction passes
    pub fn with_crossing_passes(mut self, passes: usize) -> Self {
        self.crossing_passes = passes;
        self
    }

    /// Set the collision resolution budget and padding
    pub fn with_collision(mut self, iterations: usize, padding: f32) -> Self {
        self.collision_iterations = iterations;
        self.collision_padding = padding;
        self
    }

    /// Set the default layout direction
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the default node box size
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_width = size.width();
        self.node_height = size.height();
        self
    }

    /// Checks that every numeric setting is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ArborError> {
        let values = [
            ("spacing_x", self.spacing_x),
            ("spacing_y", self.spacing_y),
            ("collision_padding", self.collision_padding),
            ("node_width", self.node_width),
            ("node_height", self.node_height),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ArborError::Config(format!(
                    "`{name}` must be a finite, non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Visual styling configuration for layout previews.
///
/// Colors are CSS color strings. Unset colors fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    node_fill_color: Option<String>,

    #[serde(default)]
    stroke_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background color, or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<DynamicColor>, ArborError> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the parsed node fill color, or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the color string cannot be parsed.
    pub fn node_fill_color(&self) -> Result<Option<DynamicColor>, ArborError> {
        parse_color("node_fill_color", self.node_fill_color.as_deref())
    }

    /// Returns the parsed stroke color for boxes and edges, or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Option<DynamicColor>, ArborError> {
        parse_color("stroke_color", self.stroke_color.as_deref())
    }
}

fn parse_color(name: &str, value: Option<&str>) -> Result<Option<DynamicColor>, ArborError> {
    value
        .map(DynamicColor::from_str)
        .transpose()
        .map_err(|err| ArborError::Config(format!("Invalid {name} in config: {err}")))
}
