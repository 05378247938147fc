//! Configuration types for flowplot rendering.
//!
//! This module provides configuration structures that control how flow
//! networks are laid out, styled and mapped onto the canvas. All types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Node ordering within a level and the orphan policy.
//! - [`StyleConfig`] - Colors, title and edge label placement.
//! - [`CanvasConfig`] - Pixel dimensions and font sizes.
//!
//! # Example
//!
//! ```
//! # use flowplot::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.style().title(), "Flow Network Graph");
//! ```

use serde::Deserialize;

use flowplot_core::color::Color;

use crate::{
    diagram::LabelPlacement,
    layout::{NodeOrder, OrphanPolicy},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, canvas: CanvasConfig) -> Self {
        Self {
            layout,
            style,
            canvas,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }
}

/// Layout settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Order of nodes sharing a level.
    #[serde(default)]
    node_order: NodeOrder,

    /// Handling of edges touching nodes without a level.
    #[serde(default)]
    orphans: OrphanPolicy,
}

impl LayoutConfig {
    pub fn new(node_order: NodeOrder, orphans: OrphanPolicy) -> Self {
        Self {
            node_order,
            orphans,
        }
    }

    pub fn node_order(&self) -> NodeOrder {
        self.node_order
    }

    pub fn orphans(&self) -> OrphanPolicy {
        self.orphans
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings and parsed on access, so a bad color is only
/// reported when a diagram is rendered with it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color; transparent when unset.
    background_color: Option<String>,
    node_fill: String,
    node_stroke: String,
    edge_color: String,
    label_placement: LabelPlacement,
    /// Share of the source position in an offset label anchor.
    label_offset_weight: f32,
    title: String,
    show_title: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_fill: "white".to_string(),
            node_stroke: "black".to_string(),
            edge_color: "black".to_string(),
            label_placement: LabelPlacement::default(),
            label_offset_weight: 0.6,
            title: "Flow Network Graph".to_string(),
            show_title: true,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed node fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn node_fill(&self) -> Result<Color, String> {
        parse_color("node fill", &self.node_fill)
    }

    /// Returns the parsed node outline [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn node_stroke(&self) -> Result<Color, String> {
        parse_color("node stroke", &self.node_stroke)
    }

    /// Returns the parsed [`Color`] of edges and arrowheads.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge color", &self.edge_color)
    }

    pub fn label_placement(&self) -> LabelPlacement {
        self.label_placement
    }

    /// Returns the source weight of offset labels, clamped to `[0, 1]`.
    pub fn label_offset_weight(&self) -> f32 {
        self.label_offset_weight.clamp(0.0, 1.0)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn show_title(&self) -> bool {
        self.show_title
    }

    pub fn with_label_placement(mut self, placement: LabelPlacement) -> Self {
        self.label_placement = placement;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_show_title(mut self, show_title: bool) -> Self {
        self.show_title = show_title;
        self
    }

    /// Sets the canvas background; colors are checked when the exporter is built.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

fn parse_color(what: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {what} in config: {err}"))
}

/// Mapping of layout space onto the SVG canvas, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width covered by the unit interval of x positions.
    width: f32,
    /// Vertical distance between two consecutive levels.
    level_spacing: f32,
    node_radius: f32,
    margin: f32,
    font_family: String,
    font_size: u16,
    label_font_size: u16,
    title_font_size: u16,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            level_spacing: 120.0,
            node_radius: 25.0,
            margin: 40.0,
            font_family: "sans-serif".to_string(),
            font_size: 15,
            label_font_size: 12,
            title_font_size: 16,
        }
    }
}

impl CanvasConfig {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size of node labels.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Font size of capacity labels.
    pub fn label_font_size(&self) -> u16 {
        self.label_font_size
    }

    pub fn title_font_size(&self) -> u16 {
        self.title_font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();
        assert_eq!(style.background_color(), Ok(None));
        assert_eq!(style.node_fill().unwrap(), Color::new("white").unwrap());
        assert_eq!(style.edge_color().unwrap(), Color::default());
        assert_eq!(style.label_placement(), LabelPlacement::Midpoint);
        assert_eq!(style.label_offset_weight(), 0.6);
        assert!(style.show_title());
    }

    #[test]
    fn test_invalid_colors_are_reported_on_access() {
        let style = StyleConfig {
            node_fill: "not-a-color".to_string(),
            background_color: Some("nope".to_string()),
            ..StyleConfig::default()
        };

        let err = style.node_fill().unwrap_err();
        assert!(err.starts_with("Invalid node fill in config"));
        assert!(style.background_color().is_err());
        assert!(style.node_stroke().is_ok());
    }

    #[test]
    fn test_offset_weight_is_clamped() {
        let style = StyleConfig {
            label_offset_weight: 1.7,
            ..StyleConfig::default()
        };
        assert_eq!(style.label_offset_weight(), 1.0);
    }

    #[test]
    fn test_builder_methods() {
        let style = StyleConfig::default()
            .with_label_placement(LabelPlacement::Offset)
            .with_title("Residual")
            .with_show_title(false);

        assert_eq!(style.label_placement(), LabelPlacement::Offset);
        assert_eq!(style.title(), "Residual");
        assert!(!style.show_title());
    }

    #[test]
    fn test_default_canvas() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.node_radius(), 25.0);
        assert_eq!(canvas.font_size(), 15);
        assert_eq!(canvas.label_font_size(), 12);
    }
}
