//! flowplot - Leveled diagrams of flow networks.
//!
//! Turns a capacity adjacency matrix into a top-to-bottom diagram: nodes are
//! arranged in rows by breadth-first distance from the source, edges carry
//! their capacities as labels, and the figure is rendered to SVG.

pub mod config;
pub mod diagram;
pub mod layout;
pub mod structure;

mod error;
mod export;

pub use flowplot_core::{capacity, color, geometry, matrix, text};

pub use error::FlowPlotError;

use std::path::Path;

use log::{debug, info, trace};

use capacity::Capacity;
use config::AppConfig;
use diagram::FlowDiagram;
use export::Exporter;
use layout::LevelLayoutBuilder;
use matrix::AdjacencyMatrix;

/// Builder for laying out and rendering flow networks.
///
/// # Examples
///
/// ```rust
/// use flowplot::{FlowPlotBuilder, config::AppConfig, matrix::AdjacencyMatrix};
///
/// let matrix = AdjacencyMatrix::new(vec![
///     vec![0, 5, 0],
///     vec![0, 0, 3],
///     vec![0, 0, 0],
/// ]).expect("Invalid matrix");
///
/// let builder = FlowPlotBuilder::new(AppConfig::default());
///
/// // Lay out the network
/// let diagram = builder.layout(&matrix, 0, 2).expect("Failed to lay out");
/// assert_eq!(diagram.node(2).map(|node| node.level()), Some(2));
///
/// // Render it to SVG
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct FlowPlotBuilder {
    config: AppConfig,
}

impl FlowPlotBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a flow network into a diagram.
    ///
    /// # Arguments
    ///
    /// * `matrix` - Capacities; a cell denoting an edge becomes one
    /// * `source` - Node placed alone on the top level
    /// * `sink` - Node that always receives a position
    ///
    /// # Errors
    ///
    /// Returns `FlowPlotError::Layout` if `source` or `sink` is out of range,
    /// or an edge touches an unreachable node under the reject policy.
    pub fn layout<C: Capacity>(
        &self,
        matrix: &AdjacencyMatrix<C>,
        source: usize,
        sink: usize,
    ) -> Result<FlowDiagram, FlowPlotError> {
        info!(size = matrix.size(), source, sink; "Laying out flow network");

        let layout = LevelLayoutBuilder::new()
            .with_node_order(self.config.layout().node_order())
            .with_orphan_policy(self.config.layout().orphans())
            .build(matrix, source, sink)?;
        trace!(layout:?; "Level layout");

        let diagram = FlowDiagram::new(&layout, self.config.style());
        debug!(depth = diagram.depth(); "Diagram built");

        Ok(diagram)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `FlowPlotError::Export` if the configured style is invalid.
    pub fn render_svg(&self, diagram: &FlowDiagram) -> Result<String, FlowPlotError> {
        let svg = self.svg_exporter()?.render(diagram)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a diagram and write the SVG to `path`.
    ///
    /// # Errors
    ///
    /// Returns `FlowPlotError::Io` if the file cannot be written, and
    /// `FlowPlotError::Export` if the configured style is invalid.
    pub fn write_svg(&self, diagram: &FlowDiagram, path: impl AsRef<Path>) -> Result<(), FlowPlotError> {
        self.svg_exporter()?.export_to_file(diagram, path.as_ref())?;
        Ok(())
    }

    /// Validate `rows`, lay them out and render the result in one go.
    ///
    /// # Errors
    ///
    /// Returns `FlowPlotError::Matrix` if `rows` is not a non-empty square
    /// matrix, otherwise the errors of [`Self::layout`] and [`Self::render_svg`].
    pub fn plot<C: Capacity>(
        &self,
        rows: Vec<Vec<C>>,
        source: usize,
        sink: usize,
    ) -> Result<String, FlowPlotError> {
        let matrix = AdjacencyMatrix::new(rows)?;
        let diagram = self.layout(&matrix, source, sink)?;
        self.render_svg(&diagram)
    }

    fn svg_exporter(&self) -> Result<export::svg::Svg, FlowPlotError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_canvas(self.config.canvas())
            .build()?;
        Ok(exporter)
    }
}
