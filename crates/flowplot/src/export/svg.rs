//! SVG rendering of flow diagrams.
//!
//! Layout space is mapped onto the canvas with x in `(0, 1)` spread over
//! [`CanvasConfig::width`] and every level one [`CanvasConfig::level_spacing`]
//! further down. The document is assembled bottom up: background, edges,
//! nodes, then capacity labels so they stay readable on top of the lines.

mod arrows;
mod labels;

use log::{debug, info};
use svg::{
    Document,
    node::element::{Circle, Group, Rectangle},
};

use flowplot_core::{
    color::Color,
    geometry::{Point, Size},
    text::TextDefinition,
};

use crate::{
    config::{CanvasConfig, StyleConfig},
    diagram::{DiagramEdge, FlowDiagram, LabelPlacement},
    export::{self, Exporter},
};

const EDGE_WIDTH: f32 = 1.5;
const NODE_STROKE_WIDTH: f32 = 1.5;

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    canvas: Option<&'a CanvasConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_canvas(mut self, canvas: &'a CanvasConfig) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Resolves the configured colors and fonts.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let style = self.style.cloned().unwrap_or_default();
        let canvas = self.canvas.cloned().unwrap_or_default();

        let background = style.background_color().map_err(export::Error::Render)?;
        let node_fill = style.node_fill().map_err(export::Error::Render)?;
        let node_stroke = style.node_stroke().map_err(export::Error::Render)?;
        let edge_color = style.edge_color().map_err(export::Error::Render)?;

        let node_text = text_definition(&canvas, canvas.font_size(), true);
        let label_text = text_definition(&canvas, canvas.label_font_size(), false);
        let title_text = text_definition(&canvas, canvas.title_font_size(), false);

        Ok(Svg {
            canvas,
            background,
            node_fill,
            node_stroke,
            edge_color,
            label_background: Color::new("white").map_err(export::Error::Render)?,
            node_text,
            label_text,
            title_text,
        })
    }
}

fn text_definition(canvas: &CanvasConfig, size: u16, bold: bool) -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_family(canvas.font_family());
    definition.set_font_size(size);
    definition.set_bold(bold);
    definition
}

/// SVG exporter with resolved styling.
#[derive(Debug, Clone)]
pub struct Svg {
    canvas: CanvasConfig,
    background: Option<Color>,
    node_fill: Color,
    node_stroke: Color,
    edge_color: Color,
    label_background: Color,
    node_text: TextDefinition,
    label_text: TextDefinition,
    title_text: TextDefinition,
}

/// Canvas placement of one diagram.
struct Frame {
    origin: Point,
    size: Size,
}

impl Svg {
    /// Height reserved above the first level for the title.
    fn title_band(&self, diagram: &FlowDiagram) -> f32 {
        diagram
            .title()
            .map(|title| self.title_text.measure(title).height() + self.canvas.margin() / 2.0)
            .unwrap_or(0.0)
    }

    /// Room needed above a node center, including self-loops on the top level.
    fn headroom(&self, diagram: &FlowDiagram) -> f32 {
        let radius = self.canvas.node_radius();
        let top_level_loop = diagram.edges().iter().any(|edge| {
            edge.is_self_loop() && diagram.node(edge.from()).is_some_and(|node| node.level() == 0)
        });

        if top_level_loop {
            arrows::loop_height(radius) + self.label_text.measure("0").height()
        } else {
            radius
        }
    }

    fn frame(&self, diagram: &FlowDiagram) -> Frame {
        let margin = self.canvas.margin();
        let radius = self.canvas.node_radius();
        let top = margin + self.title_band(diagram) + self.headroom(diagram);

        let width = self.canvas.width() + margin * 2.0;
        let height = top + diagram.depth() as f32 * self.canvas.level_spacing() + radius + margin;
        debug!(width, height; "SVG dimensions");

        Frame {
            origin: Point::new(margin, top),
            size: Size::new(width, height),
        }
    }

    /// Maps a layout-space point onto the canvas.
    fn to_canvas(&self, frame: &Frame, point: Point) -> Point {
        Point::new(
            frame.origin.x() + point.x() * self.canvas.width(),
            frame.origin.y() - point.y() * self.canvas.level_spacing(),
        )
    }

    fn node_center(&self, frame: &Frame, diagram: &FlowDiagram, id: usize) -> Option<Point> {
        diagram
            .node(id)
            .map(|node| self.to_canvas(frame, node.position()))
    }

    fn render_edge(&self, frame: &Frame, diagram: &FlowDiagram, edge: &DiagramEdge) -> Option<(Group, Group)> {
        let from = self.node_center(frame, diagram, edge.from())?;
        let to = self.node_center(frame, diagram, edge.to())?;
        let radius = self.canvas.node_radius();

        let shape = if edge.is_self_loop() {
            arrows::self_loop(from, radius)
        } else if edge.is_curved() {
            arrows::curved_edge(from, to, radius)
        } else {
            arrows::straight_edge(from, to, radius)
        };

        // Follow the curve: at parameter t a quadratic arc sits 4t(1-t) of
        // its mid-bend away from the chord.
        let anchor = self.to_canvas(frame, edge.label_anchor());
        let chord = to.sub_point(from).hypot();
        let t = if chord > 0.0 {
            anchor.sub_point(from).hypot() / chord
        } else {
            0.5
        };
        let label_position = anchor.add_point(shape.bend().scale(4.0 * t * (1.0 - t)));

        let background = match diagram.label_placement() {
            LabelPlacement::Midpoint => None,
            LabelPlacement::Offset => Some(self.label_background),
        };

        let path = Group::new()
            .set("class", "edge")
            .add(arrows::create_path(&shape, self.edge_color, EDGE_WIDTH));
        let label = labels::create_label(edge.label(), &self.label_text, label_position, background);

        Some((path, label))
    }

    fn render_node(&self, center: Point, id: usize) -> Group {
        let circle = Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", self.canvas.node_radius())
            .set("fill", self.node_fill.to_string())
            .set("fill-opacity", self.node_fill.alpha())
            .set("stroke", self.node_stroke.to_string())
            .set("stroke-width", NODE_STROKE_WIDTH);

        Group::new()
            .set("class", "node")
            .set("id", format!("node-{id}"))
            .add(circle)
            .add(labels::create_text(&id.to_string(), &self.node_text, center))
    }

    /// Builds the SVG document for `diagram`.
    pub fn render_diagram(&self, diagram: &FlowDiagram) -> Document {
        let frame = self.frame(diagram);
        let size = frame.size;

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        if let Some(color) = self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            );
        }

        doc = doc.add(arrows::create_marker_definitions(self.edge_color));

        if let Some(title) = diagram.title() {
            let title_height = self.title_text.measure(title).height();
            let position = Point::new(size.width() / 2.0, self.canvas.margin() + title_height / 2.0);
            doc = doc.add(labels::create_text(title, &self.title_text, position).set("class", "title"));
        }

        let mut edges = Group::new().set("class", "edges");
        let mut edge_labels = Group::new().set("class", "edge-labels");
        for edge in diagram.edges() {
            if let Some((path, label)) = self.render_edge(&frame, diagram, edge) {
                edges = edges.add(path);
                edge_labels = edge_labels.add(label);
            }
        }

        let mut nodes = Group::new().set("class", "nodes");
        for node in diagram.nodes() {
            let center = self.to_canvas(&frame, node.position());
            nodes = nodes.add(self.render_node(center, node.id()));
        }

        doc.add(edges).add(nodes).add(edge_labels)
    }
}

impl Exporter for Svg {
    fn render(&self, diagram: &FlowDiagram) -> Result<String, export::Error> {
        info!(nodes = diagram.nodes().len(), edges = diagram.edges().len(); "Rendering SVG");
        let doc = self.render_diagram(diagram);
        debug!("SVG document rendered");

        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use flowplot_core::matrix::AdjacencyMatrix;

    use super::*;
    use crate::layout::LevelLayoutBuilder;

    fn diagram(rows: Vec<Vec<i32>>, source: usize, sink: usize, style: &StyleConfig) -> FlowDiagram {
        let layout = LevelLayoutBuilder::new()
            .build(&AdjacencyMatrix::new(rows).unwrap(), source, sink)
            .unwrap();
        FlowDiagram::new(&layout, style)
    }

    fn chain() -> FlowDiagram {
        diagram(
            vec![vec![0, 5, 0], vec![0, 0, 3], vec![0, 0, 0]],
            0,
            2,
            &StyleConfig::default(),
        )
    }

    #[test]
    fn test_levels_map_to_rows() {
        let svg = SvgBuilder::new().build().unwrap();
        let diagram = chain();
        let frame = svg.frame(&diagram);

        let top = svg.to_canvas(&frame, Point::new(0.5, 0.0));
        let second = svg.to_canvas(&frame, Point::new(0.5, -1.0));

        assert_approx_eq!(f32, top.x(), 40.0 + 300.0);
        assert_approx_eq!(f32, second.y() - top.y(), 120.0);
        assert_approx_eq!(f32, frame.size.width(), 680.0);
    }

    #[test]
    fn test_document_contains_nodes_edges_and_labels() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = svg.render(&chain()).unwrap();

        assert!(output.contains("<svg"));
        assert_eq!(output.matches("<circle").count(), 3);
        assert_eq!(output.matches("class=\"edge\"").count(), 2);
        assert!(output.contains("Flow Network Graph"));
        assert!(output.contains("arrow-right-"));
        assert!(output.contains("node-2"));
    }

    #[test]
    fn test_offset_labels_get_background_boxes() {
        let style = StyleConfig::default().with_label_placement(LabelPlacement::Offset);
        let diagram = diagram(vec![vec![0, 5], vec![0, 0]], 0, 1, &style);
        let output = SvgBuilder::new().with_style(&style).build().unwrap().render(&diagram).unwrap();

        assert_eq!(output.matches("<rect").count(), 1);
    }

    #[test]
    fn test_untitled_diagram_has_no_title_band() {
        let style = StyleConfig::default().with_show_title(false);
        let diagram = diagram(vec![vec![0, 5], vec![0, 0]], 0, 1, &style);
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let frame = svg.frame(&diagram);
        assert_approx_eq!(f32, frame.origin.y(), 40.0 + 25.0);
        assert!(!svg.render(&diagram).unwrap().contains("class=\"title\""));
    }

    #[test]
    fn test_self_loop_on_top_level_adds_headroom() {
        let style = StyleConfig::default().with_show_title(false);
        let plain = diagram(vec![vec![0, 5], vec![0, 0]], 0, 1, &style);
        let looped = diagram(vec![vec![2, 5], vec![0, 0]], 0, 1, &style);
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        assert!(svg.frame(&looped).origin.y() > svg.frame(&plain).origin.y());
    }

    #[test]
    fn test_background_fills_whole_canvas() {
        let style = StyleConfig::default().with_background_color("#fafafa");
        let diagram = diagram(vec![vec![0, 5], vec![0, 0]], 0, 1, &style);
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let size = svg.frame(&diagram).size;
        let output = svg.render(&diagram).unwrap();

        assert_eq!(output.matches("<rect").count(), 1);
        assert!(output.contains(&format!("width=\"{}\"", size.width())));
        assert!(output.contains(&format!("height=\"{}\"", size.height())));
        assert!(output.contains("x=\"0\""));
        assert!(svg.background.is_some());
    }

    #[test]
    fn test_no_background_by_default() {
        let output = SvgBuilder::new().build().unwrap().render(&chain()).unwrap();
        assert!(!output.contains("<rect"));
    }

    #[test]
    fn test_invalid_background_fails_to_build() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        let result = SvgBuilder::new().with_style(&style).build();
        assert!(matches!(result, Err(export::Error::Render(_))));
    }
}
