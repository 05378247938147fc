//! The figure produced for a flow network.
//!
//! A [`FlowDiagram`] is a plain value holding everything the renderer needs:
//! node positions in layout space, edges with their label anchors, and the
//! title. Nothing is drawn until it is handed to an exporter.

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;

use flowplot_core::geometry::Point;

use crate::{
    config::StyleConfig,
    layout::{LayoutEdge, LevelLayout},
};

/// Where capacity labels are anchored along their edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    /// Halfway between both endpoints.
    #[default]
    Midpoint,
    /// Pulled toward the source and drawn on a background box.
    Offset,
}

/// A placed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramNode {
    id: usize,
    level: usize,
    position: Point,
}

impl DiagramNode {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Position in layout space: `x` in `(0, 1)`, `y = -level`.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// An edge ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramEdge {
    from: usize,
    to: usize,
    label: String,
    label_anchor: Point,
    curved: bool,
}

impl DiagramEdge {
    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Layout-space point the capacity label is centered on.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }

    /// Returns `true` if the opposite edge exists too, so both are drawn as
    /// arcs instead of overlapping lines.
    pub fn is_curved(&self) -> bool {
        self.curved
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A complete flow network figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDiagram {
    title: Option<String>,
    label_placement: LabelPlacement,
    source: usize,
    sink: usize,
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    omitted_edges: Vec<LayoutEdge>,
}

impl FlowDiagram {
    /// Builds the figure for `layout`, anchoring labels as `style` says.
    pub fn new(layout: &LevelLayout, style: &StyleConfig) -> Self {
        let nodes: Vec<DiagramNode> = layout
            .positions()
            .map(|(id, position)| DiagramNode {
                id,
                level: layout.level(id).unwrap_or_default(),
                position,
            })
            .collect();

        // Weight of the target end in the label blend
        let target_weight = match style.label_placement() {
            LabelPlacement::Midpoint => 0.5,
            LabelPlacement::Offset => 1.0 - style.label_offset_weight(),
        };

        let pairs: HashSet<(usize, usize)> =
            layout.edges().iter().map(|e| (e.from(), e.to())).collect();

        let edges = layout
            .edges()
            .iter()
            .filter_map(|edge| {
                let from = layout.position(edge.from())?;
                let to = layout.position(edge.to())?;
                Some(DiagramEdge {
                    from: edge.from(),
                    to: edge.to(),
                    label: edge.label().to_string(),
                    label_anchor: from.lerp(to, target_weight),
                    curved: !edge.is_self_loop() && pairs.contains(&(edge.to(), edge.from())),
                })
            })
            .collect::<Vec<_>>();

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            label_placement:? = style.label_placement();
            "Diagram assembled"
        );

        Self {
            title: style.show_title().then(|| style.title().to_string()),
            label_placement: style.label_placement(),
            source: layout.source(),
            sink: layout.sink(),
            nodes,
            edges,
            omitted_edges: layout.omitted_edges().to_vec(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn label_placement(&self) -> LabelPlacement {
        self.label_placement
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Returns the placed nodes, level by level, left to right.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    /// Returns the edges that were left out of the figure.
    pub fn omitted_edges(&self) -> &[LayoutEdge] {
        &self.omitted_edges
    }

    /// Returns the deepest level shown.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }
}
