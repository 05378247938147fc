//! Leveled layout of flow networks.
//!
//! [`LevelLayoutBuilder`] turns an [`AdjacencyMatrix`] plus a source and a
//! sink into a [`LevelLayout`]: the extracted edges with their capacity
//! labels and one [`Point`] per placed node.
//!
//! # Algorithm
//!
//! 1. Every cell denoting an edge becomes a directed edge (self-loops too).
//! 2. A breadth-first traversal from the source assigns each reachable node
//!    its distance as level. The first level found is final; successors are
//!    explored in column order.
//! 3. A sink the traversal never reached is put one level below the deepest
//!    reached node.
//! 4. Nodes of a level are spread over `(0, 1)` at `x = i / (k + 1)`, in the
//!    order selected by [`NodeOrder`].
//! 5. A node at level `L` gets `y = -L`.
//!
//! Edges touching a node that has no level are handled by [`OrphanPolicy`].
//!
//! # Examples
//!
//! ```
//! # use flowplot::layout::LevelLayoutBuilder;
//! # use flowplot::matrix::AdjacencyMatrix;
//! let matrix = AdjacencyMatrix::new(vec![
//!     vec![0, 5, 0],
//!     vec![0, 0, 3],
//!     vec![0, 0, 0],
//! ])?;
//!
//! let layout = LevelLayoutBuilder::new().build(&matrix, 0, 2)?;
//! assert_eq!(layout.level(2), Some(2));
//! assert_eq!(layout.position(1).map(|p| p.y()), Some(-1.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod levels;
mod positioning;

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use flowplot_core::{capacity::Capacity, geometry::Point, matrix::AdjacencyMatrix};

use crate::structure::FlowGraph;

/// Which end of the flow network an index was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Sink,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

/// Errors raised while laying out a flow network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{endpoint} index {index} is out of bounds for a matrix of {size} nodes")]
    InvalidIndex {
        endpoint: Endpoint,
        index: usize,
        size: usize,
    },

    #[error("node {node} has an edge but is not reachable from the source")]
    UnreachableNode { node: usize },
}

/// Order of nodes sharing a level, left to right.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOrder {
    /// Order in which the traversal discovered the nodes.
    #[default]
    Discovery,
    /// Ascending node index.
    Id,
}

/// What to do with edges whose endpoint never received a level.
///
/// Such an endpoint is neither reachable from the source nor the sink, so
/// it has no position to draw the edge from or to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Leave the edge out of the layout and report it in
    /// [`LevelLayout::omitted_edges`].
    #[default]
    Omit,
    /// Fail with [`LayoutError::UnreachableNode`].
    Reject,
}

/// A directed edge with its capacity label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdge {
    from: usize,
    to: usize,
    label: String,
}

impl LayoutEdge {
    pub fn new(from: usize, to: usize, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Result of a leveled layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    source: usize,
    sink: usize,
    sink_fallback: bool,
    levels: IndexMap<usize, usize>,
    positions: IndexMap<usize, Point>,
    edges: Vec<LayoutEdge>,
    omitted_edges: Vec<LayoutEdge>,
}

impl LevelLayout {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Returns `true` if the sink was unreachable and placed below the
    /// deepest level.
    pub fn is_sink_fallback(&self) -> bool {
        self.sink_fallback
    }

    /// Returns the level of `node`, if it was placed.
    pub fn level(&self, node: usize) -> Option<usize> {
        self.levels.get(&node).copied()
    }

    /// Returns the layout-space position of `node`, if it was placed.
    pub fn position(&self, node: usize) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    /// Returns `(node, level)` pairs in discovery order.
    pub fn levels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.levels.iter().map(|(&node, &level)| (node, level))
    }

    /// Returns `(node, position)` pairs, level by level, left to right.
    pub fn positions(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.positions.iter().map(|(&node, &point)| (node, point))
    }

    /// Returns the nodes of `level`, left to right.
    pub fn nodes_at_level(&self, level: usize) -> Vec<usize> {
        self.positions
            .keys()
            .copied()
            .filter(|node| self.levels.get(node) == Some(&level))
            .collect()
    }

    /// Returns the deepest level in the layout.
    pub fn depth(&self) -> usize {
        self.levels.values().copied().max().unwrap_or(0)
    }

    /// Returns the edges to draw, in matrix row-major order.
    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Returns the edges left out because an endpoint has no position.
    pub fn omitted_edges(&self) -> &[LayoutEdge] {
        &self.omitted_edges
    }
}

/// Builds [`LevelLayout`]s.
#[derive(Debug, Default, Clone)]
pub struct LevelLayoutBuilder {
    node_order: NodeOrder,
    orphans: OrphanPolicy,
}

impl LevelLayoutBuilder {
    /// Creates a builder using discovery order and omitting orphaned edges.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_order(mut self, node_order: NodeOrder) -> Self {
        self.node_order = node_order;
        self
    }

    pub fn with_orphan_policy(mut self, orphans: OrphanPolicy) -> Self {
        self.orphans = orphans;
        self
    }

    /// Lays out the flow network described by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidIndex`] if `source` or `sink` is not a
    /// node of the matrix, and [`LayoutError::UnreachableNode`] for an edge
    /// touching an unplaced node under [`OrphanPolicy::Reject`].
    pub fn build<C: Capacity>(
        &self,
        matrix: &AdjacencyMatrix<C>,
        source: usize,
        sink: usize,
    ) -> Result<LevelLayout, LayoutError> {
        check_index(matrix, Endpoint::Source, source)?;
        check_index(matrix, Endpoint::Sink, sink)?;

        let graph = FlowGraph::from_matrix(matrix);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            source,
            sink;
            "Building leveled layout"
        );

        let mut levels = levels::assign_levels(&graph, source);
        let sink_fallback = levels::apply_sink_fallback(&mut levels, sink);
        let positions = positioning::place_nodes(&levels, self.node_order);

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut omitted_edges = Vec::new();
        for (from, to, label) in graph.edges() {
            let edge = LayoutEdge::new(from, to, label);
            let orphan = [from, to]
                .into_iter()
                .find(|node| !positions.contains_key(node));

            match (orphan, self.orphans) {
                (None, _) => edges.push(edge),
                (Some(node), OrphanPolicy::Reject) => {
                    return Err(LayoutError::UnreachableNode { node });
                }
                (Some(node), OrphanPolicy::Omit) => {
                    warn!(from, to, node; "Omitting edge touching a node unreachable from the source");
                    omitted_edges.push(edge);
                }
            }
        }

        debug!(
            placed = positions.len(),
            edges = edges.len(),
            omitted = omitted_edges.len(),
            sink_fallback;
            "Layout calculated"
        );

        Ok(LevelLayout {
            source,
            sink,
            sink_fallback,
            levels,
            positions,
            edges,
            omitted_edges,
        })
    }
}

fn check_index<C>(
    matrix: &AdjacencyMatrix<C>,
    endpoint: Endpoint,
    index: usize,
) -> Result<(), LayoutError> {
    if matrix.contains(index) {
        Ok(())
    } else {
        Err(LayoutError::InvalidIndex {
            endpoint,
            index,
            size: matrix.size(),
        })
    }
}
