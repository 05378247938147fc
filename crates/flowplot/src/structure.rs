//! Directed graph built from an adjacency matrix.
//!
//! [`FlowGraph`] wraps a `petgraph` directed graph whose node weights are the
//! matrix indices and whose edge weights are the capacity labels. Every matrix
//! index becomes a node, so `NodeIndex::new(i)` always refers to node `i`.

use log::trace;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use flowplot_core::{capacity::Capacity, matrix::AdjacencyMatrix};

/// Directed flow network with capacity labels on its edges.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    graph: DiGraph<usize, String>,
}

impl FlowGraph {
    /// Builds the graph, adding one edge per matrix cell that denotes one.
    ///
    /// Edges are inserted row by row with ascending columns.
    pub fn from_matrix<C: Capacity>(matrix: &AdjacencyMatrix<C>) -> Self {
        let mut graph = DiGraph::with_capacity(matrix.size(), matrix.edge_count());

        for index in 0..matrix.size() {
            graph.add_node(index);
        }

        for (from, to, capacity) in matrix.edges() {
            let label = capacity.label();
            trace!(from, to, label = label.as_str(); "Adding edge");
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), label);
        }

        Self { graph }
    }

    /// Returns the number of nodes, which equals the matrix size.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the direct successors of `node` in ascending index order.
    ///
    /// `petgraph` lists neighbors newest edge first; sorting restores the
    /// column order of the matrix row.
    pub fn successors(&self, node: usize) -> Vec<usize> {
        let mut successors: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(node), Direction::Outgoing)
            .map(|neighbor| self.graph[neighbor])
            .collect();
        successors.sort_unstable();
        successors.dedup();
        successors
    }

    /// Returns all edges as `(from, to, label)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()],
                self.graph[edge.target()],
                edge.weight().as_str(),
            )
        })
    }
}
