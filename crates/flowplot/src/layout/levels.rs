//! Breadth-first level assignment.

use std::collections::VecDeque;

use indexmap::{IndexMap, map::Entry};
use log::debug;

use crate::structure::FlowGraph;

/// Assigns every node reachable from `source` its BFS distance.
///
/// The returned map keeps discovery order: the source first, then nodes in
/// the order the traversal first met them. A node's first level is final.
pub(super) fn assign_levels(graph: &FlowGraph, source: usize) -> IndexMap<usize, usize> {
    let mut levels = IndexMap::with_capacity(graph.node_count());
    levels.insert(source, 0);

    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        let next_level = levels[&current] + 1;
        for neighbor in graph.successors(current) {
            if let Entry::Vacant(entry) = levels.entry(neighbor) {
                entry.insert(next_level);
                queue.push_back(neighbor);
            }
        }
    }

    debug!(source, reached = levels.len(); "Levels assigned");
    levels
}

/// Places an unreached sink one level below the deepest reached node.
///
/// Returns `true` if the sink had to be placed this way.
pub(super) fn apply_sink_fallback(levels: &mut IndexMap<usize, usize>, sink: usize) -> bool {
    if levels.contains_key(&sink) {
        return false;
    }

    let depth = levels.values().copied().max().unwrap_or(0);
    levels.insert(sink, depth + 1);
    debug!(sink, level = depth + 1; "Sink not reachable from source, placed below deepest level");
    true
}
