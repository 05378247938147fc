//! Placement of leveled nodes in layout space.
//!
//! Every level is a row at `y = -level`. The `k` nodes of a row share the
//! unit span: they take the interior points of `k + 2` evenly spaced samples
//! of `[0, 1]`, i.e. `x = i / (k + 1)` for `i` in `1..=k`.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use flowplot_core::geometry::Point;

use super::NodeOrder;

/// Returns the `count` x-coordinates of a row.
///
/// # Examples
///
/// ```text
/// row_offsets(1) == [0.5]
/// row_offsets(3) == [0.25, 0.5, 0.75]
/// ```
pub(super) fn row_offsets(count: usize) -> Vec<f32> {
    let segments = (count + 1) as f32;
    (1..=count).map(|i| i as f32 / segments).collect()
}

/// Groups nodes by level, preserving the order of `levels` within a level.
pub(super) fn group_by_level(levels: &IndexMap<usize, usize>) -> BTreeMap<usize, Vec<usize>> {
    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (&node, &level) in levels {
        rows.entry(level).or_default().push(node);
    }
    rows
}

/// Computes a position for every leveled node.
///
/// Rows are emitted top to bottom; within a row nodes follow `order`.
pub(super) fn place_nodes(levels: &IndexMap<usize, usize>, order: NodeOrder) -> IndexMap<usize, Point> {
    let mut positions = IndexMap::with_capacity(levels.len());

    for (level, mut row) in group_by_level(levels) {
        if order == NodeOrder::Id {
            row.sort_unstable();
        }

        let y = -(level as f32);
        let offsets = row_offsets(row.len());
        for (node, x) in row.into_iter().zip(offsets) {
            positions.insert(node, Point::new(x, y));
        }
    }

    positions
}
