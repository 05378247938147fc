//! Square adjacency matrices of edge capacities.
//!
//! Row index is the edge source, column index the edge target. The matrix is
//! validated on construction so downstream code can index it freely.

use thiserror::Error;

use crate::capacity::Capacity;

/// Errors raised when a set of rows does not form a valid adjacency matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("adjacency matrix has no rows")]
    Empty,

    #[error("adjacency matrix is not square: row {row} has {actual} cells, expected {expected}")]
    NonSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A validated N x N matrix of capacities.
///
/// # Examples
///
/// ```
/// # use flowplot_core::matrix::AdjacencyMatrix;
/// let matrix = AdjacencyMatrix::new(vec![
///     vec![0, 5, 0],
///     vec![0, 0, 3],
///     vec![0, 0, 0],
/// ]).unwrap();
///
/// assert_eq!(matrix.size(), 3);
/// let edges: Vec<_> = matrix.edges().map(|(from, to, c)| (from, to, *c)).collect();
/// assert_eq!(edges, vec![(0, 1, 5), (1, 2, 3)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix<C> {
    rows: Vec<Vec<C>>,
}

impl<C> AdjacencyMatrix<C> {
    /// Creates a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Empty`] when there are no rows and
    /// [`MatrixError::NonSquare`] for the first row whose length differs from
    /// the number of rows.
    pub fn new(rows: Vec<Vec<C>>) -> Result<Self, MatrixError> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }

        let expected = rows.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(MatrixError::NonSquare {
                row,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self { rows })
    }

    /// Returns the number of nodes, i.e. the side length of the matrix.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if `index` names a node of this matrix.
    pub fn contains(&self, index: usize) -> bool {
        index < self.size()
    }
}

impl<C: Capacity> AdjacencyMatrix<C> {
    /// Returns every cell that denotes an edge as `(from, to, capacity)`.
    ///
    /// Cells are visited row by row, columns ascending, which is also the
    /// order successors are explored during level assignment.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &C)> {
        self.rows.iter().enumerate().flat_map(|(from, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, capacity)| capacity.is_edge())
                .map(move |(to, capacity)| (from, to, capacity))
        })
    }

    /// Returns the number of cells that denote an edge.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

impl<C> TryFrom<Vec<Vec<C>>> for AdjacencyMatrix<C> {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<C>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_square_matrix() {
        let matrix = AdjacencyMatrix::new(vec![vec![0, 1], vec![0, 0]]).unwrap();
        assert_eq!(matrix.size(), 2);
        assert!(matrix.contains(1));
        assert!(!matrix.contains(2));
        assert_eq!(matrix.edges().map(|(from, to, _)| (from, to)).collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let result = AdjacencyMatrix::<i64>::new(Vec::new());
        assert_eq!(result, Err(MatrixError::Empty));
    }

    #[test]
    fn test_non_square_matrix_is_rejected() {
        let result = AdjacencyMatrix::new(vec![vec![0, 1, 0], vec![0, 0], vec![0, 0, 0]]);
        assert_eq!(
            result,
            Err(MatrixError::NonSquare {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rectangular_matrix_is_rejected() {
        let result = AdjacencyMatrix::new(vec![vec![0, 1, 2], vec![0, 0, 1]]);
        assert!(matches!(result, Err(MatrixError::NonSquare { row: 0, .. })));
    }

    #[test]
    fn test_edges_skip_zero_cells() {
        let matrix = AdjacencyMatrix::new(vec![
            vec![0.0, 2.5, 1.0],
            vec![0.0, 0.0, 0.0],
            vec![4.0, 0.0, 0.0],
        ])
        .unwrap();

        let edges: Vec<_> = matrix.edges().map(|(f, t, c)| (f, t, *c)).collect();
        assert_eq!(edges, vec![(0, 1, 2.5), (0, 2, 1.0), (2, 0, 4.0)]);
        assert_eq!(matrix.edge_count(), 3);
    }

    #[test]
    fn test_edges_keep_self_loops() {
        let matrix = AdjacencyMatrix::new(vec![vec![1, 0], vec![0, 0]]).unwrap();
        let edges: Vec<_> = matrix.edges().map(|(f, t, _)| (f, t)).collect();
        assert_eq!(edges, vec![(0, 0)]);
    }

    #[test]
    fn test_string_matrix_edges() {
        let matrix = AdjacencyMatrix::try_from(vec![
            vec!["0".to_string(), "1/2".to_string()],
            vec!["0".to_string(), "0".to_string()],
        ])
        .unwrap();

        let edges: Vec<_> = matrix.edges().map(|(f, t, c)| (f, t, c.clone())).collect();
        assert_eq!(edges, vec![(0, 1, "1/2".to_string())]);
    }
}
