//! Dense distance matrix.

use crate::models::{Node, NodeId};

/// Symmetric Euclidean distances between every pair of instance nodes,
/// stored row-major and indexed by [`NodeId`].
///
/// # Examples
///
/// ```
/// use swts_routing::models::{Node, NodeKind, Point};
/// use swts_routing::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::new("Depot", Point::new(0, 0), NodeKind::Depot),
///     Node::collection_area("Area1", Point::new(3, 4), 10, 5.0),
///     Node::collection_area("Area2", Point::new(6, 8), 20, 5.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.row(2), &[10.0, 5.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the matrix over `nodes`, in arena order.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let cells = nodes
            .iter()
            .flat_map(|from| nodes.iter().map(move |to| from.distance_to(to)))
            .collect();
        Self {
            rows: nodes.len(),
            cells,
        }
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns `true` for a matrix over no nodes.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Distance between two nodes.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the instance.
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        self.row(from)[to]
    }

    /// All distances out of `from`.
    pub fn row(&self, from: NodeId) -> &[f64] {
        &self.cells[from * self.rows..(from + 1) * self.rows]
    }

    /// Closest of `candidates` to `from`; the first listed wins ties.
    pub fn nearest_neighbor(&self, from: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
        let row = self.row(from);
        candidates
            .iter()
            .copied()
            .reduce(|best, id| if row[id] < row[best] { id } else { best })
    }
}
