//! Pairwise distance table shared by the tour solvers.

use crate::node::{Node, NodeId};

/// Dense, symmetric table of pairwise distances in node insertion order.
///
/// The tour problems treat the node set as a complete graph, so every pair
/// is precomputed once per solve.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let size = nodes.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = nodes[i].distance_to(&nodes[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { size, values }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, a: NodeId, b: NodeId) -> f64 {
        self.values[a * self.size + b]
    }

    /// Cost of the closed tour visiting `order` and returning to its first node.
    pub fn tour_cost(&self, order: &[NodeId]) -> f64 {
        match order {
            [] | [_] => 0.0,
            [first, .., last] => {
                let open: f64 = order.windows(2).map(|pair| self.get(pair[0], pair[1])).sum();
                open + self.get(*last, *first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Position;

    fn square() -> Vec<Node> {
        vec![
            Node::new("1", Position::new(0.0, 0.0)),
            Node::new("2", Position::new(0.0, 1.0)),
            Node::new("3", Position::new(1.0, 1.0)),
            Node::new("4", Position::new(1.0, 0.0)),
        ]
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let matrix = DistanceMatrix::from_nodes(&square());
        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!((matrix.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn tour_cost_includes_closing_edge() {
        let matrix = DistanceMatrix::from_nodes(&square());
        assert_eq!(matrix.tour_cost(&[0, 1, 2, 3]), 4.0);
        assert_eq!(matrix.tour_cost(&[0]), 0.0);
        assert_eq!(matrix.tour_cost(&[]), 0.0);
        assert_eq!(matrix.tour_cost(&[0, 1]), 2.0);
    }
}
