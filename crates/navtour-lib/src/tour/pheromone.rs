use serde::Serialize;

use crate::node::NodeId;

/// Symmetric pheromone levels, one entry per node pair.
///
/// Entries `(a, b)` and `(b, a)` are always written together so the matrix
/// stays exactly symmetric through deposits and evaporation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PheromoneMatrix {
    size: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Uniform matrix with every entry set to `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            size,
            values: vec![initial; size * size],
        }
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

    /// Row `a` of the matrix.
    pub fn row(&self, a: NodeId) -> &[f64] {
        &self.values[a * self.size..(a + 1) * self.size]
    }

    /// Largest entry, useful for normalising a pheromone map.
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Add `amount` to the edge between `a` and `b`.
    pub fn deposit(&mut self, a: NodeId, b: NodeId, amount: f64) {
        let forward = a * self.size + b;
        self.values[forward] += amount;
        self.values[b * self.size + a] = self.values[forward];
    }

    /// Deposit `amount` on every edge of the closed tour `order`.
    pub fn deposit_tour(&mut self, order: &[NodeId], amount: f64) {
        if order.len() < 2 {
            return;
        }
        for pair in order.windows(2) {
            self.deposit(pair[0], pair[1], amount);
        }
        self.deposit(order[order.len() - 1], order[0], amount);
    }

    /// Multiply every entry by `retained`, the fraction kept per iteration.
    pub fn evaporate(&mut self, retained: f64) {
        for value in &mut self.values {
            *value *= retained;
        }
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|a| (a + 1..self.size).all(|b| self.get(a, b) == self.get(b, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_is_mirrored() {
        let mut matrix = PheromoneMatrix::new(3, 0.25);
        matrix.deposit(0, 2, 0.5);
        assert_eq!(matrix.get(0, 2), 0.75);
        assert_eq!(matrix.get(2, 0), 0.75);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn tour_deposit_covers_closing_edge() {
        let mut matrix = PheromoneMatrix::new(4, 0.0);
        matrix.deposit_tour(&[0, 1, 2, 3], 1.0);
        assert_eq!(matrix.get(0, 1), 1.0);
        assert_eq!(matrix.get(1, 2), 1.0);
        assert_eq!(matrix.get(2, 3), 1.0);
        assert_eq!(matrix.get(3, 0), 1.0);
        assert_eq!(matrix.get(0, 2), 0.0);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn evaporation_scales_all_entries() {
        let mut matrix = PheromoneMatrix::new(2, 1.0);
        matrix.deposit(0, 1, 1.0);
        matrix.evaporate(0.5);
        assert_eq!(matrix.get(0, 0), 0.5);
        assert_eq!(matrix.get(0, 1), 1.0);
        assert_eq!(matrix.row(1), &[1.0, 0.5]);
        assert_eq!(matrix.max_value(), 1.0);
    }
}
