use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::metric::DistanceMatrix;
use crate::node::{Node, NodeId};

use super::{ensure_not_empty, BestTour, Tour, TourAlgorithm, TourSolution, TourSolver};

/// Options for the exact solver. Neither option changes the returned tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BruteForceConfig {
    /// Split the search across rayon workers by the node placed after the anchor.
    pub parallel: bool,
    /// Abandon a partial tour once it costs at least the best complete tour.
    pub prune: bool,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            prune: true,
        }
    }
}

/// Exact tour solver enumerating every circuit through node 0.
///
/// Node 0 is fixed as the anchor and the remaining `N - 1` nodes are permuted
/// in place by swap-based backtracking, so rotations are never evaluated
/// twice. Reflections are evaluated. The first tour found with the minimal
/// cost wins.
#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    config: BruteForceConfig,
}

impl BruteForce {
    pub fn new(config: BruteForceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> BruteForceConfig {
        self.config
    }

    pub fn run(&self, nodes: &[Node]) -> Result<TourSolution> {
        ensure_not_empty(nodes)?;
        let started = Instant::now();
        let matrix = DistanceMatrix::from_nodes(nodes);

        let (best, evaluated) = if self.config.parallel && nodes.len() > 3 {
            search_branches(&matrix, self.config.prune)
        } else {
            let mut enumerator = Enumerator::new(&matrix, identity(nodes.len()), self.config.prune);
            enumerator.search(1, 0.0);
            (enumerator.best, enumerator.evaluated)
        };

        let (order, cost) = best.into_parts();
        let elapsed = started.elapsed();
        debug!(nodes = nodes.len(), evaluated, "brute force enumeration finished");
        info!(
            cost,
            elapsed_ms = elapsed.as_millis() as u64,
            "brute force tour found"
        );

        Ok(TourSolution {
            algorithm: TourAlgorithm::BruteForce,
            tour: Tour::new(order),
            cost,
            elapsed,
        })
    }
}

impl TourSolver for BruteForce {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::BruteForce
    }

    fn solve(&self, nodes: &[Node]) -> Result<TourSolution> {
        self.run(nodes)
    }
}

fn identity(len: usize) -> Vec<NodeId> {
    (0..len).collect()
}

/// Run one enumerator per choice of the slot after the anchor and reduce the
/// branch winners in branch order, which reproduces the sequential result.
fn search_branches(matrix: &DistanceMatrix, prune: bool) -> (BestTour, u64) {
    let len = matrix.len();
    let branches: Vec<(BestTour, u64)> = (1..len)
        .into_par_iter()
        .map(|choice| {
            let mut order = identity(len);
            order.swap(1, choice);
            let partial = matrix.get(order[0], order[1]);
            let mut enumerator = Enumerator::new(matrix, order, prune);
            enumerator.search(2, partial);
            (enumerator.best, enumerator.evaluated)
        })
        .collect();

    branches.into_iter().fold(
        (BestTour::new(), 0),
        |(best, evaluated), (branch_best, branch_evaluated)| {
            (best.merge(branch_best), evaluated + branch_evaluated)
        },
    )
}

/// Swap-based permutation search over a single index array.
///
/// Backtracking is iterative: `next[k]` holds the next candidate slot for
/// level `k` and `partial[k]` the open-path cost of `order[..k]`, both
/// allocated once per search.
struct Enumerator<'a> {
    matrix: &'a DistanceMatrix,
    order: Vec<NodeId>,
    prune: bool,
    best: BestTour,
    evaluated: u64,
}

impl<'a> Enumerator<'a> {
    fn new(matrix: &'a DistanceMatrix, order: Vec<NodeId>, prune: bool) -> Self {
        Self {
            matrix,
            order,
            prune,
            best: BestTour::new(),
            evaluated: 0,
        }
    }

    /// Enumerate every arrangement of `order[first..]`, where `order[..first]`
    /// is fixed and costs `base`. Requires `first >= 1`.
    fn search(&mut self, first: usize, base: f64) {
        let len = self.order.len();
        if first >= len {
            self.evaluate(base);
            return;
        }

        let mut next = vec![0usize; len];
        let mut partial = vec![0.0f64; len + 1];
        partial[first] = base;
        let mut level = first;
        next[level] = level;

        loop {
            if next[level] < len {
                let choice = next[level];
                self.order.swap(level, choice);
                let cost =
                    partial[level] + self.matrix.get(self.order[level - 1], self.order[level]);

                if level + 1 == len {
                    self.evaluate(cost);
                    self.order.swap(level, choice);
                    next[level] += 1;
                } else if self.prune && !self.best.is_empty() && cost >= self.best.cost() {
                    self.order.swap(level, choice);
                    next[level] += 1;
                } else {
                    partial[level + 1] = cost;
                    level += 1;
                    next[level] = level;
                }
            } else {
                if level == first {
                    break;
                }
                level -= 1;
                let choice = next[level];
                self.order.swap(level, choice);
                next[level] += 1;
            }
        }
    }

    fn evaluate(&mut self, open_cost: f64) {
        let last = self.order[self.order.len() - 1];
        let cost = open_cost + self.matrix.get(last, self.order[0]);
        self.evaluated += 1;
        self.best.offer(&self.order, cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Position;

    fn nodes(points: &[(f64, f64)]) -> Vec<Node> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new((i + 1).to_string(), Position::new(x, y)))
            .collect()
    }

    #[test]
    fn unpruned_search_visits_every_arrangement() {
        let nodes = nodes(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0), (0.0, 3.0), (4.0, 4.0)]);
        let matrix = DistanceMatrix::from_nodes(&nodes);
        let mut enumerator = Enumerator::new(&matrix, identity(5), false);
        enumerator.search(1, 0.0);
        assert_eq!(enumerator.evaluated, 24);
        assert_eq!(enumerator.order, identity(5), "order restored after backtracking");
    }

    #[test]
    fn pruning_evaluates_fewer_tours_with_same_winner() {
        let nodes = nodes(&[
            (0.0, 0.0),
            (5.0, 1.0),
            (1.0, 4.0),
            (6.0, 6.0),
            (2.0, 9.0),
            (9.0, 2.0),
            (3.0, 3.0),
        ]);
        let matrix = DistanceMatrix::from_nodes(&nodes);

        let mut full = Enumerator::new(&matrix, identity(7), false);
        full.search(1, 0.0);
        let mut pruned = Enumerator::new(&matrix, identity(7), true);
        pruned.search(1, 0.0);

        assert_eq!(full.evaluated, 720);
        assert!(pruned.evaluated < full.evaluated);
        assert_eq!(full.best.into_parts(), pruned.best.into_parts());
    }

    #[test]
    fn branch_reduction_matches_sequential_search() {
        let nodes = nodes(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.5, 2.0),
            (2.0, 0.5),
        ]);
        let matrix = DistanceMatrix::from_nodes(&nodes);
        let mut sequential = Enumerator::new(&matrix, identity(6), false);
        sequential.search(1, 0.0);

        let (parallel, evaluated) = search_branches(&matrix, false);
        assert_eq!(evaluated, 120);
        assert_eq!(parallel.into_parts(), sequential.best.into_parts());
    }
}
