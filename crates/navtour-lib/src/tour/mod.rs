//! Closed-tour solvers over a complete Euclidean graph.
//!
//! This module provides:
//! - [`BruteForce`] - exact permutation search
//! - [`AntColony`] - ant colony optimization metaheuristic
//! - [`TourSolver`] - common strategy trait, selected via [`select_solver`]
//!
//! Node identifiers in results are positions in the input slice.

mod brute_force;
mod colony;
mod pheromone;

pub use brute_force::{BruteForce, BruteForceConfig};
pub use colony::{AntColony, ColonyConfig, ColonyRun};
pub use pheromone::PheromoneMatrix;

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

/// Tour solving method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourAlgorithm {
    BruteForce,
    AntColony,
}

impl TourAlgorithm {
    /// Human-readable label shown in textual reports.
    pub fn label(self) -> &'static str {
        match self {
            TourAlgorithm::BruteForce => "Brute-Force Method",
            TourAlgorithm::AntColony => "Ant Colony Optimization Method",
        }
    }
}

impl fmt::Display for TourAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TourAlgorithm::BruteForce => "brute-force",
            TourAlgorithm::AntColony => "ant-colony",
        };
        f.write_str(value)
    }
}

/// Ordered visit sequence containing every node exactly once. The closing
/// edge from the last node back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tour(Vec<NodeId>);

impl Tour {
    pub fn new(order: Vec<NodeId>) -> Self {
        Self(order)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when the tour visits each of `0..count` exactly once.
    pub fn is_permutation_of(&self, count: usize) -> bool {
        if self.0.len() != count {
            return false;
        }
        let mut seen = vec![false; count];
        self.0
            .iter()
            .all(|&id| id < count && !std::mem::replace(&mut seen[id], true))
    }

    /// Rotate so the tour starts at `anchor`. The cost is unchanged.
    pub fn rotated_to(&self, anchor: NodeId) -> Tour {
        Tour(rotate_to_anchor(self.0.clone(), anchor))
    }

    /// Same circuit walked in the opposite direction, still starting at the
    /// same node.
    pub fn reflected(&self) -> Tour {
        let mut order = self.0.clone();
        if order.len() > 1 {
            order[1..].reverse();
        }
        Tour(order)
    }
}

/// Winning tour of a solver run.
#[derive(Debug, Clone)]
pub struct TourSolution {
    pub algorithm: TourAlgorithm,
    pub tour: Tour,
    pub cost: f64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Trait for tour solving strategies.
pub trait TourSolver: Send + Sync {
    fn algorithm(&self) -> TourAlgorithm;

    /// Solve the closed tour over `nodes`, treated as a complete graph.
    fn solve(&self, nodes: &[Node]) -> Result<TourSolution>;
}

/// Solver selection together with its configuration.
#[derive(Debug, Clone)]
pub enum TourMethod {
    BruteForce(BruteForceConfig),
    AntColony(ColonyConfig),
}

impl TourMethod {
    pub fn algorithm(&self) -> TourAlgorithm {
        match self {
            TourMethod::BruteForce(_) => TourAlgorithm::BruteForce,
            TourMethod::AntColony(_) => TourAlgorithm::AntColony,
        }
    }
}

/// Build the solver for `method`.
pub fn select_solver(method: TourMethod) -> Box<dyn TourSolver> {
    match method {
        TourMethod::BruteForce(config) => Box::new(BruteForce::new(config)),
        TourMethod::AntColony(config) => Box::new(AntColony::new(config)),
    }
}

/// Best tour seen so far. The first candidate is always taken, even at an
/// infinite cost. After that only a strictly cheaper candidate replaces it,
/// so the earliest of equal-cost tours is kept.
#[derive(Debug, Clone)]
pub(crate) struct BestTour {
    order: Vec<NodeId>,
    cost: f64,
}

impl BestTour {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub(crate) fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn offer(&mut self, order: &[NodeId], cost: f64) -> bool {
        if self.order.is_empty() || cost < self.cost {
            self.order.clear();
            self.order.extend_from_slice(order);
            self.cost = cost;
            true
        } else {
            false
        }
    }

    /// Fold a later-ordered accumulator into this one.
    pub(crate) fn merge(self, later: BestTour) -> BestTour {
        if self.order.is_empty() || (!later.order.is_empty() && later.cost < self.cost) {
            later
        } else {
            self
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<NodeId>, f64) {
        (self.order, self.cost)
    }
}

pub(crate) fn ensure_not_empty(nodes: &[Node]) -> Result<()> {
    if nodes.is_empty() {
        return Err(Error::EmptyNodeSet);
    }
    Ok(())
}

pub(crate) fn rotate_to_anchor(mut order: Vec<NodeId>, anchor: NodeId) -> Vec<NodeId> {
    if let Some(position) = order.iter().position(|&id| id == anchor) {
        order.rotate_left(position);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_tour_keeps_earliest_of_equal_costs() {
        let mut best = BestTour::new();
        assert!(best.offer(&[0, 1, 2], 3.0));
        assert!(!best.offer(&[0, 2, 1], 3.0));
        assert!(best.offer(&[0, 2, 1], 2.5));
        assert_eq!(best.into_parts(), (vec![0, 2, 1], 2.5));
    }

    #[test]
    fn first_offer_is_kept_even_when_infinite() {
        let mut best = BestTour::new();
        assert!(best.offer(&[0, 1, 2], f64::INFINITY));
        assert!(!best.offer(&[0, 2, 1], f64::INFINITY));
        assert!(best.offer(&[0, 2, 1], 7.0));
        assert_eq!(best.into_parts(), (vec![0, 2, 1], 7.0));
    }

    #[test]
    fn merge_never_returns_an_empty_accumulator_over_a_filled_one() {
        let mut filled = BestTour::new();
        filled.offer(&[0, 1], f64::INFINITY);
        assert_eq!(BestTour::new().merge(filled.clone()).into_parts().0, vec![0, 1]);
        assert_eq!(filled.merge(BestTour::new()).into_parts().0, vec![0, 1]);
    }

    #[test]
    fn merge_prefers_earlier_on_ties() {
        let mut first = BestTour::new();
        first.offer(&[0, 1], 2.0);
        let mut second = BestTour::new();
        second.offer(&[1, 0], 2.0);
        assert_eq!(first.merge(second).into_parts().0, vec![0, 1]);
    }

    #[test]
    fn rotation_and_reflection_keep_membership() {
        let tour = Tour::new(vec![2, 0, 3, 1]);
        assert_eq!(tour.rotated_to(0).nodes(), &[0, 3, 1, 2]);
        assert_eq!(tour.rotated_to(0).reflected().nodes(), &[0, 2, 1, 3]);
        assert!(tour.is_permutation_of(4));
        assert!(!Tour::new(vec![0, 0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1]).is_permutation_of(3));
    }
}
