//! Shortest-path strategies behind a common trait.
//!
//! Each algorithm is wrapped in its own planner struct so `plan_route` can
//! dispatch without knowing how a particular search is implemented.

use crate::node::NodeId;
use crate::path::{
    find_route_a_star, find_route_dijkstra, find_route_dijkstra_scan, PathOutcome,
};
use crate::registry::NodeRegistry;

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search between two resolved node identifiers.
    fn find_path(&self, registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome;
}

/// Dijkstra with a binary-heap frontier.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome {
        find_route_dijkstra(registry, start, goal)
    }
}

/// Dijkstra with O(V) linear-scan selection per step.
#[derive(Debug, Clone, Default)]
pub struct DijkstraScanPlanner;

impl RoutePlanner for DijkstraScanPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::DijkstraScan
    }

    fn find_path(&self, registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome {
        find_route_dijkstra_scan(registry, start, goal)
    }
}

/// A* guided by straight-line distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, registry: &NodeRegistry, start: NodeId, goal: NodeId) -> PathOutcome {
        find_route_a_star(registry, start, goal)
    }
}

/// Select the planner implementing `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::DijkstraScan => Box::new(DijkstraScanPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
