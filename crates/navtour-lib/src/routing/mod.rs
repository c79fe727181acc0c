//! Route planning by node name.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported shortest-path algorithms
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```
//! use navtour_lib::{plan_route, NodeRegistry, Position, RouteRequest};
//!
//! let mut registry = NodeRegistry::new();
//! registry.insert("A", Position::new(0.0, 0.0))?;
//! registry.insert("B", Position::new(3.0, 4.0))?;
//! registry.connect("A", "B");
//!
//! let plan = plan_route(&registry, &RouteRequest::dijkstra("A", "B"))?;
//! assert_eq!(plan.outcome.cost(), Some(5.0));
//! # Ok::<(), navtour_lib::Error>(())
//! ```

mod planner;

pub use planner::{
    select_planner, AStarPlanner, DijkstraPlanner, DijkstraScanPlanner, RoutePlanner,
};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::node::NodeId;
use crate::path::PathOutcome;
use crate::registry::NodeRegistry;

/// Supported shortest-path algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm with a binary-heap frontier.
    #[default]
    Dijkstra,
    /// Dijkstra's algorithm with linear-scan minimum selection.
    DijkstraScan,
    /// A* search (straight-line heuristic).
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::DijkstraScan => "dijkstra-scan",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// High-level route planning request addressed by node names.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, algorithm: RouteAlgorithm) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm,
        }
    }

    /// Convenience constructor for a Dijkstra route.
    pub fn dijkstra(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(start, goal, RouteAlgorithm::Dijkstra)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub outcome: PathOutcome,
}

impl RoutePlan {
    /// Number of hops in the route, `None` when the goal is unreachable.
    pub fn hop_count(&self) -> Option<usize> {
        self.outcome.path().map(|path| path.hop_count())
    }
}

/// Resolve the request's names and run the requested algorithm.
///
/// Unknown names are errors; an unreachable goal is returned as
/// [`PathOutcome::Unreachable`] inside an `Ok` plan.
pub fn plan_route(registry: &NodeRegistry, request: &RouteRequest) -> Result<RoutePlan> {
    let start = registry.resolve(&request.start)?;
    let goal = registry.resolve(&request.goal)?;

    let planner = select_planner(request.algorithm);
    let outcome = planner.find_path(registry, start, goal);
    debug!(
        algorithm = %request.algorithm,
        start = %request.start,
        goal = %request.goal,
        reachable = outcome.is_reachable(),
        "route planned"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start,
        goal,
        outcome,
    })
}
