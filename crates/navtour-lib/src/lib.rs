//! navtour library entry points.
//!
//! This crate holds a registry of named 2D nodes, shortest-path search over
//! the registry's symmetric adjacency, and closed-tour solvers (exact brute
//! force and ant colony optimization) over the complete graph of all nodes.
//! Loading text inputs and rendering summaries are provided as thin helpers;
//! the CLI should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod input;
pub mod metric;
pub mod node;
pub mod output;
pub mod path;
pub mod registry;
pub mod routing;
pub mod tour;

pub use error::{Error, Result};
pub use input::{load_graph, load_houses};
pub use metric::DistanceMatrix;
pub use node::{Node, NodeId, Position};
pub use output::{PathSummary, Stop, TourSummary};
pub use path::{
    find_route_a_star, find_route_dijkstra, find_route_dijkstra_scan, PathOutcome, ShortestPath,
};
pub use registry::{Edge, NodeRegistry};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
pub use tour::{
    select_solver, AntColony, BruteForce, BruteForceConfig, ColonyConfig, ColonyRun,
    PheromoneMatrix, Tour, TourAlgorithm, TourMethod, TourSolution, TourSolver,
};
