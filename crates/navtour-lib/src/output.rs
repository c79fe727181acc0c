use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::node::NodeId;
use crate::path::PathOutcome;
use crate::registry::NodeRegistry;
use crate::routing::{RouteAlgorithm, RoutePlan};
use crate::tour::{TourAlgorithm, TourSolution};

/// Named stop along a path or tour.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stop {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Stop {
    fn resolve(registry: &NodeRegistry, id: NodeId) -> Self {
        match registry.node(id) {
            Some(node) => Self {
                id,
                name: node.name.clone(),
                x: node.position.x,
                y: node.position.y,
            },
            None => Self {
                id,
                name: "<unknown>".to_string(),
                x: f64::NAN,
                y: f64::NAN,
            },
        }
    }
}

/// Serialisable shortest-path report with resolved names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    pub goal: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    pub steps: Vec<Stop>,
}

impl PathSummary {
    pub fn from_plan(registry: &NodeRegistry, plan: &RoutePlan) -> Self {
        let name = |id| registry.name(id).unwrap_or("<unknown>").to_string();
        let (total_distance, steps) = match &plan.outcome {
            PathOutcome::Found(path) => (
                Some(path.cost),
                path.nodes
                    .iter()
                    .map(|&id| Stop::resolve(registry, id))
                    .collect(),
            ),
            PathOutcome::Unreachable => (None, Vec::new()),
        };

        Self {
            algorithm: plan.algorithm,
            start: name(plan.start),
            goal: name(plan.goal),
            reachable: plan.outcome.is_reachable(),
            total_distance,
            steps,
        }
    }

    /// Console report, e.g. `Total Distance: 4.00. Path: A -> B -> C`.
    pub fn render_text(&self) -> String {
        match self.total_distance {
            Some(distance) => {
                let path = self
                    .steps
                    .iter()
                    .map(|stop| stop.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                format!("Total Distance: {distance:.2}. Path: {path}")
            }
            None => "No path could be found.".to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialisable tour report with resolved names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourSummary {
    pub algorithm: TourAlgorithm,
    pub total_distance: f64,
    pub elapsed_seconds: f64,
    pub stops: Vec<Stop>,
}

impl TourSummary {
    pub fn from_solution(registry: &NodeRegistry, solution: &TourSolution) -> Self {
        Self {
            algorithm: solution.algorithm,
            total_distance: solution.cost,
            elapsed_seconds: solution.elapsed.as_secs_f64(),
            stops: solution
                .tour
                .nodes()
                .iter()
                .map(|&id| Stop::resolve(registry, id))
                .collect(),
        }
    }

    /// Console report; stops are listed by 1-based position with the start
    /// repeated at the end to close the circuit.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut positions: Vec<String> = self
            .stops
            .iter()
            .map(|stop| (stop.id + 1).to_string())
            .collect();
        if let Some(first) = positions.first().cloned() {
            positions.push(first);
        }

        let _ = writeln!(out, "Method: {}", self.algorithm.label());
        let _ = writeln!(out, "Shortest Distance: {:.5}", self.total_distance);
        let _ = writeln!(out, "Shortest Path: [{}]", positions.join(", "));
        let _ = write!(
            out,
            "Time it takes to find the shortest path: {:.2} seconds.",
            self.elapsed_seconds
        );
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
