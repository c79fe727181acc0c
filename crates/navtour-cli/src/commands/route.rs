//! Route command handler for computing paths between named nodes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use navtour_lib::{load_graph, plan_route, PathSummary, RouteAlgorithm, RouteRequest};

use navtour_cli::output::{emit, render_path, OutputFormat};

/// Algorithm names accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RouteAlgorithmArg {
    #[default]
    Dijkstra,
    DijkstraScan,
    AStar,
}

impl From<RouteAlgorithmArg> for RouteAlgorithm {
    fn from(value: RouteAlgorithmArg) -> Self {
        match value {
            RouteAlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            RouteAlgorithmArg::DijkstraScan => RouteAlgorithm::DijkstraScan,
            RouteAlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// `name, x, y` file.
    pub coordinates: PathBuf,
    /// `name_a, name_b` file.
    pub connections: PathBuf,
    /// Starting node name.
    pub from: String,
    /// Destination node name.
    pub to: String,
    pub algorithm: RouteAlgorithmArg,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(&self.from, &self.to, self.algorithm.into())
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported on stdout and is not an error.
pub fn handle_route_command(format: OutputFormat, args: &RouteCommandArgs) -> Result<()> {
    let registry = load_graph(&args.coordinates, &args.connections).with_context(|| {
        format!(
            "failed to load graph from {} and {}",
            args.coordinates.display(),
            args.connections.display()
        )
    })?;

    let plan = plan_route(&registry, &args.to_request())
        .with_context(|| format!("failed to plan route from {} to {}", args.from, args.to))?;
    info!(
        algorithm = %plan.algorithm,
        hops = plan.hop_count(),
        "route computed"
    );

    let summary = PathSummary::from_plan(&registry, &plan);
    emit(&render_path(&summary, format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_arg_maps_onto_library_algorithm() {
        let args = RouteCommandArgs {
            coordinates: PathBuf::from("c.txt"),
            connections: PathBuf::from("e.txt"),
            from: "A".to_string(),
            to: "B".to_string(),
            algorithm: RouteAlgorithmArg::AStar,
        };
        let request = args.to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.start, "A");
        assert_eq!(request.goal, "B");
    }

    #[test]
    fn algorithm_arg_names_are_kebab_case() {
        let names: Vec<String> = RouteAlgorithmArg::value_variants()
            .iter()
            .filter_map(|variant| variant.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["dijkstra", "dijkstra-scan", "a-star"]);
    }
}
