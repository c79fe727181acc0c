//! Tour command handler for closed circuits through every house.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{info, warn};

use navtour_lib::{
    load_houses, select_solver, AntColony, BruteForceConfig, ColonyConfig, Node, TourMethod,
    TourSolution, TourSummary,
};

use navtour_cli::output::{emit, render_tour, OutputFormat};

/// Above this many houses exhaustive search takes noticeably long.
const BRUTE_FORCE_WARN_THRESHOLD: usize = 12;

/// Method names accepted by `--method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TourMethodArg {
    BruteForce,
    #[default]
    AntColony,
}

/// Arguments for the tour command. Unset colony options keep the library
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct TourCommandArgs {
    /// `x, y` file; houses are numbered from 1 in file order.
    pub houses: PathBuf,
    pub method: TourMethodArg,
    pub iterations: Option<usize>,
    pub ants: Option<usize>,
    pub evaporation: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub q: Option<f64>,
    pub seed: Option<u64>,
    /// Spread the search across rayon workers.
    pub parallel: bool,
    pub time_limit_ms: Option<u64>,
}

impl TourCommandArgs {
    /// Build the library solver selection from the CLI args.
    pub fn to_method(&self) -> TourMethod {
        match self.method {
            TourMethodArg::BruteForce => TourMethod::BruteForce(BruteForceConfig {
                parallel: self.parallel,
                ..BruteForceConfig::default()
            }),
            TourMethodArg::AntColony => {
                let defaults = ColonyConfig::default();
                TourMethod::AntColony(ColonyConfig {
                    iterations: self.iterations.unwrap_or(defaults.iterations),
                    colony_size: self.ants.unwrap_or(defaults.colony_size),
                    evaporation: self.evaporation.unwrap_or(defaults.evaporation),
                    alpha: self.alpha.unwrap_or(defaults.alpha),
                    beta: self.beta.unwrap_or(defaults.beta),
                    q: self.q.unwrap_or(defaults.q),
                    seed: self.seed,
                    parallel: self.parallel,
                    time_limit: self.time_limit_ms.map(Duration::from_millis),
                    ..defaults
                })
            }
        }
    }
}

/// Handle the tour subcommand.
pub fn handle_tour_command(format: OutputFormat, args: &TourCommandArgs) -> Result<()> {
    let registry = load_houses(&args.houses)
        .with_context(|| format!("failed to load houses from {}", args.houses.display()))?;

    let solution = solve(registry.nodes(), args.to_method()).context("failed to solve tour")?;
    let summary = TourSummary::from_solution(&registry, &solution);
    emit(&render_tour(&summary, format)?)
}

fn solve(nodes: &[Node], method: TourMethod) -> navtour_lib::Result<TourSolution> {
    match method {
        TourMethod::AntColony(config) => {
            let run = AntColony::new(config).run(nodes)?;
            info!(
                seed = run.seed,
                iterations = run.best_cost_history.len(),
                "ant colony run complete"
            );
            Ok(run.solution)
        }
        method => {
            if nodes.len() > BRUTE_FORCE_WARN_THRESHOLD {
                warn!(
                    houses = nodes.len(),
                    "brute force over this many houses may take a very long time"
                );
            }
            select_solver(method).solve(nodes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_keep_library_defaults() {
        let args = TourCommandArgs {
            houses: PathBuf::from("houses.txt"),
            ants: Some(8),
            seed: Some(3),
            ..TourCommandArgs::default()
        };
        match args.to_method() {
            TourMethod::AntColony(config) => {
                assert_eq!(config.colony_size, 8);
                assert_eq!(config.seed, Some(3));
                assert_eq!(config.iterations, 100);
                assert_eq!(config.evaporation, 0.92);
                assert_eq!(config.time_limit, None);
            }
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn brute_force_carries_parallel_flag() {
        let args = TourCommandArgs {
            method: TourMethodArg::BruteForce,
            parallel: true,
            ..TourCommandArgs::default()
        };
        match args.to_method() {
            TourMethod::BruteForce(config) => {
                assert!(config.parallel);
                assert!(config.prune);
            }
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn time_limit_is_converted_to_duration() {
        let args = TourCommandArgs {
            time_limit_ms: Some(250),
            ..TourCommandArgs::default()
        };
        match args.to_method() {
            TourMethod::AntColony(config) => {
                assert_eq!(config.time_limit, Some(Duration::from_millis(250)))
            }
            other => panic!("unexpected method {other:?}"),
        }
    }
}
