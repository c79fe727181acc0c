use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::metric::DistanceMatrix;
use crate::node::{Node, NodeId};

use super::{
    ensure_not_empty, rotate_to_anchor, BestTour, PheromoneMatrix, Tour, TourAlgorithm,
    TourSolution, TourSolver,
};

/// Node every returned tour is rotated to start from.
const ANCHOR: NodeId = 0;

/// Parameters for [`AntColony`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColonyConfig {
    /// Number of construct/reinforce rounds.
    pub iterations: usize,
    /// Ants constructed per iteration.
    pub colony_size: usize,
    /// Fraction of pheromone retained after each iteration, in (0, 1).
    pub evaporation: f64,
    /// Exponent applied to the pheromone level during selection.
    pub alpha: f64,
    /// Exponent applied to the inverse distance during selection.
    pub beta: f64,
    /// Pheromone deposit scale; an ant deposits `q / tour_cost` per edge.
    pub q: f64,
    /// Uniform pheromone level at the start of a run.
    pub initial_pheromone: f64,
    /// Seed for reproducible runs; a random seed is drawn when `None`.
    pub seed: Option<u64>,
    /// Construct the ants of an iteration on rayon workers.
    pub parallel: bool,
    /// Stop before starting a new iteration once this much time has passed.
    /// The first iteration always runs.
    pub time_limit: Option<Duration>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            colony_size: 50,
            evaporation: 0.92,
            alpha: 1.8,
            beta: 2.5,
            q: 0.0001,
            initial_pheromone: 0.1,
            seed: None,
            parallel: false,
            time_limit: None,
        }
    }
}

impl ColonyConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter range before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be at least 1"));
        }
        if self.colony_size == 0 {
            return Err(invalid("colony_size", "must be at least 1"));
        }
        if !(self.evaporation > 0.0 && self.evaporation < 1.0) {
            return Err(invalid(
                "evaporation",
                format!("must lie strictly between 0 and 1, got {}", self.evaporation),
            ));
        }
        for (field, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        for (field, value) in [("q", self.q), ("initial_pheromone", self.initial_pheromone)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(
                    field,
                    format!("must be finite and positive, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        message: message.into(),
    }
}

/// Outcome of an ant colony run.
#[derive(Debug, Clone)]
pub struct ColonyRun {
    pub solution: TourSolution,
    /// Pheromone levels after the final evaporation.
    pub pheromones: PheromoneMatrix,
    /// Best known cost after each completed iteration; never increases.
    pub best_cost_history: Vec<f64>,
    /// Seed the run used, so an unseeded run can be replayed.
    pub seed: u64,
}

/// Ant colony optimization over a complete Euclidean graph.
///
/// Within an iteration every ant reads the same pheromone matrix, so ants may
/// be built concurrently. Deposits and evaporation are applied afterwards in
/// ant order from the calling thread. Each ant draws from its own generator
/// seeded by the run's master generator, so a seeded run returns the same
/// tour whether or not `parallel` is set.
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    config: ColonyConfig,
}

impl AntColony {
    pub fn new(config: ColonyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn run(&self, nodes: &[Node]) -> Result<ColonyRun> {
        ensure_not_empty(nodes)?;
        self.config.validate()?;

        let config = &self.config;
        let started = Instant::now();
        let matrix = DistanceMatrix::from_nodes(nodes);
        let mut pheromones = PheromoneMatrix::new(nodes.len(), config.initial_pheromone);
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut master = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut best = BestTour::new();
        let mut history = Vec::with_capacity(config.iterations);

        debug!(
            nodes = nodes.len(),
            iterations = config.iterations,
            colony_size = config.colony_size,
            seed,
            parallel = config.parallel,
            "starting ant colony"
        );

        for iteration in 0..config.iterations {
            if let Some(limit) = config.time_limit {
                if iteration > 0 && started.elapsed() >= limit {
                    debug!(iteration, "time limit reached, stopping early");
                    break;
                }
            }

            let seeds: Vec<u64> = (0..config.colony_size).map(|_| master.gen()).collect();
            let ants: Vec<AntTour> = if config.parallel {
                seeds
                    .par_iter()
                    .map(|&ant_seed| construct_tour(&matrix, &pheromones, config, ant_seed))
                    .collect()
            } else {
                seeds
                    .iter()
                    .map(|&ant_seed| construct_tour(&matrix, &pheromones, config, ant_seed))
                    .collect()
            };

            for ant in &ants {
                best.offer(&ant.order, ant.cost);
            }
            for ant in &ants {
                if ant.cost > 0.0 {
                    pheromones.deposit_tour(&ant.order, config.q / ant.cost);
                }
            }
            pheromones.evaporate(config.evaporation);

            history.push(best.cost());
            trace!(iteration, best = best.cost(), "iteration complete");
        }

        let (order, cost) = best.into_parts();
        let elapsed = started.elapsed();
        info!(
            cost,
            iterations = history.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "ant colony tour found"
        );

        Ok(ColonyRun {
            solution: TourSolution {
                algorithm: TourAlgorithm::AntColony,
                tour: Tour::new(rotate_to_anchor(order, ANCHOR)),
                cost,
                elapsed,
            },
            pheromones,
            best_cost_history: history,
            seed,
        })
    }
}

impl TourSolver for AntColony {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::AntColony
    }

    fn solve(&self, nodes: &[Node]) -> Result<TourSolution> {
        self.run(nodes).map(|run| run.solution)
    }
}

struct AntTour {
    order: Vec<NodeId>,
    cost: f64,
}

fn construct_tour(
    matrix: &DistanceMatrix,
    pheromones: &PheromoneMatrix,
    config: &ColonyConfig,
    seed: u64,
) -> AntTour {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let len = matrix.len();
    let mut remaining: Vec<NodeId> = (0..len).collect();
    let mut order = Vec::with_capacity(len);
    let mut weights = Vec::with_capacity(len);

    let mut current = remaining.remove(rng.gen_range(0..len));
    order.push(current);

    while !remaining.is_empty() {
        let pick = select_next(
            current,
            &remaining,
            matrix,
            pheromones,
            config,
            &mut rng,
            &mut weights,
        );
        current = remaining.remove(pick);
        order.push(current);
    }

    let cost = matrix.tour_cost(&order);
    AntTour { order, cost }
}

/// Roulette-wheel choice among `remaining`, weighted by
/// `pheromone^alpha * (1 / distance)^beta`. Returns an index into `remaining`.
fn select_next<R: Rng>(
    current: NodeId,
    remaining: &[NodeId],
    matrix: &DistanceMatrix,
    pheromones: &PheromoneMatrix,
    config: &ColonyConfig,
    rng: &mut R,
    weights: &mut Vec<f64>,
) -> usize {
    let fallback = remaining.len() - 1;
    weights.clear();
    let mut total = 0.0;

    for (index, &candidate) in remaining.iter().enumerate() {
        let distance = matrix.get(current, candidate);
        // A coincident node has unbounded attractiveness.
        if distance == 0.0 {
            return index;
        }
        let weight = pheromones.get(current, candidate).powf(config.alpha)
            * (1.0 / distance).powf(config.beta);
        weights.push(weight);
        total += weight;
    }

    if !(total.is_finite() && total > 0.0) {
        return fallback;
    }

    let threshold = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if threshold <= cumulative {
            return index;
        }
    }

    fallback
}
