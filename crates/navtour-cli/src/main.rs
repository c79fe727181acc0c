mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navtour_cli::output::OutputFormat;

use commands::route::{handle_route_command, RouteAlgorithmArg, RouteCommandArgs};
use commands::tour::{handle_tour_command, TourCommandArgs, TourMethodArg};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest routes and closed tours over 2D points")]
struct Cli {
    /// Report format written to stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two named nodes.
    Route {
        /// File of `name, x, y` rows.
        #[arg(long)]
        coordinates: PathBuf,
        /// File of `name_a, name_b` rows; unknown names are skipped.
        #[arg(long)]
        connections: PathBuf,
        /// Starting node name.
        #[arg(long = "from")]
        from: String,
        /// Destination node name.
        #[arg(long = "to")]
        to: String,
        /// Shortest-path algorithm.
        #[arg(long, value_enum, default_value_t = RouteAlgorithmArg::Dijkstra)]
        algorithm: RouteAlgorithmArg,
    },
    /// Find a short closed tour visiting every house once.
    Tour {
        /// File of `x, y` rows; houses are numbered from 1.
        #[arg(long)]
        houses: PathBuf,
        /// Tour solving method.
        #[arg(long, value_enum, default_value_t = TourMethodArg::AntColony)]
        method: TourMethodArg,
        /// Ant colony iterations.
        #[arg(long)]
        iterations: Option<usize>,
        /// Ants per iteration.
        #[arg(long)]
        ants: Option<usize>,
        /// Fraction of pheromone kept after each iteration, in (0, 1).
        #[arg(long)]
        evaporation: Option<f64>,
        /// Pheromone exponent.
        #[arg(long)]
        alpha: Option<f64>,
        /// Inverse-distance exponent.
        #[arg(long)]
        beta: Option<f64>,
        /// Pheromone deposit scale.
        #[arg(long)]
        q: Option<f64>,
        /// Seed for a reproducible ant colony run.
        #[arg(long)]
        seed: Option<u64>,
        /// Search on all available cores.
        #[arg(long)]
        parallel: bool,
        /// Stop starting new ant colony iterations after this many milliseconds.
        #[arg(long = "time-limit-ms")]
        time_limit_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            coordinates,
            connections,
            from,
            to,
            algorithm,
        } => handle_route_command(
            cli.format,
            &RouteCommandArgs {
                coordinates,
                connections,
                from,
                to,
                algorithm,
            },
        ),
        Command::Tour {
            houses,
            method,
            iterations,
            ants,
            evaporation,
            alpha,
            beta,
            q,
            seed,
            parallel,
            time_limit_ms,
        } => handle_tour_command(
            cli.format,
            &TourCommandArgs {
                houses,
                method,
                iterations,
                ants,
                evaporation,
                alpha,
                beta,
                q,
                seed,
                parallel,
                time_limit_ms,
            },
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
