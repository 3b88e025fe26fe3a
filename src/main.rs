use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use u_tour::distance::DistanceMatrix;
use u_tour::io::{load_prior_solution, load_problem, persist_solution, ProblemFile};
use u_tour::search::{SearchConfig, SearchController};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan routes for a problem file
    Solve {
        /// Problem file with the travel-cost matrix and fleet size
        #[arg(short, long)]
        input: PathBuf,

        /// Previously exported routes to start from
        #[arg(short, long)]
        prior: Option<PathBuf>,

        /// Where to write the routes
        #[arg(short, long)]
        output: PathBuf,

        /// Search time limit in seconds
        #[arg(short, long, default_value_t = 90.0)]
        time_limit: f64,

        /// Stop after this many passes without improvement (0 = never)
        #[arg(long, default_value_t = 20_000)]
        stagnation: usize,

        /// Score moves on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Write a random Euclidean problem file
    #[command(visible_alias = "g")]
    Generate {
        /// Number of waypoints, depot excluded
        #[arg(short = 'n', long)]
        waypoints: usize,

        #[arg(short = 'k', long, default_value_t = 1)]
        vehicles: usize,

        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Side length of the square area, in meters
        #[arg(long, default_value_t = 1000.0)]
        extent: f64,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve {
            input,
            prior,
            output,
            time_limit,
            stagnation,
            sequential,
        } => {
            let problem = load_problem(&input)?;

            let prior = match prior.map(load_prior_solution).transpose() {
                Ok(prior) => prior.flatten(),
                Err(err) => {
                    warn!(%err, "ignoring unreadable prior routes");
                    None
                }
            };

            let config = SearchConfig::default()
                .with_time_limit_secs(time_limit)
                .with_max_stagnant_passes(stagnation)
                .with_parallel(!sequential);
            let result = SearchController::new(&problem, config)?.run(prior);

            info!("Total distance: {}", result.best_cost);
            for (vehicle, tour) in result.best.tours().iter().enumerate() {
                info!("Route {vehicle}: {tour:?}");
            }
            persist_solution(&result.best, &output)?;
        }
        Commands::Generate {
            waypoints,
            vehicles,
            seed,
            extent,
            output,
        } => {
            anyhow::ensure!(extent > 0.0, "extent must be positive, got {extent}");
            let mut rng = StdRng::seed_from_u64(seed);
            let points: Vec<(f64, f64)> = (0..=waypoints)
                .map(|_| (rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
                .collect();

            let mut matrix = DistanceMatrix::new(points.len());
            for (i, a) in points.iter().enumerate() {
                for (j, b) in points.iter().enumerate() {
                    matrix.set(i, j, (a.0 - b.0).hypot(a.1 - b.1));
                }
            }

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            ProblemFile::new(&matrix, vehicles).save(&output)?;
            info!(waypoints, vehicles, path = %output.display(), "generated problem");
        }
    }

    Ok(())
}
