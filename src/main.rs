//! confluence CLI - run a cooperative evolution simulation.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use confluence::prelude::*;
use confluence::random;

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Evolve cooperating organisms towards hidden target models", long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Random seed (drawn from entropy and logged when absent)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Population size
    #[arg(long)]
    population: Option<usize>,
    /// Challenge rounds per generation
    #[arg(long)]
    rounds: Option<usize>,
    /// Genes per model
    #[arg(long)]
    dimension: Option<usize>,
    /// Per-gene mutation probability
    #[arg(long)]
    mutation_probability: Option<f64>,
    /// Score every organism alone
    #[arg(long)]
    no_cooperation: bool,
    /// Alternate cooperative and solo rounds
    #[arg(long)]
    mixed_cooperation: bool,
    /// Clone winners instead of recombining them
    #[arg(long)]
    no_mating: bool,
    /// Score against a bit-flip observation of the true model with this noise
    #[arg(long)]
    observation_noise: Option<f64>,
    /// Statistics output format (`tracing` logs each generation to stderr)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Tracing,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let seed = config
        .seed
        .unwrap_or_else(|| random::from_entropy().gen());
    info!(seed, "seeding random source");
    let mut rng = random::seeded(seed);

    let ga = StandardGA::from_config(config)?;
    let stdout = io::stdout().lock();
    let result = match cli.format {
        OutputFormat::Text => ga.run(&mut rng, TextReporter::new(stdout))?,
        OutputFormat::Json => ga.run(&mut rng, JsonLinesReporter::new(stdout))?,
        OutputFormat::Tracing => ga.run(&mut rng, TracingReporter)?,
    };

    info!("{}", result.stats.summary());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if let Some(rounds) = cli.rounds {
        config.rounds_per_generation = rounds;
    }
    if let Some(dimension) = cli.dimension {
        config.dimension = dimension;
    }
    if let Some(probability) = cli.mutation_probability {
        config.mutation_probability = probability;
    }
    if cli.no_cooperation {
        config.cooperation_enabled = false;
    }
    if cli.mixed_cooperation {
        config.mixed_cooperation_enabled = true;
    }
    if cli.no_mating {
        config.mating_enabled = false;
    }
    if let Some(flip_probability) = cli.observation_noise {
        config.observation = ObservationModel::Noisy { flip_probability };
    }

    config.validate()?;
    Ok(config)
}
