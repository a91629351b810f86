//! Command-line front end for the LSCP and MCLP genetic engines.

use clap::{Args, Parser, Subcommand};
use coverage_ga::config::{LscpConfig, MclpConfig};
use coverage_ga::coverage::CoverageModel;
use coverage_ga::problem::ProblemInstance;
use coverage_ga::{lscp, mclp};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coverage_ga", version, about = "Genetic algorithms for facility coverage problems")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cover every point with minimum total facility weight
    Lscp(LscpArgs),
    /// Place k facilities that cover as many points as possible
    Mclp(MclpArgs),
}

#[derive(Args)]
struct IoArgs {
    /// Problem instance written by the point generator
    #[arg(default_value = "population_points.json")]
    input: PathBuf,
    /// JSON file with engine parameters; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct LscpArgs {
    #[command(flatten)]
    io: IoArgs,
    /// Where to write the solution record
    #[arg(short, long, default_value = "genetic_solution_LSCP.json")]
    output: PathBuf,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    /// Asymptotic number of mutated bits (mf)
    #[arg(long)]
    max_mutations: Option<f64>,
    /// Generation where half of mf is reached (mc)
    #[arg(long)]
    mutation_midpoint: Option<f64>,
    /// Growth rate of the mutation schedule (mg)
    #[arg(long)]
    mutation_growth: Option<f64>,
    /// Cheapest covering facilities kept per point for mutation
    #[arg(long)]
    elite_sets: Option<usize>,
}

#[derive(Args)]
struct MclpArgs {
    #[command(flatten)]
    io: IoArgs,
    /// Where to write the solution record
    #[arg(short, long, default_value = "genetic_solution_MCLP.json")]
    output: PathBuf,
    #[arg(long)]
    population_size: Option<usize>,
    /// Facilities per solution (defaults to the instance's maximum)
    #[arg(short = 'k', long)]
    facilities: Option<usize>,
    #[arg(long)]
    crossover_rate: Option<f64>,
    #[arg(long)]
    mutation_rate_initial: Option<f64>,
    #[arg(long)]
    mutation_rate_final: Option<f64>,
    /// Share of other points kept as mutation neighbours, in percent
    #[arg(long)]
    nearest_percentage: Option<f64>,
}

fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, Box<dyn Error>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        None => Ok(T::default()),
    }
}

fn run_lscp(args: LscpArgs) -> Result<(), Box<dyn Error>> {
    let mut config: LscpConfig = load_config(args.io.config.as_deref())?;
    if let Some(size) = args.population_size {
        config.population_size = size;
    }
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(mf) = args.max_mutations {
        config.max_mutations = mf;
    }
    if let Some(mc) = args.mutation_midpoint {
        config.mutation_midpoint = mc;
    }
    if let Some(mg) = args.mutation_growth {
        config.mutation_growth = mg;
    }
    if let Some(n) = args.elite_sets {
        config.num_elite_sets = n;
    }
    if args.io.seed.is_some() {
        config.seed = args.io.seed;
    }

    log::info!("Loading problem from: {}", args.io.input.display());
    let problem = ProblemInstance::from_file(&args.io.input)?;
    let model = CoverageModel::new(&problem)?;

    let (solution, statistics) = lscp::solve(&model, config)?;

    log::info!("Saving solution to: {}", args.output.display());
    solution.save(&args.output)?;
    log::info!("{}", statistics.format());
    log::info!(
        "Solution covers all points: {}",
        model.covers_all(solution.result())
    );
    Ok(())
}

fn run_mclp(args: MclpArgs) -> Result<(), Box<dyn Error>> {
    let mut config: MclpConfig = load_config(args.io.config.as_deref())?;
    if let Some(size) = args.population_size {
        config.population_size = size;
    }
    if args.facilities.is_some() {
        config.facilities = args.facilities;
    }
    if let Some(rate) = args.crossover_rate {
        config.crossover_rate = rate;
    }
    if let Some(rate) = args.mutation_rate_initial {
        config.mutation_rate_initial = rate;
    }
    if let Some(rate) = args.mutation_rate_final {
        config.mutation_rate_final = rate;
    }
    if let Some(percentage) = args.nearest_percentage {
        config.nearest_percentage = percentage;
    }
    if args.io.seed.is_some() {
        config.seed = args.io.seed;
    }

    log::info!("Loading problem from: {}", args.io.input.display());
    let problem = ProblemInstance::from_file(&args.io.input)?;
    let model = CoverageModel::new(&problem)?;

    let (solution, statistics) = mclp::solve(&model, config, problem.max_facilities)?;

    log::info!("Saving solution to: {}", args.output.display());
    solution.save(&args.output)?;
    log::info!("{}", statistics.format());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Lscp(args) => run_lscp(args),
        Command::Mclp(args) => run_mclp(args),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
