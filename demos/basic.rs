//! Basic example of running both engines on a generated instance.

use coverage_ga::config::{LscpConfig, MclpConfig};
use coverage_ga::coverage::CoverageModel;
use coverage_ga::problem::ProblemInstance;
use coverage_ga::utils::format_duration;
use coverage_ga::{LscpAlgorithm, MclpAlgorithm};
use std::env;
use std::time::Instant;

/// Points on a jittered 10x10 grid, weights cycling through 1..=3.
fn grid_instance() -> ProblemInstance {
    let sites: Vec<(f64, f64, u64)> = (0..100)
        .map(|i| {
            let x = (i % 10) as f64 * 100.0 + ((i * 37) % 11) as f64;
            let y = (i / 10) as f64 * 100.0 + ((i * 53) % 13) as f64;
            (x, y, 1 + (i % 3) as u64)
        })
        .collect();
    ProblemInstance::from_coordinates(125.0, 5, &sites)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load an instance from the command line or build one
    let args: Vec<String> = env::args().collect();
    let problem = if args.len() > 1 {
        println!("Loading problem from: {}", args[1]);
        ProblemInstance::from_file(&args[1])?
    } else {
        grid_instance()
    };
    println!(
        "Loaded problem with {} points, radius {}",
        problem.len(),
        problem.radius
    );

    let model = CoverageModel::new(&problem)?.with_nearest_neighbors(5.0);

    // Set covering
    let config = LscpConfig::new()
        .with_population_size(100)
        .with_generations(1000)
        .with_mutation_schedule(10.0, 500.0, 0.5)
        .with_seed(2024);
    let start_time = Instant::now();
    let mut lscp = LscpAlgorithm::new(&model, config)?;
    let best = lscp.run();
    println!(
        "LSCP: weight {} with {} facilities in {}",
        best.fitness(),
        best.selected().len(),
        format_duration(start_time.elapsed())
    );
    println!("Feasible: {}", best.is_feasible(&model));

    // Maximal covering
    let config = MclpConfig::new().with_seed(2024);
    let start_time = Instant::now();
    let mut mclp = MclpAlgorithm::new(&model, config, problem.max_facilities)?;
    let best = mclp.run();
    println!(
        "MCLP: {} of {} points covered by {:?} in {}",
        best.fitness(),
        problem.len(),
        best.genes(),
        format_duration(start_time.elapsed())
    );

    println!("{}", mclp.solution().to_json()?);
    println!("{}", mclp.statistics().format());

    Ok(())
}
