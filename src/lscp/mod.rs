//! Steady-state genetic algorithm for the Location Set Covering Problem.
//!
//! Follows the Beasley and Chu (1996) scheme: feasible greedy-randomized
//! construction, binary tournaments, fitness-weighted crossover, a
//! logistic mutation schedule over an elite facility pool, a heuristic
//! repair operator and replacement of a worse-than-average member.

pub mod chromosome;
pub mod genetic;
pub mod population;
pub mod repair;

use crate::config::LscpConfig;
use crate::coverage::CoverageModel;
use crate::error::Result;
use crate::solution::SolutionRecord;
use crate::utils::RunStatistics;

use chromosome::LscpChromosome;
use genetic::{Genetic, MutationSchedule};
use population::LscpPopulation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use repair::Repair;
use std::time::{Duration, Instant};

/// Orchestrates one LSCP run over a shared coverage model.
pub struct LscpAlgorithm<'a> {
    pub model: &'a CoverageModel,
    pub config: LscpConfig,
    pub genetic: Genetic,
    pub schedule: MutationSchedule,
    pub elite_pool: Vec<usize>,
    pub population: LscpPopulation,
    pub generations: usize,
    pub replacements: usize,
    pub run_time: Duration,
    rng: ChaCha8Rng,
}

impl<'a> LscpAlgorithm<'a> {
    /// Validate the configuration and instance and prepare a run.
    pub fn new(model: &'a CoverageModel, config: LscpConfig) -> Result<Self> {
        config.validate(model.len())?;
        model.ensure_coverable()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let genetic = Genetic;
        let elite_pool = genetic.elite_pool(model, config.num_elite_sets);
        if elite_pool.is_empty() {
            log::warn!("elite-set union is empty; mutation is disabled");
        } else if config.max_mutations.floor() as usize > elite_pool.len() {
            log::warn!(
                "up to {} mutations requested but the elite pool holds {}; clamping",
                config.max_mutations.floor(),
                elite_pool.len()
            );
        }

        let mut algorithm = LscpAlgorithm {
            model,
            genetic,
            schedule: MutationSchedule::new(
                config.max_mutations,
                config.mutation_midpoint,
                config.mutation_growth,
            ),
            elite_pool,
            population: LscpPopulation { individuals: Vec::new() },
            config,
            generations: 0,
            replacements: 0,
            run_time: Duration::from_secs(0),
            rng,
        };
        algorithm.initialize();
        Ok(algorithm)
    }

    /// Refill the population with feasible chromosomes.
    pub fn initialize(&mut self) {
        self.population =
            LscpPopulation::initialize(self.model, self.config.population_size, &mut self.rng);
        self.generations = 0;
        self.replacements = 0;
    }

    /// Produce, repair and insert one child for generation `t`.
    pub fn step(&mut self, t: usize) {
        let (parent1, parent2) = self.population.select_parents(&mut self.rng);
        let mut genes = self.genetic.crossover(parent1, parent2, &mut self.rng);

        let count = self.schedule.count(t);
        self.genetic.mutate(&mut genes, &self.elite_pool, count, &mut self.rng);

        Repair::repair(&mut genes, self.model);
        let child = LscpChromosome::new(genes, self.model);

        if self
            .population
            .replace_above_average(child, &mut self.rng)
            .is_some()
        {
            self.replacements += 1;
        }
        self.generations += 1;
    }

    /// Run the full generation budget from the current population and
    /// return the lightest chromosome.
    pub fn run(&mut self) -> &LscpChromosome {
        let start = Instant::now();
        log::info!(
            "LSCP: {} points, population {}, {} generations, elite pool {}",
            self.model.len(),
            self.config.population_size,
            self.config.generations,
            self.elite_pool.len()
        );

        let report_every = (self.config.generations / 10).max(1);
        for t in 0..self.config.generations {
            self.step(t);

            if (t + 1) % report_every == 0 {
                log::debug!(
                    "generation {}: best {}, mean {:.2}, {} bits mutated",
                    t + 1,
                    self.best_fitness(),
                    self.population.average_fitness(),
                    self.schedule.count(t)
                );
            }
        }

        self.run_time = start.elapsed();
        log::info!(
            "LSCP finished: best weight {} after {} generations ({} replacements)",
            self.best_fitness(),
            self.generations,
            self.replacements
        );

        self.best()
    }

    /// Best chromosome in the current population.
    pub fn best(&self) -> &LscpChromosome {
        &self.population.individuals[self.population.best_index()]
    }

    fn best_fitness(&self) -> u64 {
        self.best().fitness()
    }

    /// The output record for the current best chromosome.
    pub fn solution(&self) -> SolutionRecord {
        let best = self.best();
        SolutionRecord::Lscp {
            result: best.selected(),
            total_weight: best.fitness(),
        }
    }

    pub fn statistics(&self) -> RunStatistics {
        RunStatistics {
            generations: self.generations,
            runtime: self.run_time,
            best_fitness: self.best_fitness(),
            population_size: self.population.len(),
            mutation_switch_generation: None,
        }
    }
}

/// Validate, run and summarize one LSCP search.
pub fn solve(model: &CoverageModel, config: LscpConfig) -> Result<(SolutionRecord, RunStatistics)> {
    let mut algorithm = LscpAlgorithm::new(model, config)?;
    algorithm.run();
    Ok((algorithm.solution(), algorithm.statistics()))
}
