//! Generational genetic algorithm for the Maximal Covering Location Problem.
//!
//! Each generation runs binary tournament selection, nearest-neighbour
//! mutation, single-point crossover and (μ+λ) survivor selection. The
//! run has no generation cap: once the best fitness stagnates for
//! `stagnation_switch` generations the mutation rate jumps to its final
//! value, and the run ends after `stagnation_stop` further stagnant
//! generations.

pub mod chromosome;
pub mod genetic;
pub mod population;

use crate::config::MclpConfig;
use crate::coverage::CoverageModel;
use crate::error::Result;
use crate::solution::SolutionRecord;
use crate::utils::RunStatistics;

use chromosome::MclpChromosome;
use genetic::Genetic;
use population::MclpPopulation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::borrow::Cow;
use std::time::{Duration, Instant};

/// Adaptive mutation-rate state driven by stagnation of the best fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct StagnationSchedule {
    pub mutation_rate: f64,
    pub final_rate: f64,
    pub switch_after: usize,
    pub stop_after: usize,
    pub stagnant: usize,
    pub switched: bool,
    previous_best: usize,
}

impl StagnationSchedule {
    pub fn new(config: &MclpConfig, initial_best: usize) -> Self {
        StagnationSchedule {
            mutation_rate: config.mutation_rate_initial,
            final_rate: config.mutation_rate_final,
            switch_after: config.stagnation_switch,
            stop_after: config.stagnation_stop,
            stagnant: 0,
            switched: false,
            previous_best: initial_best,
        }
    }

    /// Record the best fitness of a finished generation.
    ///
    /// Returns `true` once the run should stop.
    pub fn observe(&mut self, best: usize) -> bool {
        if best == self.previous_best {
            self.stagnant += 1;
        } else {
            self.stagnant = 0;
        }
        self.previous_best = best;

        if !self.switched && self.stagnant >= self.switch_after {
            self.stagnant = 0;
            self.mutation_rate = self.final_rate;
            self.switched = true;
            return false;
        }

        self.switched && self.stagnant >= self.stop_after
    }
}

/// Orchestrates one MCLP run over a shared coverage model.
///
/// The model is borrowed when its neighbour lists already match
/// `nearest_percentage`, and enriched into an owned copy otherwise.
pub struct MclpAlgorithm<'a> {
    pub model: Cow<'a, CoverageModel>,
    pub config: MclpConfig,
    pub genetic: Genetic,
    pub facilities: usize,
    pub population: MclpPopulation,
    pub schedule: StagnationSchedule,
    pub generations: usize,
    pub switch_generation: Option<usize>,
    pub run_time: Duration,
    rng: ChaCha8Rng,
}

impl<'a> MclpAlgorithm<'a> {
    /// Validate the configuration and prepare a run.
    ///
    /// `instance_max` is the instance's facility budget, used when the
    /// configuration does not fix k. Neighbour lists are computed with
    /// the configured `nearest_percentage` unless the model already
    /// carries them.
    pub fn new(model: &'a CoverageModel, config: MclpConfig, instance_max: usize) -> Result<Self> {
        let facilities = config.resolve_facilities(instance_max);
        config.validate(model.len(), facilities)?;

        let model = if model.nearest_percentage() == Some(config.nearest_percentage) {
            Cow::Borrowed(model)
        } else {
            log::debug!(
                "computing nearest neighbours at {}%",
                config.nearest_percentage
            );
            Cow::Owned(model.clone().with_nearest_neighbors(config.nearest_percentage))
        };

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let population =
            MclpPopulation::initialize(&model, config.population_size, facilities, &mut rng);
        let schedule = StagnationSchedule::new(&config, population.best_fitness());

        Ok(MclpAlgorithm {
            model,
            config,
            genetic: Genetic,
            facilities,
            population,
            schedule,
            generations: 0,
            switch_generation: None,
            run_time: Duration::from_secs(0),
            rng,
        })
    }

    /// Run one generation and return whether the run should stop.
    pub fn step(&mut self) -> bool {
        let size = self.population.len();
        let selected = self.population.tournament_selection(&mut self.rng);
        let mutated = MclpPopulation::mutate_all(
            &self.genetic,
            &selected,
            self.schedule.mutation_rate,
            &self.model,
            &mut self.rng,
        );
        let offspring = MclpPopulation::offspring(
            &self.genetic,
            &mutated,
            size,
            self.config.crossover_rate,
            self.config.crossover_retry_limit,
            &self.model,
            &mut self.rng,
        );
        self.population.select_survivors(offspring);
        self.generations += 1;

        let was_switched = self.schedule.switched;
        let done = self.schedule.observe(self.population.best_fitness());
        if self.schedule.switched && !was_switched {
            self.switch_generation = Some(self.generations);
            log::debug!(
                "generation {}: best fitness stagnated, mutation rate now {}",
                self.generations,
                self.schedule.mutation_rate
            );
        }
        done
    }

    /// Evolve until the stagnation criterion ends the run and return the
    /// fittest chromosome.
    pub fn run(&mut self) -> &MclpChromosome {
        let start = Instant::now();
        log::info!(
            "MCLP: {} points, k = {}, population {}, crossover rate {}",
            self.model.len(),
            self.facilities,
            self.population.len(),
            self.config.crossover_rate
        );

        while !self.step() {
            if self.generations % 100 == 0 {
                log::debug!(
                    "generation {}: best {}, stagnant for {}",
                    self.generations,
                    self.population.best_fitness(),
                    self.schedule.stagnant
                );
            }
        }

        self.run_time = start.elapsed();
        log::info!(
            "MCLP finished: {} points covered after {} generations",
            self.population.best_fitness(),
            self.generations
        );

        self.best()
    }

    /// Best chromosome in the current population.
    pub fn best(&self) -> &MclpChromosome {
        &self.population.individuals[self.population.best_index()]
    }

    /// The output record for the current best chromosome.
    pub fn solution(&self) -> SolutionRecord {
        let best = self.best();
        SolutionRecord::Mclp {
            result: best.genes().to_vec(),
            total_points_covered: best.fitness(),
        }
    }

    pub fn statistics(&self) -> RunStatistics {
        RunStatistics {
            generations: self.generations,
            runtime: self.run_time,
            best_fitness: self.population.best_fitness() as u64,
            population_size: self.population.len(),
            mutation_switch_generation: self.switch_generation,
        }
    }
}

/// Validate, run and summarize one MCLP search.
pub fn solve(
    model: &CoverageModel,
    config: MclpConfig,
    instance_max: usize,
) -> Result<(SolutionRecord, RunStatistics)> {
    let mut algorithm = MclpAlgorithm::new(model, config, instance_max)?;
    algorithm.run();
    Ok((algorithm.solution(), algorithm.statistics()))
}
