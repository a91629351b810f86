//! Configuration parameters for the two genetic engines.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration settings for the LSCP engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LscpConfig {
    /// Number of chromosomes kept in the population
    pub population_size: usize,
    /// Number of steady-state generations to run
    pub generations: usize,
    /// Asymptotic number of bits flipped per mutation (mf)
    pub max_mutations: f64,
    /// Generation at which the mutation count reaches mf / 2 (mc)
    pub mutation_midpoint: f64,
    /// Growth rate of the mutation schedule (mg)
    pub mutation_growth: f64,
    /// Cheapest covering facilities kept per point for the mutation pool
    pub num_elite_sets: usize,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for LscpConfig {
    fn default() -> Self {
        LscpConfig {
            population_size: 100,
            generations: 1000,
            max_mutations: 10.0,
            mutation_midpoint: 500.0,
            mutation_growth: 0.5,
            num_elite_sets: 5,
            seed: None,
        }
    }
}

impl LscpConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        LscpConfig::default()
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the logistic mutation schedule (mf, mc, mg).
    pub fn with_mutation_schedule(mut self, max: f64, midpoint: f64, growth: f64) -> Self {
        self.max_mutations = max;
        self.mutation_midpoint = midpoint;
        self.mutation_growth = growth;
        self
    }

    /// Set the number of elite sets per point.
    pub fn with_num_elite_sets(mut self, n: usize) -> Self {
        self.num_elite_sets = n;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters the engine cannot run with.
    pub fn validate(&self, total_points: usize) -> Result<()> {
        if total_points == 0 {
            return Err(Error::InvalidConfig("the instance has no points".into()));
        }
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "population_size must be at least 2 for binary tournaments, got {}",
                self.population_size
            )));
        }
        if !(self.max_mutations > 0.0) || !self.max_mutations.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "max_mutations must be positive and finite, got {}",
                self.max_mutations
            )));
        }
        if !self.mutation_midpoint.is_finite() || !self.mutation_growth.is_finite() {
            return Err(Error::InvalidConfig(
                "mutation_midpoint and mutation_growth must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration settings for the MCLP engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MclpConfig {
    /// Number of chromosomes kept in the population
    pub population_size: usize,
    /// Facilities per chromosome (k); falls back to the instance's maximum
    pub facilities: Option<usize>,
    /// Probability that a drawn parent pair produces offspring
    pub crossover_rate: f64,
    /// Per-gene mutation probability before stagnation
    pub mutation_rate_initial: f64,
    /// Per-gene mutation probability after the first stagnation phase
    pub mutation_rate_final: f64,
    /// Share of all other points kept as nearest neighbours, in percent
    pub nearest_percentage: f64,
    /// Stagnant generations that trigger the mutation-rate switch
    pub stagnation_switch: usize,
    /// Stagnant generations after the switch that end the run
    pub stagnation_stop: usize,
    /// Consecutive failed crossover coin flips before a pair is copied
    pub crossover_retry_limit: usize,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for MclpConfig {
    fn default() -> Self {
        MclpConfig {
            population_size: 20,
            facilities: None,
            crossover_rate: 0.9,
            mutation_rate_initial: 0.05,
            mutation_rate_final: 0.8,
            nearest_percentage: 5.0,
            stagnation_switch: 50,
            stagnation_stop: 100,
            crossover_retry_limit: 1000,
            seed: None,
        }
    }
}

impl MclpConfig {
    pub const DEFAULT_FACILITIES: usize = 5;

    /// Create a new configuration with default values.
    pub fn new() -> Self {
        MclpConfig::default()
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of facilities per chromosome.
    pub fn with_facilities(mut self, k: usize) -> Self {
        self.facilities = Some(k);
        self
    }

    /// Set the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the initial and final mutation rates.
    pub fn with_mutation_rates(mut self, initial: f64, final_rate: f64) -> Self {
        self.mutation_rate_initial = initial;
        self.mutation_rate_final = final_rate;
        self
    }

    /// Set the nearest-neighbour percentage.
    pub fn with_nearest_percentage(mut self, percentage: f64) -> Self {
        self.nearest_percentage = percentage;
        self
    }

    /// Set the stagnation thresholds for the rate switch and termination.
    pub fn with_stagnation(mut self, switch: usize, stop: usize) -> Self {
        self.stagnation_switch = switch;
        self.stagnation_stop = stop;
        self
    }

    /// Set the crossover retry cap.
    pub fn with_crossover_retry_limit(mut self, limit: usize) -> Self {
        self.crossover_retry_limit = limit;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The k used for a run, given the instance's own facility budget.
    pub fn resolve_facilities(&self, instance_max: usize) -> usize {
        match self.facilities {
            Some(k) => k,
            None if instance_max > 0 => instance_max,
            None => Self::DEFAULT_FACILITIES,
        }
    }

    /// Reject parameters the engine cannot run with.
    pub fn validate(&self, total_points: usize, facilities: usize) -> Result<()> {
        if facilities == 0 {
            return Err(Error::InvalidConfig(
                "at least one facility must be placed".into(),
            ));
        }
        if facilities >= total_points {
            return Err(Error::InvalidConfig(format!(
                "cannot sample {} distinct facilities from {} points",
                facilities, total_points
            )));
        }
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "population_size must be at least 2 for binary tournaments, got {}",
                self.population_size
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate_initial", self.mutation_rate_initial),
            ("mutation_rate_final", self.mutation_rate_final),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!(
                    "{} must lie in [0, 1], got {}",
                    name, rate
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.nearest_percentage) {
            return Err(Error::InvalidConfig(format!(
                "nearest_percentage must lie in [0, 100], got {}",
                self.nearest_percentage
            )));
        }
        if self.stagnation_switch == 0 || self.stagnation_stop == 0 {
            return Err(Error::InvalidConfig(
                "stagnation thresholds must be positive".into(),
            ));
        }
        Ok(())
    }
}
