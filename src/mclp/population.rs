//! Generational population management for the maximal covering engine.

use crate::coverage::CoverageModel;
use crate::mclp::chromosome::MclpChromosome;
use crate::mclp::genetic::Genetic;
use rand::seq::index;
use rand::Rng;

/// A fixed-size population of k-facility chromosomes.
pub struct MclpPopulation {
    pub individuals: Vec<MclpChromosome>,
}

impl MclpPopulation {
    /// Sample `size` chromosomes of `k` distinct random points.
    pub fn initialize<R: Rng>(model: &CoverageModel, size: usize, k: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| MclpChromosome::new(index::sample(rng, model.len(), k).into_vec(), model))
            .collect();
        MclpPopulation { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Highest fitness in the population.
    pub fn best_fitness(&self) -> usize {
        self.individuals
            .iter()
            .map(MclpChromosome::fitness)
            .max()
            .unwrap_or(0)
    }

    /// Index of the fittest chromosome, first one on ties; 0 for an
    /// empty population.
    pub fn best_index(&self) -> usize {
        self.individuals
            .iter()
            .enumerate()
            .fold(0, |best, (i, candidate)| {
                if candidate.fitness() > self.individuals[best].fitness() {
                    i
                } else {
                    best
                }
            })
    }

    /// Fill a mating pool of the same size with binary tournament winners.
    pub fn tournament_selection<R: Rng>(&self, rng: &mut R) -> Vec<MclpChromosome> {
        let mut selected = Vec::with_capacity(self.individuals.len());

        while selected.len() < self.individuals.len() {
            let pair = index::sample(rng, self.individuals.len(), 2);
            let first = &self.individuals[pair.index(0)];
            let second = &self.individuals[pair.index(1)];

            let winner = if first.fitness() > second.fitness() {
                first
            } else {
                second
            };
            selected.push(winner.clone());
        }

        selected
    }

    /// Mutate every member of a mating pool.
    pub fn mutate_all<R: Rng>(
        genetic: &Genetic,
        pool: &[MclpChromosome],
        rate: f64,
        model: &CoverageModel,
        rng: &mut R,
    ) -> Vec<MclpChromosome> {
        pool.iter()
            .map(|chromosome| genetic.mutate(chromosome, rate, model, rng))
            .collect()
    }

    /// Draw distinct parent pairs from `pool` until `target` offspring exist.
    ///
    /// A pair only reproduces with probability `crossover_rate`. After
    /// `retry_limit` consecutive failures the drawn pair is copied over so
    /// the loop is bounded.
    pub fn offspring<R: Rng>(
        genetic: &Genetic,
        pool: &[MclpChromosome],
        target: usize,
        crossover_rate: f64,
        retry_limit: usize,
        model: &CoverageModel,
        rng: &mut R,
    ) -> Vec<MclpChromosome> {
        let mut offspring = Vec::with_capacity(target);
        let mut failures = 0;

        if pool.len() < 2 {
            offspring.extend(pool.iter().cycle().take(target).cloned());
            return offspring;
        }

        while offspring.len() < target {
            let pair = index::sample(rng, pool.len(), 2);
            let parent1 = &pool[pair.index(0)];
            let parent2 = &pool[pair.index(1)];

            let (child1, child2) = if rng.gen::<f64>() < crossover_rate {
                failures = 0;
                genetic.crossover(parent1, parent2, model, rng)
            } else {
                failures += 1;
                if failures < retry_limit.max(1) {
                    continue;
                }
                log::warn!(
                    "crossover failed {} times in a row; copying the drawn parents",
                    failures
                );
                failures = 0;
                (parent1.clone(), parent2.clone())
            };

            offspring.push(child1);
            if offspring.len() < target {
                offspring.push(child2);
            }
        }

        offspring
    }

    /// (μ+λ) truncation: pool offspring with the current members and keep
    /// the fittest `len()` chromosomes.
    pub fn select_survivors(&mut self, offspring: Vec<MclpChromosome>) {
        let size = self.individuals.len();
        let mut combined = offspring;
        combined.append(&mut self.individuals);
        combined.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
        combined.truncate(size);
        self.individuals = combined;
    }
}
