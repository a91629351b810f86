//! Steady-state population management for the set covering engine.

use crate::coverage::CoverageModel;
use crate::lscp::chromosome::LscpChromosome;
use itertools::Itertools;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// A fixed-size population of feasible set covers.
pub struct LscpPopulation {
    pub individuals: Vec<LscpChromosome>,
}

impl LscpPopulation {
    /// Build `size` chromosomes with the greedy-randomized constructor.
    pub fn initialize<R: Rng>(model: &CoverageModel, size: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| Self::construct_feasible(model, rng))
            .collect();
        LscpPopulation { individuals }
    }

    /// Pick a random covering facility per point, then drop random
    /// selections whose points are all covered at least twice.
    pub fn construct_feasible<R: Rng>(model: &CoverageModel, rng: &mut R) -> LscpChromosome {
        let n = model.len();
        let mut coverage_count = vec![0usize; n];
        let mut picks = Vec::with_capacity(n);

        for point in 0..n {
            let Some(&facility) = model.facilities_covering(point).choose(rng) else {
                log::error!("no facility covers point {}", point);
                continue;
            };
            for &covered in model.coverage_of(facility) {
                coverage_count[covered] += 1;
            }
            picks.push(facility);
        }

        // Duplicated picks count once per occurrence, so a repeat is
        // always removable.
        let mut kept = vec![true; picks.len()];
        let mut order: Vec<usize> = (0..picks.len()).collect();
        order.shuffle(rng);

        for slot in order {
            let coverage = model.coverage_of(picks[slot]);
            if coverage.iter().all(|&point| coverage_count[point] >= 2) {
                for &point in coverage {
                    coverage_count[point] -= 1;
                }
                kept[slot] = false;
            }
        }

        let mut genes = vec![false; n];
        for (slot, &facility) in picks.iter().enumerate() {
            if kept[slot] {
                genes[facility] = true;
            }
        }
        LscpChromosome::new(genes, model)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Select parents with two independent binary tournaments.
    pub fn select_parents<R: Rng>(&self, rng: &mut R) -> (&LscpChromosome, &LscpChromosome) {
        let parent1 = self.binary_tournament_selection(rng);
        let parent2 = self.binary_tournament_selection(rng);
        (parent1, parent2)
    }

    /// Sample two distinct members; the strictly lighter one wins,
    /// otherwise the second.
    fn binary_tournament_selection<R: Rng>(&self, rng: &mut R) -> &LscpChromosome {
        let pair = index::sample(rng, self.individuals.len(), 2);
        let first = &self.individuals[pair.index(0)];
        let second = &self.individuals[pair.index(1)];

        if first.fitness() < second.fitness() {
            first
        } else {
            second
        }
    }

    /// Mean fitness of the population.
    pub fn average_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        let total: u64 = self.individuals.iter().map(LscpChromosome::fitness).sum();
        total as f64 / self.individuals.len() as f64
    }

    /// Overwrite a random worse-than-average member with `child`.
    ///
    /// Returns the replaced index, or `None` when no member is above the
    /// mean.
    pub fn replace_above_average<R: Rng>(
        &mut self,
        child: LscpChromosome,
        rng: &mut R,
    ) -> Option<usize> {
        let average = self.average_fitness();
        let above: Vec<usize> = self
            .individuals
            .iter()
            .enumerate()
            .filter(|(_, individual)| individual.fitness() as f64 > average)
            .map(|(i, _)| i)
            .collect();

        let &target = above.choose(rng)?;
        self.individuals[target] = child;
        Some(target)
    }

    /// Index of the lightest chromosome, first one on ties; 0 for an
    /// empty population.
    pub fn best_index(&self) -> usize {
        self.individuals
            .iter()
            .position_min_by_key(|individual| individual.fitness())
            .unwrap_or(0)
    }
}
