//! Genetic operators (crossover, mutation) for the set covering engine.

use crate::coverage::CoverageModel;
use crate::lscp::chromosome::LscpChromosome;
use itertools::Itertools;
use rand::seq::index;
use rand::Rng;

/// Logistic schedule for the number of bits flipped per generation.
///
/// `m(t) = mf / (1 + exp(-4 mg (t - mc) / mf))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationSchedule {
    pub max_mutations: f64,
    pub midpoint: f64,
    pub growth: f64,
}

impl MutationSchedule {
    pub fn new(max_mutations: f64, midpoint: f64, growth: f64) -> Self {
        MutationSchedule {
            max_mutations,
            midpoint,
            growth,
        }
    }

    /// Real-valued mutation intensity at generation `t`.
    pub fn rate(&self, t: usize) -> f64 {
        let exponent = -4.0 * self.growth * (t as f64 - self.midpoint) / self.max_mutations;
        self.max_mutations / (1.0 + exponent.exp())
    }

    /// Number of loci to flip at generation `t`.
    pub fn count(&self, t: usize) -> usize {
        self.rate(t).floor() as usize
    }
}

/// Implements the genetic operators for bit-vector chromosomes.
pub struct Genetic;

impl Genetic {
    /// Fitness-weighted gene-wise crossover.
    ///
    /// Agreeing loci are inherited as is. At disagreeing loci the first
    /// parent's allele is taken with probability `f2 / (f1 + f2)`.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &LscpChromosome,
        parent2: &LscpChromosome,
        rng: &mut R,
    ) -> Vec<bool> {
        let f1 = parent1.fitness() as f64;
        let f2 = parent2.fitness() as f64;
        let probability = if f1 + f2 > 0.0 { f2 / (f1 + f2) } else { 0.5 };

        parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(&a, &b)| {
                if a == b {
                    a
                } else if rng.gen::<f64>() < probability {
                    a
                } else {
                    b
                }
            })
            .collect()
    }

    /// Union over all points of their `num_elite_sets` cheapest covering
    /// facilities, in ascending id order.
    pub fn elite_pool(&self, model: &CoverageModel, num_elite_sets: usize) -> Vec<usize> {
        (0..model.len())
            .flat_map(|point| {
                model
                    .facilities_covering(point)
                    .iter()
                    .copied()
                    .sorted_by_key(|&facility| model.weight_of(facility))
                    .take(num_elite_sets)
            })
            .sorted()
            .dedup()
            .collect()
    }

    /// Flip `count` distinct loci drawn from the elite pool.
    ///
    /// Returns how many bits were actually flipped, which is less than
    /// `count` when the pool is smaller.
    pub fn mutate<R: Rng>(
        &self,
        genes: &mut [bool],
        pool: &[usize],
        count: usize,
        rng: &mut R,
    ) -> usize {
        let amount = count.min(pool.len());
        if amount == 0 {
            return 0;
        }
        for position in index::sample(rng, pool.len(), amount).iter() {
            let locus = pool[position];
            genes[locus] = !genes[locus];
        }
        amount
    }
}
