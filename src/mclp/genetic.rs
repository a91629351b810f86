//! Genetic operators (crossover, mutation) for the maximal covering engine.

use crate::coverage::CoverageModel;
use crate::mclp::chromosome::MclpChromosome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Implements the genetic operators for fixed-cardinality chromosomes.
pub struct Genetic;

impl Genetic {
    /// Single-point crossover at a cut chosen from `1..k`.
    ///
    /// Each child keeps its own parent's head. Past the cut it takes the
    /// partner's gene unless that gene already occurs anywhere in its own
    /// parent, in which case it keeps its own parent's gene at that slot.
    /// Every child gene therefore equals the gene of one parent at the same
    /// position, and genes stay distinct. For k = 1 the children are copies
    /// of the parents.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &MclpChromosome,
        parent2: &MclpChromosome,
        model: &CoverageModel,
        rng: &mut R,
    ) -> (MclpChromosome, MclpChromosome) {
        let k = parent1.len();
        if k < 2 || parent2.len() != k {
            return (parent1.clone(), parent2.clone());
        }

        let cut = rng.gen_range(1..k);
        let child1 = Self::splice(parent1.genes(), parent2.genes(), cut);
        let child2 = Self::splice(parent2.genes(), parent1.genes(), cut);

        (
            MclpChromosome::new(child1, model),
            MclpChromosome::new(child2, model),
        )
    }

    /// `own[..cut]`, then `partner[p]` where it is absent from `own`,
    /// `own[p]` otherwise.
    fn splice(own: &[usize], partner: &[usize], cut: usize) -> Vec<usize> {
        own.iter()
            .zip(partner)
            .enumerate()
            .map(|(position, (&mine, &theirs))| {
                if position >= cut && !own.contains(&theirs) {
                    theirs
                } else {
                    mine
                }
            })
            .collect()
    }

    /// Replace each gene with probability `rate` by one of its nearest
    /// neighbours that is not already part of the chromosome.
    pub fn mutate<R: Rng>(
        &self,
        chromosome: &MclpChromosome,
        rate: f64,
        model: &CoverageModel,
        rng: &mut R,
    ) -> MclpChromosome {
        let mut genes = chromosome.genes().to_vec();

        for i in 0..genes.len() {
            if rng.gen::<f64>() >= rate {
                continue;
            }
            let candidates: Vec<usize> = model
                .nearest_neighbors_of(genes[i])
                .iter()
                .copied()
                .filter(|neighbor| !genes.contains(neighbor))
                .collect();
            if let Some(&replacement) = candidates.choose(rng) {
                genes[i] = replacement;
            }
        }

        MclpChromosome::new(genes, model)
    }
}
