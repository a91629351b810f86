//! Fixed-cardinality chromosome for the maximal covering engine.

use crate::coverage::CoverageModel;

/// Exactly k distinct facility ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MclpChromosome {
    genes: Vec<usize>,
    fitness: usize,
}

impl MclpChromosome {
    /// Wrap a gene list and evaluate it.
    pub fn new(genes: Vec<usize>, model: &CoverageModel) -> Self {
        let fitness = model.covered_count(&genes);
        MclpChromosome { genes, fitness }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of distinct points covered; higher is better.
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.genes.contains(&id)
    }

    /// Check that no facility appears twice.
    pub fn has_distinct_genes(&self) -> bool {
        self.genes
            .iter()
            .enumerate()
            .all(|(i, gene)| !self.genes[..i].contains(gene))
    }
}
