//! Bit-vector chromosome for the set covering engine.

use crate::coverage::CoverageModel;

/// A facility selection, one bit per point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LscpChromosome {
    genes: Vec<bool>,
    fitness: u64,
}

impl LscpChromosome {
    /// Wrap a gene vector and evaluate it.
    pub fn new(genes: Vec<bool>, model: &CoverageModel) -> Self {
        let fitness = Self::evaluate(&genes, model);
        LscpChromosome { genes, fitness }
    }

    /// Build a chromosome from a list of selected ids.
    pub fn from_selection(selected: &[usize], model: &CoverageModel) -> Self {
        let mut genes = vec![false; model.len()];
        for &id in selected {
            genes[id] = true;
        }
        Self::new(genes, model)
    }

    /// Sum of the weights of all selected facilities.
    pub fn evaluate(genes: &[bool], model: &CoverageModel) -> u64 {
        model.total_weight(Self::selected_ids(genes))
    }

    fn selected_ids(genes: &[bool]) -> impl Iterator<Item = usize> + '_ {
        genes
            .iter()
            .enumerate()
            .filter(|&(_, &selected)| selected)
            .map(|(id, _)| id)
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<bool> {
        self.genes
    }

    /// Total weight; lower is better.
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    pub fn is_selected(&self, id: usize) -> bool {
        self.genes[id]
    }

    /// Selected facility ids in ascending order.
    pub fn selected(&self) -> Vec<usize> {
        Self::selected_ids(&self.genes).collect()
    }

    /// Check that the selection covers every point.
    pub fn is_feasible(&self, model: &CoverageModel) -> bool {
        model.covers_all(&self.selected())
    }
}
