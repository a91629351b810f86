//! Read-only coverage queries over a validated problem instance.

use crate::error::{Error, Result};
use crate::problem::ProblemInstance;
use itertools::Itertools;

/// Precomputed coverage relationships for every point.
///
/// Built once per run and never mutated by the engines. Ids index
/// directly into every table.
#[derive(Debug, Clone)]
pub struct CoverageModel {
    /// Points each facility covers, sorted and deduplicated.
    coverage: Vec<Vec<usize>>,
    /// Facilities covering each point, in instance order.
    covered_by: Vec<Vec<usize>>,
    weights: Vec<u64>,
    positions: Vec<(f64, f64)>,
    /// Empty until `with_nearest_neighbors` is called.
    nearest: Vec<Vec<usize>>,
    nearest_percentage: Option<f64>,
}

impl CoverageModel {
    /// Build the model, rejecting structurally broken instances.
    pub fn new(problem: &ProblemInstance) -> Result<Self> {
        problem.validate()?;

        let n = problem.len();
        let mut coverage = Vec::with_capacity(n);
        let mut covered_by = vec![Vec::new(); n];

        for point in &problem.points_data {
            let set: Vec<usize> = point
                .points_within_radius
                .iter()
                .copied()
                .sorted()
                .dedup()
                .collect();
            for &covered in &set {
                covered_by[covered].push(point.id);
            }
            coverage.push(set);
        }

        Ok(CoverageModel {
            coverage,
            covered_by,
            weights: problem.points_data.iter().map(|p| p.weight).collect(),
            positions: problem.points_data.iter().map(|p| (p.x, p.y)).collect(),
            nearest: vec![Vec::new(); n],
            nearest_percentage: None,
        })
    }

    /// Rank every other point by Euclidean distance and keep the closest
    /// `percentage`% of them for each point.
    ///
    /// The percentage is clamped to `0..=100`.
    pub fn with_nearest_neighbors(mut self, percentage: f64) -> Self {
        let percentage = percentage.clamp(0.0, 100.0);
        let n = self.len();
        let keep = (n.saturating_sub(1) as f64 * percentage / 100.0).floor() as usize;

        self.nearest = (0..n)
            .map(|id| {
                let (x, y) = self.positions[id];
                (0..n)
                    .filter(|&other| other != id)
                    .map(|other| {
                        let (ox, oy) = self.positions[other];
                        (other, ((x - ox).powi(2) + (y - oy).powi(2)).sqrt())
                    })
                    .sorted_by(|a, b| a.1.total_cmp(&b.1))
                    .take(keep)
                    .map(|(other, _)| other)
                    .collect()
            })
            .collect();

        self.nearest_percentage = Some(percentage);
        if keep == 0 && n > 1 {
            log::warn!(
                "{}% of {} points rounds down to zero neighbours; neighbour mutation is disabled",
                percentage,
                n
            );
        }

        self
    }

    /// Fail if some demand point can never be covered.
    pub fn ensure_coverable(&self) -> Result<()> {
        if let Some(point) = (0..self.len())
            .find(|&id| self.coverage[id].is_empty() || self.covered_by[id].is_empty())
        {
            return Err(Error::Uncoverable { point });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Points covered by a facility at `id`.
    pub fn coverage_of(&self, id: usize) -> &[usize] {
        &self.coverage[id]
    }

    /// Facilities whose coverage contains point `id`, in instance order.
    pub fn facilities_covering(&self, id: usize) -> &[usize] {
        &self.covered_by[id]
    }

    pub fn weight_of(&self, id: usize) -> u64 {
        self.weights[id]
    }

    /// Percentage the neighbour lists were built with, if any.
    pub fn nearest_percentage(&self) -> Option<f64> {
        self.nearest_percentage
    }

    /// The closest points to `id`, nearest first.
    pub fn nearest_neighbors_of(&self, id: usize) -> &[usize] {
        &self.nearest[id]
    }

    /// Total weight of a set of facilities.
    pub fn total_weight<I: IntoIterator<Item = usize>>(&self, facilities: I) -> u64 {
        facilities.into_iter().map(|id| self.weights[id]).sum()
    }

    /// Number of distinct points covered by a set of facilities.
    pub fn covered_count(&self, facilities: &[usize]) -> usize {
        let mut seen = vec![false; self.len()];
        let mut count = 0;
        for &facility in facilities {
            for &point in &self.coverage[facility] {
                if !seen[point] {
                    seen[point] = true;
                    count += 1;
                }
            }
        }
        count
    }

    /// Check whether a set of facilities covers every point.
    pub fn covers_all(&self, facilities: &[usize]) -> bool {
        self.covered_count(facilities) == self.len()
    }
}
