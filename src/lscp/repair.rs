//! Heuristic feasibility operator for set covering chromosomes.

use crate::coverage::CoverageModel;
use itertools::Itertools;

/// Restores coverage after mutation, then trims redundant facilities.
pub struct Repair;

impl Repair {
    /// Repair a gene vector in place.
    ///
    /// Facilities are ranked once by weight per uncovered point they would
    /// cover. Ratios are not recomputed while facilities are added. The
    /// cheapest ones are added until every point is covered, then selected
    /// facilities are dropped in reverse ratio order whenever all their
    /// points remain covered twice.
    pub fn repair(genes: &mut [bool], model: &CoverageModel) {
        let n = model.len();
        if n == 0 {
            return;
        }

        let mut coverage_count = Self::coverage_counts(genes, model);
        let mut uncovered: Vec<bool> = coverage_count.iter().map(|&count| count == 0).collect();
        let mut remaining = uncovered.iter().filter(|&&u| u).count();

        let ratios: Vec<f64> = (0..n)
            .map(|facility| {
                let gain = model
                    .coverage_of(facility)
                    .iter()
                    .filter(|&&point| uncovered[point])
                    .count();
                if gain > 0 {
                    model.weight_of(facility) as f64 / gain as f64
                } else {
                    f64::INFINITY
                }
            })
            .collect();

        // Stable sorts keep instance order among equal ratios.
        if remaining > 0 {
            for facility in (0..n).sorted_by(|&a, &b| ratios[a].total_cmp(&ratios[b])) {
                let mut adds_coverage = false;
                for &point in model.coverage_of(facility) {
                    if uncovered[point] {
                        uncovered[point] = false;
                        remaining -= 1;
                        adds_coverage = true;
                    }
                }
                if adds_coverage {
                    genes[facility] = true;
                    for &point in model.coverage_of(facility) {
                        coverage_count[point] += 1;
                    }
                }
                if remaining == 0 {
                    break;
                }
            }
        }

        for facility in (0..n).sorted_by(|&a, &b| ratios[b].total_cmp(&ratios[a])) {
            if !genes[facility] {
                continue;
            }
            let coverage = model.coverage_of(facility);
            if coverage.iter().all(|&point| coverage_count[point] >= 2) {
                genes[facility] = false;
                for &point in coverage {
                    coverage_count[point] -= 1;
                }
            }
        }
    }

    /// How many selected facilities cover each point.
    pub fn coverage_counts(genes: &[bool], model: &CoverageModel) -> Vec<usize> {
        let mut counts = vec![0; model.len()];
        for facility in (0..genes.len()).filter(|&id| genes[id]) {
            for &point in model.coverage_of(facility) {
                counts[point] += 1;
            }
        }
        counts
    }
}
