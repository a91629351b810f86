//! Utility functions and structures shared by both engines.

use std::time::Duration;

/// Format a duration as hours, minutes, seconds and milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!(
        "{}h {:02}m {:02}.{:03}s",
        hours,
        minutes,
        seconds,
        duration.subsec_millis()
    )
}

/// Statistics about a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub generations: usize,
    pub runtime: Duration,
    pub best_fitness: u64,
    pub population_size: usize,
    /// Generation at which the MCLP mutation rate switched, if it did.
    pub mutation_switch_generation: Option<usize>,
}

impl RunStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        let switch = match self.mutation_switch_generation {
            Some(generation) => generation.to_string(),
            None => "never".to_string(),
        };
        format!(
            "Run Statistics:
- Generations: {}
- Runtime: {}
- Best Fitness: {}
- Population Size: {}
- Mutation Rate Switch: {}",
            self.generations,
            format_duration(self.runtime),
            self.best_fitness,
            self.population_size,
            switch
        )
    }
}
