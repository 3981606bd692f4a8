//! Diagnostics and statistics
//!
//! This module provides the per-generation statistics snapshot and the
//! history collected over a run.

pub mod reporter;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::genome::true_model::TrueModel;
use crate::population::organism::Organism;
use crate::population::population::Population;

/// Min, quartiles and max of a set of values
///
/// Quartiles are read off the sorted values at indices `n/4`, `n/2` and
/// `3n/4`, without interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarize the given values, or None if there are none
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len();
        Some(Self {
            min: values[0],
            q1: values[n / 4],
            median: values[n / 2],
            q3: values[n * 3 / 4],
            max: values[n - 1],
        })
    }

    /// The five values in order
    pub fn as_array(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

impl fmt::Display for FiveNumberSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.as_array();
        write!(f, "[{a}, {b}, {c}, {d}, {e}]")
    }
}

/// Fitness picture of a generation after its challenge rounds
///
/// Captured before reproduction, since children start from zero fitness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    /// Highest accumulated fitness
    pub best_fitness: f64,
    /// Mean accumulated fitness
    pub mean_fitness: f64,
    /// Match fraction of the fittest organism's `model1`
    pub best_model1_match: f64,
    /// Match fraction of the fittest organism's `model2`
    pub best_model2_match: f64,
    /// Task threshold of the fittest organism
    pub best_task_threshold: i32,
}

impl FitnessSummary {
    /// Summarize an evaluated population, or None if it is empty
    pub fn from_population(population: &Population, true_model: &TrueModel) -> Option<Self> {
        let best = population.best()?;
        Some(Self {
            best_fitness: best.fitness,
            mean_fitness: population.mean_fitness(),
            best_model1_match: best.model1.match_fraction(&true_model.model1),
            best_model2_match: best.model2.match_fraction(&true_model.model2),
            best_task_threshold: best.task_threshold,
        })
    }
}

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number of the population summarized
    pub generation: usize,
    /// Distribution of `model1` match fractions against the true model
    pub model1_match: FiveNumberSummary,
    /// Distribution of `model2` match fractions against the true model
    pub model2_match: FiveNumberSummary,
    /// Distribution of task thresholds
    pub task_threshold: FiveNumberSummary,
    /// Fitness of the parent generation, before reproduction
    pub fitness: Option<FitnessSummary>,
    /// Number of rounds scored cooperatively
    pub cooperative_rounds: usize,
    /// Wall time spent on the generation (ms)
    pub elapsed_ms: f64,
}

impl GenerationStats {
    /// Compute match and threshold distributions of a population
    ///
    /// Returns None for an empty population.
    pub fn from_population(population: &Population, true_model: &TrueModel) -> Option<Self> {
        let organisms = population.organisms();
        Some(Self {
            generation: population.generation(),
            model1_match: summarize(organisms, |o| o.model1.match_fraction(&true_model.model1))?,
            model2_match: summarize(organisms, |o| o.model2.match_fraction(&true_model.model2))?,
            task_threshold: summarize(organisms, |o| f64::from(o.task_threshold))?,
            fitness: None,
            cooperative_rounds: 0,
            elapsed_ms: 0.0,
        })
    }

    /// Attach the parent generation's fitness summary
    pub fn with_fitness(mut self, fitness: Option<FitnessSummary>) -> Self {
        self.fitness = fitness;
        self
    }

    /// Set the number of cooperative rounds
    pub fn with_cooperative_rounds(mut self, rounds: usize) -> Self {
        self.cooperative_rounds = rounds;
        self
    }

    /// Set the generation's wall time
    pub fn with_elapsed(mut self, duration: Duration) -> Self {
        self.elapsed_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

fn summarize(
    organisms: &[Organism],
    value: impl Fn(&Organism) -> f64,
) -> Option<FiveNumberSummary> {
    FiveNumberSummary::from_values(organisms.iter().map(value).collect())
}

/// Statistics collector for an entire run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation
    pub generations: Vec<GenerationStats>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Median `model1` match fraction per generation
    pub fn model1_median_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.model1_match.median).collect()
    }

    /// Median `model2` match fraction per generation
    pub fn model2_median_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.model2_match.median).collect()
    }

    /// Best fitness per generation
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations
            .iter()
            .filter_map(|g| g.fitness.as_ref().map(|f| f.best_fitness))
            .collect()
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        let last = self.generations.last();
        format!(
            "Simulation Summary:\n\
             - Generations: {}\n\
             - Final model1 median match: {:.3}\n\
             - Final model2 median match: {:.3}\n\
             - Final median task threshold: {}\n\
             - Runtime: {:.2}ms",
            self.num_generations(),
            last.map_or(0.0, |g| g.model1_match.median),
            last.map_or(0.0, |g| g.model2_match.median),
            last.map_or(0.0, |g| g.task_threshold.median),
            self.total_runtime_ms,
        )
    }
}

/// Result of a simulation run
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// The final population
    pub population: Population,
    /// The true model the run evolved towards
    pub true_model: TrueModel,
    /// Number of generations run
    pub generations: usize,
    /// Per-generation statistics
    pub stats: EvolutionStats,
}

pub mod prelude {
    pub use super::reporter::*;
    pub use super::{
        EvolutionResult, EvolutionStats, FitnessSummary, FiveNumberSummary, GenerationStats,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::model::Model;

    #[test]
    fn test_five_number_summary_indices() {
        let values: Vec<f64> = (0..8).rev().map(f64::from).collect();
        let s = FiveNumberSummary::from_values(values).unwrap();
        assert_eq!(s.as_array(), [0.0, 2.0, 4.0, 6.0, 7.0]);
    }

    #[test]
    fn test_five_number_summary_single_and_empty() {
        let s = FiveNumberSummary::from_values(vec![0.5]).unwrap();
        assert_eq!(s.as_array(), [0.5; 5]);
        assert!(FiveNumberSummary::from_values(Vec::new()).is_none());
    }

    #[test]
    fn test_five_number_summary_display() {
        let s = FiveNumberSummary::from_values(vec![-3.0, -1.0, 0.0, 2.0]).unwrap();
        assert_eq!(s.to_string(), "[-3, -1, 0, 2, 2]");

        let s = FiveNumberSummary::from_values(vec![0.5, 0.75]).unwrap();
        assert_eq!(s.to_string(), "[0.5, 0.5, 0.75, 0.75, 0.75]");
    }

    #[test]
    fn test_generation_stats_from_population() {
        let truth = TrueModel::new(Model::ones(4), Model::zeros(4)).unwrap();
        let mut pop = Population::from_organisms(vec![
            Organism::new(Model::ones(4), Model::ones(4), -2),
            Organism::new(Model::zeros(4), Model::zeros(4), 2),
        ]);
        pop.set_generation(5);

        let stats = GenerationStats::from_population(&pop, &truth).unwrap();
        assert_eq!(stats.generation, 5);
        assert_eq!(stats.model1_match.as_array(), [0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(stats.model2_match.min, 0.0);
        assert_eq!(stats.model2_match.max, 1.0);
        assert_eq!(stats.task_threshold.min, -2.0);
        assert_eq!(stats.task_threshold.max, 2.0);

        let empty = Population::from_organisms(Vec::new());
        assert!(GenerationStats::from_population(&empty, &truth).is_none());
    }

    #[test]
    fn test_fitness_summary() {
        let truth = TrueModel::new(Model::ones(4), Model::zeros(4)).unwrap();
        let mut a = Organism::new(Model::ones(4), Model::ones(4), 1);
        let mut b = Organism::new(Model::zeros(4), Model::zeros(4), -1);
        a.fitness = 1.0;
        b.fitness = 3.0;
        let pop = Population::from_organisms(vec![a, b]);

        let summary = FitnessSummary::from_population(&pop, &truth).unwrap();
        assert_eq!(summary.best_fitness, 3.0);
        assert_eq!(summary.mean_fitness, 2.0);
        assert_eq!(summary.best_model1_match, 0.0);
        assert_eq!(summary.best_model2_match, 1.0);
        assert_eq!(summary.best_task_threshold, -1);
    }

    #[test]
    fn test_evolution_stats_history() {
        let truth = TrueModel::new(Model::ones(2), Model::ones(2)).unwrap();
        let pop = Population::from_organisms(vec![Organism::new(Model::ones(2), Model::zeros(2), 0)]);
        let mut stats = EvolutionStats::new();
        stats.record(GenerationStats::from_population(&pop, &truth).unwrap());
        assert_eq!(stats.num_generations(), 1);
        assert_eq!(stats.model1_median_history(), vec![1.0]);
        assert_eq!(stats.model2_median_history(), vec![0.0]);
        assert!(stats.best_fitness_history().is_empty());
        assert!(stats.summary().contains("Generations: 1"));
    }
}
