//! Organism type
//!
//! This module provides the Organism type: two task models, an evolved task
//! threshold, and the fitness accumulated over the current generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::model::Model;
use crate::genome::true_model::TrueModel;
use crate::policy::Task;
use crate::random::RandomSource;

/// An organism in the population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Model for the first task
    pub model1: Model,
    /// Model for the second task
    pub model2: Model,
    /// Minimum `reward2 - reward1` at which the second task is attempted
    pub task_threshold: i32,
    /// Reward accumulated over the current generation
    pub fitness: f64,
    /// Fraction of `model1` matching the true model at the last snapshot
    pub model1_match: f64,
    /// Fraction of `model2` matching the true model at the last snapshot
    pub model2_match: f64,
}

impl Organism {
    /// Create a new organism with zero fitness
    pub fn new(model1: Model, model2: Model, task_threshold: i32) -> Self {
        Self {
            model1,
            model2,
            task_threshold,
            fitness: 0.0,
            model1_match: 0.0,
            model2_match: 0.0,
        }
    }

    /// Draw a random organism
    ///
    /// Both models are random bit vectors of length `dimension`; the threshold
    /// is uniform in `[-threshold_bound, threshold_bound]`.
    pub fn random<R: Rng>(dimension: usize, threshold_bound: i32, rng: &mut R) -> Self {
        let model1 = Model::random(dimension, rng);
        let model2 = Model::random(dimension, rng);
        let task_threshold = rng.int_inclusive(-threshold_bound, threshold_bound);
        Self::new(model1, model2, task_threshold)
    }

    /// Model used for the given task
    pub fn model(&self, task: Task) -> &Model {
        match task {
            Task::First => &self.model1,
            Task::Second => &self.model2,
        }
    }

    /// Gene dimension of this organism's models
    pub fn dimension(&self) -> usize {
        self.model1.len()
    }

    /// Add a reward to this generation's fitness
    pub fn add_fitness(&mut self, reward: f64) {
        self.fitness += reward;
    }

    /// Start a new life: fitness back to zero
    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }

    /// Record how well both models match the true model
    pub fn record_match(&mut self, true_model: &TrueModel) {
        self.model1_match = self.model1.match_fraction(&true_model.model1);
        self.model2_match = self.model2.match_fraction(&true_model.model2);
    }

    /// Check if this organism beats another in a tournament
    ///
    /// Strictly greater fitness wins; on a tie the other organism wins.
    pub fn beats(&self, other: &Self) -> bool {
        self.fitness > other.fitness
    }
}
