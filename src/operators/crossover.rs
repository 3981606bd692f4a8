//! Crossover operators
//!
//! This module provides the whole-model crossover used when mating.

use rand::Rng;

use crate::operators::traits::CrossoverOperator;
use crate::population::organism::Organism;
use crate::random::RandomSource;

/// Whole-model crossover
///
/// Models are inherited intact: the child takes `model1` from one parent and
/// `model2` from the other, each way round with equal probability. The task
/// threshold comes from either parent in an independent draw.
#[derive(Clone, Debug)]
pub struct ModelSwapCrossover {
    /// Probability that parent1 supplies `model1` (and parent2 `model2`)
    pub bias: f64,
}

impl ModelSwapCrossover {
    /// Create a new unbiased model-swap crossover
    pub fn new() -> Self {
        Self { bias: 0.5 }
    }

    /// Create with a specific bias towards parent1
    pub fn with_bias(bias: f64) -> Self {
        assert!((0.0..=1.0).contains(&bias), "Bias must be in [0, 1]");
        Self { bias }
    }
}

impl Default for ModelSwapCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossoverOperator for ModelSwapCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Organism,
        parent2: &Organism,
        rng: &mut R,
    ) -> Organism {
        let (model1, model2) = if rng.bernoulli(self.bias) {
            (parent1.model1.clone(), parent2.model2.clone())
        } else {
            (parent2.model1.clone(), parent1.model2.clone())
        };

        let task_threshold = if rng.bernoulli(self.bias) {
            parent1.task_threshold
        } else {
            parent2.task_threshold
        };

        Organism::new(model1, model2, task_threshold)
    }
}
