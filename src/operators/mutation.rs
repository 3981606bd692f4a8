//! Mutation operators
//!
//! This module provides the bit-flip mutation applied to every child.

use rand::Rng;

use crate::operators::traits::MutationOperator;
use crate::population::organism::Organism;
use crate::random::RandomSource;

/// Bit-flip mutation with threshold resampling
///
/// Every gene of both models flips independently with `mutation_probability`.
/// Independently, with the same probability, the task threshold is replaced
/// by a fresh draw from `[-threshold_bound, threshold_bound]`.
#[derive(Clone, Debug)]
pub struct BitFlipMutation {
    /// Per-gene flip probability
    pub mutation_probability: f64,
    /// Bound of the range the threshold is redrawn from
    pub threshold_bound: i32,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation
    pub fn new(mutation_probability: f64, threshold_bound: i32) -> Self {
        assert!(
            (0.0..=1.0).contains(&mutation_probability),
            "Probability must be in [0, 1]"
        );
        assert!(threshold_bound >= 0, "Threshold bound must be non-negative");
        Self {
            mutation_probability,
            threshold_bound,
        }
    }
}

impl MutationOperator for BitFlipMutation {
    fn mutate<R: Rng>(&self, organism: &mut Organism, rng: &mut R) {
        organism.model1.flip_each(self.mutation_probability, rng);
        organism.model2.flip_each(self.mutation_probability, rng);

        if rng.bernoulli(self.mutation_probability) {
            organism.task_threshold =
                rng.int_inclusive(-self.threshold_bound, self.threshold_bound);
        }
    }

    fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::model::Model;
    use crate::random::seeded;

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = seeded(71);
        let original = Organism::random(50, 3, &mut rng);
        let mut o = original.clone();
        BitFlipMutation::new(0.0, 3).mutate(&mut o, &mut rng);
        assert_eq!(o, original);
    }

    #[test]
    fn test_full_probability_flips_everything() {
        let mut rng = seeded(72);
        let mut o = Organism::new(Model::zeros(8), Model::ones(8), 100);
        BitFlipMutation::new(1.0, 2).mutate(&mut o, &mut rng);
        assert_eq!(o.model1, Model::ones(8));
        assert_eq!(o.model2, Model::zeros(8));
        // Replaced, not perturbed: lands back inside the configured range
        assert!((-2..=2).contains(&o.task_threshold));
    }

    #[test]
    fn test_mutation_rate_roughly_matches() {
        let mut rng = seeded(73);
        let mutation = BitFlipMutation::new(0.1, 3);
        let mut flipped = 0;
        for _ in 0..100 {
            let mut o = Organism::new(Model::zeros(100), Model::zeros(100), 0);
            mutation.mutate(&mut o, &mut rng);
            flipped += 200 - o.model1.match_count(&Model::zeros(100))
                - o.model2.match_count(&Model::zeros(100));
        }
        // 20_000 genes at rate 0.1
        assert!((1700..2300).contains(&flipped), "flipped {flipped}");
    }

    #[test]
    fn test_mutation_probability_accessor() {
        assert_eq!(BitFlipMutation::new(0.005, 3).mutation_probability(), 0.005);
    }

    #[test]
    #[should_panic(expected = "Probability must be in [0, 1]")]
    fn test_invalid_probability() {
        BitFlipMutation::new(2.0, 3);
    }
}
