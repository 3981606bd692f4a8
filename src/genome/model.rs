//! Model genome
//!
//! A model is a fixed-length bit vector encoding an organism's behaviour on
//! one task. Organisms carry one model per task.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::random::RandomSource;

/// Fixed-length bit vector
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Model {
    /// The genes of this model
    bits: Vec<bool>,
}

impl Model {
    /// Create a new model with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros model of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones model of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Draw a model where each gene is independently set with probability 0.5
    pub fn random<R: Rng>(dimension: usize, rng: &mut R) -> Self {
        let bits = (0..dimension).map(|_| rng.bernoulli(0.5)).collect();
        Self { bits }
    }

    /// Get the length of the model
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the model is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get the genes as a slice
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Flip a specific gene
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Get the complement (all genes flipped)
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Flip each gene independently with the given probability
    ///
    /// Returns the number of genes flipped.
    pub fn flip_each<R: Rng>(&mut self, probability: f64, rng: &mut R) -> usize {
        let mut flipped = 0;
        for bit in &mut self.bits {
            if rng.bernoulli(probability) {
                *bit = !*bit;
                flipped += 1;
            }
        }
        flipped
    }

    /// Number of positions where the two models agree
    ///
    /// # Panics
    ///
    /// Panics if the models have different lengths. Models in one run are
    /// always built with the same dimension, so a mismatch is a construction bug.
    pub fn match_count(&self, other: &Self) -> usize {
        assert_eq!(
            self.bits.len(),
            other.bits.len(),
            "Model dimension mismatch: {} vs {}",
            self.bits.len(),
            other.bits.len()
        );
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    /// Fraction of positions where the two models agree
    ///
    /// An empty model matches nothing.
    pub fn match_fraction(&self, other: &Self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.match_count(other) as f64 / self.bits.len() as f64
    }

    /// Hamming distance to another model
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.bits.len() - self.match_count(other)
    }

    /// Check that this model has the expected dimension
    pub fn check_dimension(&self, expected: usize) -> Result<(), GenomeError> {
        if self.bits.len() != expected {
            return Err(GenomeError::DimensionMismatch {
                expected,
                actual: self.bits.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<bool>> for Model {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<const N: usize> From<[bool; N]> for Model {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    #[test]
    fn test_model_new() {
        let m = Model::new(vec![true, false, true]);
        assert_eq!(m.len(), 3);
        assert_eq!(m.bits(), &[true, false, true]);
    }

    #[test]
    fn test_model_random_dimension() {
        let mut rng = seeded(11);
        let m = Model::random(100, &mut rng);
        assert_eq!(m.len(), 100);
        // 100 fair coin flips landing all one way is vanishingly unlikely
        assert!(m.bits().iter().any(|&b| b));
        assert!(m.bits().iter().any(|&b| !b));
    }

    #[test]
    fn test_model_flip() {
        let mut m = Model::zeros(3);
        m.flip(1);
        assert_eq!(m.bits(), &[false, true, false]);
        m.flip(10);
        assert_eq!(m.bits(), &[false, true, false]);
    }

    #[test]
    fn test_model_match_count() {
        let m: Model = [true, false, false, true].into();
        let t: Model = [true, true, false, false].into();
        assert_eq!(m.match_count(&t), 2);
        assert_eq!(m.hamming_distance(&t), 2);
        assert_eq!(m.match_fraction(&t), 0.5);
    }

    #[test]
    fn test_model_match_fraction_extremes() {
        let m: Model = [true, false, true].into();
        assert_eq!(m.match_fraction(&m), 1.0);
        assert_eq!(m.match_fraction(&m.complement()), 0.0);
        assert_eq!(Model::zeros(0).match_fraction(&Model::zeros(0)), 0.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_model_match_count_dimension_mismatch() {
        Model::zeros(3).match_count(&Model::zeros(4));
    }

    #[test]
    fn test_model_flip_each() {
        let mut rng = seeded(5);
        let mut m = Model::zeros(20);
        assert_eq!(m.flip_each(0.0, &mut rng), 0);
        assert_eq!(m, Model::zeros(20));
        assert_eq!(m.flip_each(1.0, &mut rng), 20);
        assert_eq!(m, Model::ones(20));
    }

    #[test]
    fn test_model_check_dimension() {
        let m = Model::zeros(4);
        assert!(m.check_dimension(4).is_ok());
        assert_eq!(
            m.check_dimension(5),
            Err(GenomeError::DimensionMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_model_display() {
        let m = Model::new(vec![true, false, true, true]);
        assert_eq!(format!("{}", m), "1011");
    }

    #[test]
    fn test_model_serialization() {
        let m = Model::new(vec![true, false, true]);
        let serialized = serde_json::to_string(&m).unwrap();
        let deserialized: Model = serde_json::from_str(&serialized).unwrap();
        assert_eq!(m, deserialized);
    }
}
