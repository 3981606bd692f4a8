//! True model
//!
//! The hidden targets the population evolves towards, one per task, and the
//! noisy observation of them that organisms may be scored against instead.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::model::Model;
use crate::policy::Task;

/// Pair of target models, fixed for a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueModel {
    /// Target for the first task
    pub model1: Model,
    /// Target for the second task
    pub model2: Model,
}

impl TrueModel {
    /// Create a true model from two non-empty targets of equal length
    pub fn new(model1: Model, model2: Model) -> Result<Self, GenomeError> {
        if model1.is_empty() {
            return Err(GenomeError::InvalidStructure(
                "true model targets must not be empty".to_string(),
            ));
        }
        model2.check_dimension(model1.len())?;
        Ok(Self { model1, model2 })
    }

    /// Draw two independent random targets
    pub fn random<R: Rng>(dimension: usize, rng: &mut R) -> Self {
        Self {
            model1: Model::random(dimension, rng),
            model2: Model::random(dimension, rng),
        }
    }

    /// Gene dimension of the targets
    pub fn dimension(&self) -> usize {
        self.model1.len()
    }

    /// Target for the given task
    pub fn target(&self, task: Task) -> &Model {
        match task {
            Task::First => &self.model1,
            Task::Second => &self.model2,
        }
    }

    /// Draw an imperfect observation of the targets
    ///
    /// Each gene of each target is flipped independently with
    /// `flip_probability`. The true model itself is left untouched.
    pub fn observe<R: Rng>(&self, flip_probability: f64, rng: &mut R) -> Self {
        let mut observed = self.clone();
        observed.model1.flip_each(flip_probability, rng);
        observed.model2.flip_each(flip_probability, rng);
        observed
    }
}

/// How organisms see the true model during a generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObservationModel {
    /// Score against the exact true model
    #[default]
    Exact,
    /// Score against a fresh bit-flip observation drawn once per generation
    Noisy {
        /// Per-gene flip probability of the observation
        flip_probability: f64,
    },
}

impl ObservationModel {
    /// The targets organisms are scored against for one generation
    pub fn project<R: Rng>(&self, true_model: &TrueModel, rng: &mut R) -> TrueModel {
        match *self {
            Self::Exact => true_model.clone(),
            Self::Noisy { flip_probability } => true_model.observe(flip_probability, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    #[test]
    fn test_true_model_random() {
        let mut rng = seeded(21);
        let m = TrueModel::random(64, &mut rng);
        assert_eq!(m.dimension(), 64);
        assert_eq!(m.model2.len(), 64);
        // Independent draws
        assert_ne!(m.model1, m.model2);
    }

    #[test]
    fn test_true_model_new_rejects_mismatch() {
        let err = TrueModel::new(Model::zeros(4), Model::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            GenomeError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_true_model_new_rejects_empty() {
        let err = TrueModel::new(Model::zeros(0), Model::zeros(0)).unwrap_err();
        assert!(matches!(err, GenomeError::InvalidStructure(_)));
    }

    #[test]
    fn test_true_model_target() {
        let m = TrueModel::new(Model::zeros(2), Model::ones(2)).unwrap();
        assert_eq!(m.target(Task::First), &Model::zeros(2));
        assert_eq!(m.target(Task::Second), &Model::ones(2));
    }

    #[test]
    fn test_observe_without_noise_is_exact() {
        let mut rng = seeded(22);
        let m = TrueModel::random(32, &mut rng);
        assert_eq!(m.observe(0.0, &mut rng), m);
    }

    #[test]
    fn test_observe_full_noise_is_complement() {
        let mut rng = seeded(23);
        let m = TrueModel::random(32, &mut rng);
        let observed = m.observe(1.0, &mut rng);
        assert_eq!(observed.model1, m.model1.complement());
        assert_eq!(observed.model2, m.model2.complement());
    }

    #[test]
    fn test_observation_model_project() {
        let mut rng = seeded(24);
        let m = TrueModel::random(16, &mut rng);
        assert_eq!(ObservationModel::Exact.project(&m, &mut rng), m);

        let noisy = ObservationModel::Noisy {
            flip_probability: 1.0,
        };
        assert_eq!(
            noisy.project(&m, &mut rng).model1,
            m.model1.complement()
        );
    }

    #[test]
    fn test_observation_model_serialization() {
        let noisy = ObservationModel::Noisy {
            flip_probability: 0.05,
        };
        let json = serde_json::to_string(&noisy).unwrap();
        assert_eq!(json, r#"{"kind":"noisy","flip_probability":0.05}"#);
        let back: ObservationModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, noisy);
    }
}
