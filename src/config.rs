//! Simulation configuration
//!
//! All tunable parameters of a run in one serializable value. Every field
//! has a default, so a JSON file only needs the keys it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::true_model::ObservationModel;

/// Configuration for a simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of genes per model
    pub dimension: usize,
    /// Number of organisms, constant across generations
    pub population_size: usize,
    /// Number of generations to run
    pub generations: usize,
    /// Challenge rounds per generation
    pub rounds_per_generation: usize,
    /// Per-gene flip probability, also the threshold resample probability
    pub mutation_probability: f64,
    /// Lower bound of the reward draw
    pub min_reward: f64,
    /// Upper bound of the reward draw
    pub max_reward: f64,
    /// Amount subtracted from the second task's reward
    pub reward_bias: f64,
    /// Score complementary pairs together instead of organisms alone
    pub cooperation_enabled: bool,
    /// With cooperation on, only even-numbered rounds are cooperative
    pub mixed_cooperation_enabled: bool,
    /// Recombine pairs of winners instead of cloning each winner
    pub mating_enabled: bool,
    /// Whether organisms see the exact true model or a noisy observation
    pub observation: ObservationModel,
    /// Random seed (None for an entropy-seeded run)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dimension: 100,
            population_size: 200,
            generations: 5000,
            rounds_per_generation: 10,
            mutation_probability: 0.005,
            min_reward: 3.0,
            max_reward: 7.0,
            reward_bias: 2.0,
            cooperation_enabled: true,
            mixed_cooperation_enabled: false,
            mating_enabled: true,
            observation: ObservationModel::Exact,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing keys take their default values. The result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> EvoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the gene dimension
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the number of rounds per generation
    pub fn with_rounds_per_generation(mut self, rounds: usize) -> Self {
        self.rounds_per_generation = rounds;
        self
    }

    /// Set the mutation probability
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Set the reward range and the second task's bias
    pub fn with_rewards(mut self, min_reward: f64, max_reward: f64, reward_bias: f64) -> Self {
        self.min_reward = min_reward;
        self.max_reward = max_reward;
        self.reward_bias = reward_bias;
        self
    }

    /// Enable or disable cooperative scoring
    pub fn with_cooperation(mut self, enabled: bool) -> Self {
        self.cooperation_enabled = enabled;
        self
    }

    /// Enable or disable alternating cooperative and solo rounds
    pub fn with_mixed_cooperation(mut self, enabled: bool) -> Self {
        self.mixed_cooperation_enabled = enabled;
        self
    }

    /// Enable or disable sexual reproduction
    pub fn with_mating(mut self, enabled: bool) -> Self {
        self.mating_enabled = enabled;
        self
    }

    /// Set the observation model
    pub fn with_observation(mut self, observation: ObservationModel) -> Self {
        self.observation = observation;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound of the task threshold range `[-bound, bound]`
    ///
    /// The reward bias rounded up, plus one.
    pub fn threshold_bound(&self) -> i32 {
        self.reward_bias.abs().ceil() as i32 + 1
    }

    /// Whether round `round` (zero-based) is scored cooperatively
    pub fn is_cooperative_round(&self, round: usize) -> bool {
        self.cooperation_enabled && (!self.mixed_cooperation_enabled || round % 2 == 0)
    }

    /// Number of children each reproduction unit yields
    ///
    /// A unit is a pair of winners when mating, a single winner otherwise.
    pub fn children_per_unit(&self) -> usize {
        if self.mating_enabled {
            4
        } else {
            2
        }
    }

    /// Check every invariant a run relies on
    pub fn validate(&self) -> EvoResult<()> {
        if self.dimension == 0 {
            return Err(EvolutionError::Configuration(
                "dimension must be positive".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "population_size must be positive".to_string(),
            ));
        }
        // Selection halves the population; mating then consumes winners in pairs.
        let divisor = self.children_per_unit();
        if self.population_size % divisor != 0 {
            return Err(EvolutionError::Configuration(format!(
                "population_size ({}) must be divisible by {} when mating is {}",
                self.population_size,
                divisor,
                if self.mating_enabled { "enabled" } else { "disabled" }
            )));
        }
        if self.rounds_per_generation == 0 {
            return Err(EvolutionError::Configuration(
                "rounds_per_generation must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(EvolutionError::Configuration(format!(
                "mutation_probability ({}) must be in [0, 1]",
                self.mutation_probability
            )));
        }
        if !(self.min_reward.is_finite() && self.max_reward.is_finite()) {
            return Err(EvolutionError::Configuration(
                "min_reward and max_reward must be finite".to_string(),
            ));
        }
        if self.min_reward > self.max_reward {
            return Err(EvolutionError::Configuration(format!(
                "min_reward ({}) exceeds max_reward ({})",
                self.min_reward, self.max_reward
            )));
        }
        if !self.reward_bias.is_finite() || self.reward_bias.abs() > f64::from(i16::MAX) {
            return Err(EvolutionError::Configuration(format!(
                "reward_bias ({}) must be finite and at most {} in magnitude",
                self.reward_bias,
                i16::MAX
            )));
        }
        if let ObservationModel::Noisy { flip_probability } = self.observation {
            if !(0.0..=1.0).contains(&flip_probability) {
                return Err(EvolutionError::Configuration(format!(
                    "observation flip_probability ({flip_probability}) must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
