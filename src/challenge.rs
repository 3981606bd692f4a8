//! Challenges
//!
//! A challenge is one round's pair of rewards. Task 1 pays more on average;
//! task 2 pays less by a fixed bias but sometimes overtakes it, which is what
//! makes the evolved task threshold matter.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{EvoResult, EvolutionError};
use crate::policy::Task;

/// Reward pair offered in one round
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Reward for the first task
    pub reward1: f64,
    /// Reward for the second task
    pub reward2: f64,
}

impl Challenge {
    /// Create a challenge from explicit rewards
    pub fn new(reward1: f64, reward2: f64) -> Self {
        Self { reward1, reward2 }
    }

    /// How much more the second task pays than the first
    pub fn reward_diff(&self) -> f64 {
        self.reward2 - self.reward1
    }

    /// Reward offered for the given task
    pub fn reward(&self, task: Task) -> f64 {
        match task {
            Task::First => self.reward1,
            Task::Second => self.reward2,
        }
    }
}

/// Draws a fresh [`Challenge`] each round
#[derive(Clone, Debug)]
pub struct ChallengeSampler {
    rewards: Uniform<f64>,
    reward_bias: f64,
}

impl ChallengeSampler {
    /// Sample both rewards from `[min_reward, max_reward]`, shifting the
    /// second down by `reward_bias`
    pub fn new(min_reward: f64, max_reward: f64, reward_bias: f64) -> EvoResult<Self> {
        if !(min_reward.is_finite() && max_reward.is_finite() && reward_bias.is_finite()) {
            return Err(EvolutionError::Configuration(
                "Rewards and reward bias must be finite".to_string(),
            ));
        }
        if min_reward > max_reward {
            return Err(EvolutionError::Configuration(format!(
                "min_reward ({min_reward}) exceeds max_reward ({max_reward})"
            )));
        }
        Ok(Self {
            rewards: Uniform::new_inclusive(min_reward, max_reward),
            reward_bias,
        })
    }

    /// Build a sampler from the reward settings of a configuration
    pub fn from_config(config: &SimulationConfig) -> EvoResult<Self> {
        Self::new(config.min_reward, config.max_reward, config.reward_bias)
    }

    /// Draw one round's rewards
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Challenge {
        let reward1 = self.rewards.sample(rng);
        let reward2 = self.rewards.sample(rng) - self.reward_bias;
        Challenge { reward1, reward2 }
    }
}
