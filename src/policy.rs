//! Task selection policy
//!
//! Each organism carries an evolved threshold on the reward difference
//! between the two tasks. The policy is deterministic; all of its
//! variability comes from the threshold evolving.

use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::population::organism::Organism;

/// One of the two sub-tasks a challenge offers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Match `model1` for `reward1`
    First,
    /// Match `model2` for `reward2`
    Second,
}

impl Task {
    /// Zero-based task index
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Pick the task an organism attempts for a challenge
///
/// The second task is chosen iff `reward2 - reward1 >= task_threshold`.
pub fn pick_task(organism: &Organism, challenge: &Challenge) -> Task {
    if challenge.reward_diff() >= f64::from(organism.task_threshold) {
        Task::Second
    } else {
        Task::First
    }
}
