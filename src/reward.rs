//! Reward computation
//!
//! Scores organisms against a true model for one challenge, either alone or
//! as a cooperating pair. The true model passed in may be the exact targets
//! or a per-generation noisy observation of them.

use crate::challenge::Challenge;
use crate::genome::model::Model;
use crate::genome::true_model::TrueModel;
use crate::policy::{pick_task, Task};
use crate::population::organism::Organism;

/// Reward for attempting a task with `model`
///
/// The fraction of genes matching `target`, times `reward`.
///
/// # Panics
///
/// Panics if `model` and `target` differ in length.
pub fn score_task(model: &Model, target: &Model, reward: f64) -> f64 {
    model.match_fraction(target) * reward
}

/// Task the organism picks and the reward it earns for it
pub fn attempt(organism: &Organism, challenge: &Challenge, true_model: &TrueModel) -> (Task, f64) {
    let task = pick_task(organism, challenge);
    let score = score_task(
        organism.model(task),
        true_model.target(task),
        challenge.reward(task),
    );
    (task, score)
}

/// Reward for an organism facing the challenge alone
pub fn score_solo(organism: &Organism, challenge: &Challenge, true_model: &TrueModel) -> f64 {
    attempt(organism, challenge, true_model).1
}

/// Shared reward for two organisms facing the challenge together
///
/// Each partner picks its own task. Partners on the same task duplicate
/// effort and share only the better score; partners on different tasks
/// share the sum. Both partners are credited the full shared value.
pub fn score_cooperative(
    a: &Organism,
    b: &Organism,
    challenge: &Challenge,
    true_model: &TrueModel,
) -> f64 {
    let (task_a, score_a) = attempt(a, challenge, true_model);
    let (task_b, score_b) = attempt(b, challenge, true_model);
    if task_a == task_b {
        score_a.max(score_b)
    } else {
        score_a + score_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: i32 = 100;
    const SECOND: i32 = -100;

    /// Model of length 10 whose first `matches` genes agree with all-ones
    fn model_matching(matches: usize) -> Model {
        Model::new((0..10).map(|i| i < matches).collect())
    }

    fn truth() -> TrueModel {
        TrueModel::new(Model::ones(10), Model::ones(10)).unwrap()
    }

    #[test]
    fn test_score_task_worked_example() {
        let target: Model = [true, true, false, false].into();
        let model: Model = [true, false, false, true].into();
        assert_eq!(score_task(&model, &target, 4.0), 2.0);
    }

    #[test]
    fn test_score_task_extremes() {
        let target: Model = [true, false, true, true, false].into();
        assert_eq!(score_task(&target, &target, 3.25), 3.25);
        assert_eq!(score_task(&target.complement(), &target, 3.25), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_score_task_dimension_mismatch_panics() {
        score_task(&Model::zeros(3), &Model::zeros(4), 1.0);
    }

    #[test]
    fn test_score_solo_uses_picked_task() {
        let truth = truth();
        let c = Challenge::new(2.0, 1.0);
        let o = Organism::new(model_matching(5), model_matching(10), FIRST);
        assert!((score_solo(&o, &c, &truth) - 1.0).abs() < 1e-12);

        let o = Organism::new(model_matching(5), model_matching(10), SECOND);
        assert!((score_solo(&o, &c, &truth) - 1.0).abs() < 1e-12);

        let o = Organism::new(model_matching(10), model_matching(5), SECOND);
        assert!((score_solo(&o, &c, &truth) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_score_cooperative_same_task_takes_max() {
        let truth = truth();
        let c = Challenge::new(1.0, 1.0);
        let a = Organism::new(model_matching(6), Model::zeros(10), FIRST);
        let b = Organism::new(model_matching(9), Model::zeros(10), FIRST);
        assert!((score_cooperative(&a, &b, &c, &truth) - 0.9).abs() < 1e-12);
        assert!((score_cooperative(&b, &a, &c, &truth) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_score_cooperative_different_tasks_adds() {
        let truth = truth();
        let c = Challenge::new(1.0, 1.0);
        let a = Organism::new(model_matching(6), Model::zeros(10), FIRST);
        let b = Organism::new(Model::zeros(10), model_matching(4), SECOND);
        assert!((score_cooperative(&a, &b, &c, &truth) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_cooperative_with_self_is_solo() {
        let truth = truth();
        let c = Challenge::new(5.0, 2.0);
        let a = Organism::new(model_matching(7), model_matching(3), 0);
        assert_eq!(
            score_cooperative(&a, &a, &c, &truth),
            score_solo(&a, &c, &truth)
        );
    }
}
