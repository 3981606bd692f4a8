//! Population type
//!
//! This module provides the Population container: pairing for cooperative
//! rounds, per-round scoring, selection and reproduction.

use std::cmp::Reverse;

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::challenge::Challenge;
use crate::config::SimulationConfig;
use crate::error::{EvoResult, EvolutionError};
use crate::genome::true_model::TrueModel;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::organism::Organism;
use crate::random::RandomSource;
use crate::reward::{score_cooperative, score_solo};

/// Index pair of organisms scored together
pub type Pairing = (usize, usize);

/// A population of organisms
#[derive(Clone, Debug)]
pub struct Population {
    /// The organisms in this population
    organisms: Vec<Organism>,
    /// Current generation number
    generation: usize,
}

impl Population {
    /// Create a population from a vector of organisms
    pub fn from_organisms(organisms: Vec<Organism>) -> Self {
        Self {
            organisms,
            generation: 0,
        }
    }

    /// Create a random population sized and shaped by the configuration
    pub fn random<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Self {
        let bound = config.threshold_bound();
        let organisms = (0..config.population_size)
            .map(|_| Organism::random(config.dimension, bound, rng))
            .collect();
        Self::from_organisms(organisms)
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Set the generation number
    pub fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Get an organism by index
    pub fn get(&self, index: usize) -> Option<&Organism> {
        self.organisms.get(index)
    }

    /// Get an iterator over the organisms
    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    /// Get a mutable iterator over the organisms
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Organism> {
        self.organisms.iter_mut()
    }

    /// Get the underlying organisms
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    /// Get the fittest organism
    pub fn best(&self) -> Option<&Organism> {
        self.organisms.iter().max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Mean accumulated fitness
    pub fn mean_fitness(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        self.organisms.iter().map(|o| o.fitness).sum::<f64>() / self.organisms.len() as f64
    }

    /// Pair organisms with the most different task thresholds
    ///
    /// Indices are shuffled, then stably sorted by threshold descending, and
    /// the i-th from the top is paired with the i-th from the bottom. Ties in
    /// threshold keep their shuffled order, so organisms sharing a threshold
    /// meet different partners from one generation to the next. A descending
    /// sort on `(threshold, index)` pairs would instead always put the
    /// highest index first among ties and fix every tied pairing. With an
    /// odd population the median organism is left unpaired.
    pub fn complementary_pairs<R: Rng>(&self, rng: &mut R) -> Vec<Pairing> {
        let mut order = rng.shuffled_indices(self.organisms.len());
        order.sort_by_key(|&i| Reverse(self.organisms[i].task_threshold));

        let n = order.len();
        (0..n / 2).map(|i| (order[i], order[n - 1 - i])).collect()
    }

    /// Refresh every organism's match statistics against the true model
    pub fn record_match_stats(&mut self, true_model: &TrueModel) {
        for organism in &mut self.organisms {
            organism.record_match(true_model);
        }
    }

    /// Indices of the organisms that win the end-of-generation tournament
    pub fn select_winners<S, R>(&self, selection: &S, rng: &mut R) -> Vec<usize>
    where
        S: SelectionOperator,
        R: Rng,
    {
        selection.select(&self.organisms, rng)
    }

    /// Build the next generation from tournament winners
    ///
    /// With mating, winners are taken two at a time and each pair yields four
    /// children, each from its own crossover and mutation. Without mating each
    /// winner yields two independently mutated clones. Every child starts with
    /// zero fitness. The returned population is one generation later.
    pub fn reproduce<C, M, R>(
        &self,
        winners: &[usize],
        mating: bool,
        crossover: &C,
        mutation: &M,
        rng: &mut R,
    ) -> EvoResult<Population>
    where
        C: CrossoverOperator,
        M: MutationOperator,
        R: Rng,
    {
        if winners.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let mut children = Vec::with_capacity(winners.len() * 2);
        if mating {
            if winners.len() % 2 != 0 {
                return Err(EvolutionError::Configuration(format!(
                    "mating needs an even number of winners, got {}",
                    winners.len()
                )));
            }
            for pair in winners.chunks_exact(2) {
                let parent1 = &self.organisms[pair[0]];
                let parent2 = &self.organisms[pair[1]];
                for _ in 0..4 {
                    let mut child = crossover.crossover(parent1, parent2, rng);
                    mutation.mutate(&mut child, rng);
                    children.push(child);
                }
            }
        } else {
            for &winner in winners {
                for _ in 0..2 {
                    let mut child = self.organisms[winner].clone();
                    child.reset_fitness();
                    mutation.mutate(&mut child, rng);
                    children.push(child);
                }
            }
        }

        Ok(Population {
            organisms: children,
            generation: self.generation + 1,
        })
    }
}

#[cfg(feature = "parallel")]
impl Population {
    /// Score every organism alone and add the reward to its fitness
    pub fn score_solo_round(&mut self, challenge: &Challenge, true_model: &TrueModel) {
        self.organisms.par_iter_mut().for_each(|organism| {
            let reward = score_solo(organism, challenge, true_model);
            organism.add_fitness(reward);
        });
    }

    /// Score each pair together and add the shared reward to both partners
    pub fn score_cooperative_round(
        &mut self,
        pairs: &[Pairing],
        challenge: &Challenge,
        true_model: &TrueModel,
    ) {
        let organisms = &self.organisms;
        let rewards: Vec<f64> = pairs
            .par_iter()
            .map(|&(a, b)| score_cooperative(&organisms[a], &organisms[b], challenge, true_model))
            .collect();
        self.credit_pairs(pairs, &rewards);
    }
}

/// Sequential fallback for round scoring (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
impl Population {
    /// Score every organism alone and add the reward to its fitness
    pub fn score_solo_round(&mut self, challenge: &Challenge, true_model: &TrueModel) {
        for organism in &mut self.organisms {
            let reward = score_solo(organism, challenge, true_model);
            organism.add_fitness(reward);
        }
    }

    /// Score each pair together and add the shared reward to both partners
    pub fn score_cooperative_round(
        &mut self,
        pairs: &[Pairing],
        challenge: &Challenge,
        true_model: &TrueModel,
    ) {
        let organisms = &self.organisms;
        let rewards: Vec<f64> = pairs
            .iter()
            .map(|&(a, b)| score_cooperative(&organisms[a], &organisms[b], challenge, true_model))
            .collect();
        self.credit_pairs(pairs, &rewards);
    }
}

impl Population {
    fn credit_pairs(&mut self, pairs: &[Pairing], rewards: &[f64]) {
        for (&(a, b), &reward) in pairs.iter().zip(rewards) {
            debug_assert_ne!(a, b, "organism paired with itself");
            self.organisms[a].add_fitness(reward);
            self.organisms[b].add_fitness(reward);
        }
    }
}
