//! Operator traits
//!
//! This module defines the selection, crossover and mutation seams used by
//! the generation loop.

use rand::Rng;

use crate::population::organism::Organism;

/// Selection operator trait
///
/// Picks the organisms allowed to reproduce at the end of a generation.
pub trait SelectionOperator: Send + Sync {
    /// Select winners from the population
    ///
    /// Returns the indices of the winners, in selection order.
    fn select<R: Rng>(&self, organisms: &[Organism], rng: &mut R) -> Vec<usize>;
}

/// Crossover operator trait
///
/// Combines two parents into one child.
pub trait CrossoverOperator: Send + Sync {
    /// Produce one child with zero fitness
    fn crossover<R: Rng>(&self, parent1: &Organism, parent2: &Organism, rng: &mut R)
        -> Organism;
}

/// Mutation operator trait
///
/// Applies random changes to an organism in place.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation to an organism
    fn mutate<R: Rng>(&self, organism: &mut Organism, rng: &mut R);

    /// Get the mutation probability per gene
    fn mutation_probability(&self) -> f64;
}
