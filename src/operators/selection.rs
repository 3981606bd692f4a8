//! Selection operators
//!
//! This module provides the pairwise tournament used at generation end.

use rand::Rng;

use crate::operators::traits::SelectionOperator;
use crate::population::organism::Organism;
use crate::random::RandomSource;

/// Pairwise tournament selection
///
/// Shuffles the population and splits it into adjacent pairs; each pair
/// yields one winner, the organism with strictly higher fitness. Exact ties
/// go to the second organism of the pair. With an odd population the last
/// organism in shuffled order sits out.
#[derive(Clone, Debug, Default)]
pub struct PairwiseTournament;

impl PairwiseTournament {
    /// Create a new pairwise tournament
    pub fn new() -> Self {
        Self
    }
}

impl SelectionOperator for PairwiseTournament {
    fn select<R: Rng>(&self, organisms: &[Organism], rng: &mut R) -> Vec<usize> {
        let order = rng.shuffled_indices(organisms.len());
        order
            .chunks_exact(2)
            .map(|pair| {
                let (first, second) = (pair[0], pair[1]);
                if organisms[first].beats(&organisms[second]) {
                    first
                } else {
                    second
                }
            })
            .collect()
    }
}
