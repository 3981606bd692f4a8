//! Cooperative generational GA
//!
//! This module implements the generation loop: complementary pairing,
//! challenge rounds, tournament selection and reproduction.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::challenge::ChallengeSampler;
use crate::config::SimulationConfig;
use crate::diagnostics::reporter::StatsReporter;
use crate::diagnostics::{EvolutionResult, EvolutionStats, FitnessSummary, GenerationStats};
use crate::error::{EvoResult, EvolutionError};
use crate::genome::true_model::TrueModel;
use crate::operators::crossover::ModelSwapCrossover;
use crate::operators::mutation::BitFlipMutation;
use crate::operators::selection::PairwiseTournament;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::population::Population;

/// The GA with the standard operators
pub type StandardGA = CooperativeGA<PairwiseTournament, ModelSwapCrossover, BitFlipMutation>;

/// Builder for CooperativeGA
pub struct CooperativeGABuilder<S, C, M> {
    config: SimulationConfig,
    selection: Option<S>,
    crossover: Option<C>,
    mutation: Option<M>,
}

impl CooperativeGABuilder<(), (), ()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            selection: None,
            crossover: None,
            mutation: None,
        }
    }
}

impl Default for CooperativeGABuilder<(), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C, M> CooperativeGABuilder<S, C, M> {
    /// Set the simulation configuration
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the selection operator
    pub fn selection<NewS>(self, selection: NewS) -> CooperativeGABuilder<NewS, C, M>
    where
        NewS: SelectionOperator,
    {
        CooperativeGABuilder {
            config: self.config,
            selection: Some(selection),
            crossover: self.crossover,
            mutation: self.mutation,
        }
    }

    /// Set the crossover operator
    pub fn crossover<NewC>(self, crossover: NewC) -> CooperativeGABuilder<S, NewC, M>
    where
        NewC: CrossoverOperator,
    {
        CooperativeGABuilder {
            config: self.config,
            selection: self.selection,
            crossover: Some(crossover),
            mutation: self.mutation,
        }
    }

    /// Set the mutation operator
    pub fn mutation<NewM>(self, mutation: NewM) -> CooperativeGABuilder<S, C, NewM>
    where
        NewM: MutationOperator,
    {
        CooperativeGABuilder {
            config: self.config,
            selection: self.selection,
            crossover: self.crossover,
            mutation: Some(mutation),
        }
    }
}

impl<S, C, M> CooperativeGABuilder<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Build the CooperativeGA instance
    pub fn build(self) -> EvoResult<CooperativeGA<S, C, M>> {
        self.config.validate()?;
        let sampler = ChallengeSampler::from_config(&self.config)?;

        let selection = self.selection.ok_or_else(|| {
            EvolutionError::Configuration("Selection operator must be specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            EvolutionError::Configuration("Crossover operator must be specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            EvolutionError::Configuration("Mutation operator must be specified".to_string())
        })?;

        Ok(CooperativeGA {
            config: self.config,
            sampler,
            selection,
            crossover,
            mutation,
        })
    }
}

/// Cooperative generational GA
///
/// Each generation pairs organisms with opposite task thresholds, runs the
/// configured number of challenge rounds, then replaces the whole population
/// with the offspring of pairwise tournament winners.
pub struct CooperativeGA<S, C, M> {
    config: SimulationConfig,
    sampler: ChallengeSampler,
    selection: S,
    crossover: C,
    mutation: M,
}

impl StandardGA {
    /// Build a GA with the standard operators for the given configuration
    pub fn from_config(config: SimulationConfig) -> EvoResult<Self> {
        config.validate()?;
        let mutation = BitFlipMutation::new(config.mutation_probability, config.threshold_bound());
        CooperativeGABuilder::new()
            .config(config)
            .selection(PairwiseTournament::new())
            .crossover(ModelSwapCrossover::new())
            .mutation(mutation)
            .build()
    }
}

impl<S, C, M> CooperativeGA<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// The configuration this GA runs with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draw a fresh true model and initial population
    pub fn initialize<R: Rng>(&self, rng: &mut R) -> (TrueModel, Population) {
        let true_model = TrueModel::random(self.config.dimension, rng);
        let population = Population::random(&self.config, rng);
        (true_model, population)
    }

    /// Run one generation's challenge rounds, accumulating fitness
    ///
    /// The complementary pairing is computed once and reused for every
    /// cooperative round. Returns the number of cooperative rounds.
    pub fn run_rounds<R: Rng>(
        &self,
        population: &mut Population,
        observed: &TrueModel,
        rng: &mut R,
    ) -> usize {
        let pairs = population.complementary_pairs(rng);
        let mut cooperative_rounds = 0;

        for round in 0..self.config.rounds_per_generation {
            let challenge = self.sampler.sample(rng);
            let cooperative = self.config.is_cooperative_round(round);
            trace!(
                round,
                reward1 = challenge.reward1,
                reward2 = challenge.reward2,
                cooperative,
                "challenge"
            );

            if cooperative {
                population.score_cooperative_round(&pairs, &challenge, observed);
                cooperative_rounds += 1;
            } else {
                population.score_solo_round(&challenge, observed);
            }
        }

        cooperative_rounds
    }

    /// Run one generation and return its successor with a statistics snapshot
    ///
    /// Organisms are scored against the configured observation of
    /// `true_model`; statistics always compare against `true_model` itself.
    pub fn run_generation<R: Rng>(
        &self,
        mut population: Population,
        true_model: &TrueModel,
        rng: &mut R,
    ) -> EvoResult<(Population, GenerationStats)> {
        let start = Instant::now();

        let observed = self.config.observation.project(true_model, rng);
        let cooperative_rounds = self.run_rounds(&mut population, &observed, rng);
        let fitness = FitnessSummary::from_population(&population, true_model);

        let winners = population.select_winners(&self.selection, rng);
        let mut next = population.reproduce(
            &winners,
            self.config.mating_enabled,
            &self.crossover,
            &self.mutation,
            rng,
        )?;
        if next.len() != population.len() {
            return Err(EvolutionError::Configuration(format!(
                "reproduction produced {} organisms from a population of {}",
                next.len(),
                population.len()
            )));
        }

        next.record_match_stats(true_model);
        let stats = GenerationStats::from_population(&next, true_model)
            .ok_or(EvolutionError::EmptyPopulation)?
            .with_fitness(fitness)
            .with_cooperative_rounds(cooperative_rounds)
            .with_elapsed(start.elapsed());

        debug!(
            generation = stats.generation,
            best_fitness = stats.fitness.as_ref().map(|f| f.best_fitness),
            mean_fitness = stats.fitness.as_ref().map(|f| f.mean_fitness),
            model1_median = stats.model1_match.median,
            model2_median = stats.model2_match.median,
            "generation evolved"
        );

        Ok((next, stats))
    }

    /// Run the configured number of generations from a fresh start
    pub fn run<R, Rep>(&self, rng: &mut R, reporter: Rep) -> EvoResult<EvolutionResult>
    where
        R: Rng,
        Rep: StatsReporter,
    {
        let (true_model, population) = self.initialize(rng);
        self.run_from(true_model, population, rng, reporter)
    }

    /// Run the configured number of generations from the given state
    pub fn run_from<R, Rep>(
        &self,
        true_model: TrueModel,
        mut population: Population,
        rng: &mut R,
        mut reporter: Rep,
    ) -> EvoResult<EvolutionResult>
    where
        R: Rng,
        Rep: StatsReporter,
    {
        self.check_state(&true_model, &population)?;

        let start = Instant::now();
        let mut stats = EvolutionStats::new();
        info!(
            population = self.config.population_size,
            dimension = self.config.dimension,
            generations = self.config.generations,
            cooperation = self.config.cooperation_enabled,
            mating = self.config.mating_enabled,
            mutation_probability = self.mutation.mutation_probability(),
            "starting simulation"
        );

        for _ in 0..self.config.generations {
            let (next, gen_stats) = self.run_generation(population, &true_model, rng)?;
            reporter.report(&gen_stats)?;
            stats.record(gen_stats);
            population = next;
        }

        stats.set_runtime(start.elapsed());
        info!(
            generations = stats.num_generations(),
            runtime_ms = stats.total_runtime_ms,
            "simulation finished"
        );

        Ok(EvolutionResult {
            generations: stats.num_generations(),
            population,
            true_model,
            stats,
        })
    }

    fn check_state(&self, true_model: &TrueModel, population: &Population) -> EvoResult<()> {
        let dimension = self.config.dimension;
        true_model.model1.check_dimension(dimension)?;
        true_model.model2.check_dimension(dimension)?;
        if population.len() != self.config.population_size {
            return Err(EvolutionError::Configuration(format!(
                "population has {} organisms, configuration expects {}",
                population.len(),
                self.config.population_size
            )));
        }
        for organism in population.iter() {
            organism.model1.check_dimension(dimension)?;
            organism.model2.check_dimension(dimension)?;
        }
        Ok(())
    }
}
