//! Solver configuration.
//!
//! [`SolverConfig`] holds all parameters that control the evolutionary loop.

use super::crossover::Crossover;
use super::mutation::Mutation;
use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the routing GA.
///
/// Builders store values as given; out-of-range values are rejected by
/// [`validate`](Self::validate) rather than clamped.
///
/// # Defaults
///
/// ```
/// use u_pcbroute::ga::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generation_limit, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pcbroute::ga::{Mutation, Selection, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Roulette { bias: 1e3 })
///     .with_mutation(Mutation::SplitShift { max_shift: 3 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Number of solutions in every generation.
    pub population_size: usize,

    /// Number of generations, counting the initial population as the first.
    pub generation_limit: usize,

    /// Probability of crossing two parents; otherwise the first parent is
    /// cloned.
    pub crossover_probability: f64,

    /// Probability of mutating a child.
    pub mutation_probability: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Evaluate each generation's children on the rayon pool.
    ///
    /// Only honoured with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generation_limit: 500,
            crossover_probability: 0.9,
            mutation_probability: 0.3,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation limit.
    pub fn with_generation_limit(mut self, n: usize) -> Self {
        self.generation_limit = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration and every operator's parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generation_limit == 0 {
            return Err(ConfigError::ZeroGenerationLimit);
        }
        for (name, value) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        self.selection.validate()?;
        self.crossover.validate()?;
        self.mutation.validate()
    }
}
