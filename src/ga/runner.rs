//! Generational solve loop.
//!
//! [`Solver`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::SolverConfig;
use super::fitness::WeightedEvaluator;
use super::initializer::RandomWalkInitializer;
use super::types::{FitnessEvaluator, GenerationCallback, GenerationReport, PathInitializer, Scored};
use crate::error::ConfigError;
use crate::model::{Problem, Solution};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::instrument;

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Lowest fitness of the generation.
    pub best: f64,
    /// Highest fitness of the generation.
    pub worst: f64,
    /// Mean fitness of the generation.
    pub mean: f64,
}

/// Result of a solve run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The best solution found during the entire run.
    pub best: Solution,

    /// Fitness of `best` when it was scored.
    pub best_fitness: f64,

    /// Generation in which `best` was found.
    pub best_generation: usize,

    /// Generations completed, including the initial population.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// All-time best fitness after each generation.
    pub fitness_history: Vec<f64>,

    /// Per-generation best, worst and mean fitness.
    pub stats: Vec<GenerationStats>,
}

/// Evolutionary router over a fixed [`Problem`].
///
/// Path generation and scoring are pluggable through [`PathInitializer`]
/// and [`FitnessEvaluator`]; selection, crossover and mutation come from
/// [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use u_pcbroute::ga::{Solver, SolverConfig};
/// use u_pcbroute::model::Problem;
///
/// let problem: Problem = "8;8\n0;0;7;7\n7;0;0;7\n".parse().unwrap();
/// let config = SolverConfig::default()
///     .with_population_size(20)
///     .with_generation_limit(10)
///     .with_seed(42);
/// let result = Solver::new(problem, config).unwrap().run();
/// assert!(result.best.is_canonical());
/// assert_eq!(result.generations, 10);
/// ```
pub struct Solver<I = RandomWalkInitializer, E = WeightedEvaluator> {
    problem: Problem,
    config: SolverConfig,
    initializer: I,
    evaluator: E,
    callbacks: Vec<Box<dyn GenerationCallback>>,
}

impl Solver {
    /// Creates a solver with the random-walk initializer and the default
    /// weighted evaluator.
    ///
    /// # Errors
    /// Returns the first configuration value that fails validation.
    pub fn new(problem: Problem, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            initializer: RandomWalkInitializer::default(),
            evaluator: WeightedEvaluator::default(),
            callbacks: Vec::new(),
        })
    }
}

impl<I: PathInitializer, E: FitnessEvaluator> Solver<I, E> {
    /// Replaces the path initializer.
    pub fn with_initializer<I2: PathInitializer>(
        self,
        initializer: I2,
    ) -> Result<Solver<I2, E>, ConfigError> {
        initializer.validate()?;
        Ok(Solver {
            problem: self.problem,
            config: self.config,
            initializer,
            evaluator: self.evaluator,
            callbacks: self.callbacks,
        })
    }

    /// Replaces the fitness evaluator.
    pub fn with_evaluator<E2: FitnessEvaluator>(
        self,
        evaluator: E2,
    ) -> Result<Solver<I, E2>, ConfigError> {
        evaluator.validate()?;
        Ok(Solver {
            problem: self.problem,
            config: self.config,
            initializer: self.initializer,
            evaluator,
            callbacks: self.callbacks,
        })
    }

    /// Registers a per-generation callback.
    pub fn add_callback(&mut self, callback: impl GenerationCallback + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// The problem being solved.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The fitness evaluator, including any adapted state.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Runs until the generation limit.
    pub fn run(&mut self) -> SolveResult {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked at the top of each generation; once set, the
    /// run stops and returns the best solution found so far.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            pairs = self.problem.pairs().len(),
            population = self.config.population_size,
            generation_limit = self.config.generation_limit,
        )
    )]
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> SolveResult {
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        tracing::info!("Routing started");

        // 1. Seed population
        let initial: Vec<Solution> = (0..self.config.population_size)
            .map(|_| self.initializer.initialize(&self.problem, &mut rng))
            .collect();
        let mut population = self.score(initial);

        let mut generation = 1;
        let mut extremes = Extremes::of(&population);
        let mut best = population[extremes.best_index].solution.clone();
        let mut best_fitness = extremes.best;
        let mut best_generation = generation;
        self.evaluator
            .observe_generation(&population[extremes.best_index].solution, &self.problem);

        let mut fitness_history = Vec::with_capacity(self.config.generation_limit);
        let mut stats = Vec::with_capacity(self.config.generation_limit);
        fitness_history.push(best_fitness);
        stats.push(extremes.stats(generation));

        let mut cancelled = false;

        // 2. Generations
        while generation < self.config.generation_limit {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let children = self.breed(&population, &extremes, &mut rng);
            population = self.score(children);
            generation += 1;

            extremes = Extremes::of(&population);
            let generation_best = &population[extremes.best_index].solution;
            if extremes.best < best_fitness {
                best = generation_best.clone();
                best_fitness = extremes.best;
                best_generation = generation;
            }
            self.evaluator.observe_generation(generation_best, &self.problem);

            fitness_history.push(best_fitness);
            stats.push(extremes.stats(generation));
            tracing::debug!(
                generation,
                generation_best = extremes.best,
                generation_worst = extremes.worst,
                best = best_fitness,
                "Generation complete"
            );

            let report = GenerationReport {
                generation,
                generation_best,
                best_fitness,
                generation_best_fitness: extremes.best,
                generation_worst_fitness: extremes.worst,
                population: &population,
                problem: &self.problem,
            };
            for callback in &mut self.callbacks {
                callback.on_generation(&report);
            }
        }

        tracing::info!(
            generations = generation,
            best_fitness,
            best_generation,
            cancelled,
            "Routing finished"
        );

        SolveResult {
            best,
            best_fitness,
            best_generation,
            generations: generation,
            cancelled,
            fitness_history,
            stats,
        }
    }

    /// Builds the next generation's unscored children.
    fn breed<R: Rng>(&self, population: &[Scored], extremes: &Extremes, rng: &mut R) -> Vec<Solution> {
        let config = &self.config;
        (0..config.population_size)
            .map(|_| {
                let (p1, p2) =
                    config
                        .selection
                        .select_parents(population, extremes.best, extremes.worst, rng);

                let mut child = if rng.random_bool(config.crossover_probability) {
                    config
                        .crossover
                        .apply(&population[p1].solution, &population[p2].solution, rng)
                } else {
                    population[p1].solution.clone()
                };

                if rng.random_bool(config.mutation_probability) {
                    config.mutation.apply(&mut child, &self.initializer, rng);
                }
                child
            })
            .collect()
    }

    /// Scores `solutions` with the current evaluator weights.
    fn score(&self, solutions: Vec<Solution>) -> Vec<Scored> {
        let evaluator = &self.evaluator;
        let problem = &self.problem;

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                return solutions
                    .into_par_iter()
                    .map(|s| {
                        let f = evaluator.evaluate(&s, problem);
                        Scored::new(s, f)
                    })
                    .collect();
            }
        }

        solutions
            .into_iter()
            .map(|s| {
                let f = evaluator.evaluate(&s, problem);
                Scored::new(s, f)
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
impl Solver {
    /// Runs one independent solver per configuration on the rayon pool.
    ///
    /// Every run owns a clone of `problem` and its own seeded generator;
    /// results are returned in `configs` order.
    ///
    /// # Errors
    /// Fails before any run starts if a configuration is invalid.
    pub fn run_batch(
        problem: &Problem,
        configs: &[SolverConfig],
    ) -> Result<Vec<SolveResult>, ConfigError> {
        use rayon::prelude::*;

        for config in configs {
            config.validate()?;
        }
        configs
            .par_iter()
            .map(|config| Solver::new(problem.clone(), config.clone()).map(|mut s| s.run()))
            .collect()
    }
}

/// Best and worst of a scored population.
struct Extremes {
    best_index: usize,
    best: f64,
    worst: f64,
    mean: f64,
}

impl Extremes {
    /// Ties on the best fitness go to the first individual.
    fn of(population: &[Scored]) -> Self {
        let mut extremes = Extremes {
            best_index: 0,
            best: population[0].fitness,
            worst: population[0].fitness,
            mean: 0.0,
        };
        let mut sum = 0.0;
        for (i, ind) in population.iter().enumerate() {
            if ind.fitness < extremes.best {
                extremes.best = ind.fitness;
                extremes.best_index = i;
            }
            if ind.fitness > extremes.worst {
                extremes.worst = ind.fitness;
            }
            sum += ind.fitness;
        }
        extremes.mean = sum / population.len() as f64;
        extremes
    }

    fn stats(&self, generation: usize) -> GenerationStats {
        GenerationStats {
            generation,
            best: self.best,
            worst: self.worst,
            mean: self.mean,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
