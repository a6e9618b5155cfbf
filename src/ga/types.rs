//! Core trait definitions for the routing GA.
//!
//! The solver is composed over three seams:
//!
//! - [`PathInitializer`]: builds a random canonical path between two pins
//! - [`FitnessEvaluator`]: maps a solution to a scalar cost
//! - [`GenerationCallback`]: receives a read-only report after each generation
//!
//! Selection, crossover and mutation are closed families and live as enums
//! ([`Selection`](super::Selection), [`Crossover`](super::Crossover),
//! [`Mutation`](super::Mutation)).

use crate::error::ConfigError;
use crate::model::{Path, Point, Problem, Solution};
use rand::Rng;

/// A solution paired with its fitness. Lower fitness is better.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub solution: Solution,
    pub fitness: f64,
}

impl Scored {
    /// Pairs a solution with its fitness.
    pub fn new(solution: Solution, fitness: f64) -> Self {
        Self { solution, fitness }
    }
}

/// Generates structurally valid random paths.
///
/// Implementations must return a canonical path (see
/// [`Path::validate`]) for any pair of pins.
pub trait PathInitializer: Send + Sync {
    /// Creates a random canonical path from `start` to `end`.
    fn generate_path<R: Rng>(&self, start: Point, end: Point, rng: &mut R) -> Path;

    /// Creates a solution with one fresh path per pin pair of `problem`.
    fn initialize<R: Rng>(&self, problem: &Problem, rng: &mut R) -> Solution {
        Solution::new(
            problem
                .pairs()
                .iter()
                .map(|pair| self.generate_path(pair.start, pair.end, rng))
                .collect(),
        )
    }

    /// Checks the initializer's parameters.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Maps a solution to a scalar cost. Lower is better.
///
/// `evaluate` takes `&self` so a generation's children can be scored in
/// any order (or in parallel) with identical results. Stateful evaluators
/// adapt between generations through
/// [`observe_generation`](Self::observe_generation).
pub trait FitnessEvaluator: Send + Sync {
    /// Computes the cost of `solution` on `problem`.
    fn evaluate(&self, solution: &Solution, problem: &Problem) -> f64;

    /// Called once after every completed generation with that
    /// generation's best solution. The default does nothing.
    fn observe_generation(&mut self, _generation_best: &Solution, _problem: &Problem) {}

    /// Checks the evaluator's parameters.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Read-only snapshot handed to callbacks after each generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// 1-based generation number; the seed population is generation 1.
    pub generation: usize,
    /// Best solution of this generation.
    pub generation_best: &'a Solution,
    /// Best fitness seen over the whole run so far.
    pub best_fitness: f64,
    /// Best fitness of this generation.
    pub generation_best_fitness: f64,
    /// Worst fitness of this generation.
    pub generation_worst_fitness: f64,
    /// The full scored population of this generation.
    pub population: &'a [Scored],
    /// The problem being solved.
    pub problem: &'a Problem,
}

impl GenerationReport<'_> {
    /// Mean fitness of the population.
    pub fn mean_fitness(&self) -> f64 {
        if self.population.is_empty() {
            return f64::NAN;
        }
        self.population.iter().map(|s| s.fitness).sum::<f64>() / self.population.len() as f64
    }
}

/// Side-effecting per-generation notification.
///
/// Callbacks cannot reach solver state; anything slow (file writes,
/// rendering) should be handed off to a background worker.
pub trait GenerationCallback {
    /// Receives the report of a completed generation.
    fn on_generation(&mut self, report: &GenerationReport<'_>);
}

impl<F> GenerationCallback for F
where
    F: FnMut(&GenerationReport<'_>),
{
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self(report)
    }
}
