//! Evolutionary routing engine.
//!
//! A generational GA over [`Solution`](crate::model::Solution)s. Every
//! operator preserves canonical path form, so the loop never has to reject
//! or retry an individual.
//!
//! # Seams
//!
//! - [`PathInitializer`]: random canonical path between two pins
//! - [`FitnessEvaluator`]: scalar cost, lower is better
//! - [`GenerationCallback`]: per-generation notification
//!
//! # Key Types
//!
//! - [`SolverConfig`]: population size, generation limit, operators
//! - [`Solver`]: executes the evolutionary loop
//! - [`SolveResult`]: best routing with per-generation statistics
//!
//! # Submodules
//!
//! - [`repair`]: connection synthesis and chain canonicalization
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Lienig & Brandt (1994), "An Evolutionary Algorithm for the Routing of
//!   Multi-Chip Modules"

mod config;
mod crossover;
mod fitness;
mod initializer;
mod mutation;
pub mod repair;
mod runner;
mod selection;
mod types;

pub use config::SolverConfig;
pub use crossover::Crossover;
pub use fitness::{
    DynamicEvaluator, FitnessWeights, WeightedEvaluator, MAX_INTERSECTION_ESCALATION,
};
pub use initializer::RandomWalkInitializer;
pub use mutation::{Mutation, MutationOutcome};
pub use runner::{GenerationStats, SolveResult, Solver};
pub use selection::Selection;
pub use types::{FitnessEvaluator, GenerationCallback, GenerationReport, PathInitializer, Scored};
