//! Evolutionary orthogonal autorouter for simplified PCBs.
//!
//! Connects pairs of fixed pins on a rectangular grid with chains of
//! horizontal and vertical segments, searching for routings with few
//! crossings, short wires, few bends and nothing off the board.
//!
//! - [`model`]: points, segments, canonical paths, problems and solutions
//! - [`ga`]: initializer, mutation/crossover/selection operators, fitness
//!   evaluators and the generational [`Solver`](ga::Solver)
//! - `export` (feature `serde`): JSON snapshots and background history
//!   export
//!
//! # Example
//!
//! ```
//! use u_pcbroute::ga::{Solver, SolverConfig};
//! use u_pcbroute::model::Problem;
//!
//! let problem: Problem = "6;6\n0;0;5;5\n5;0;0;5\n".parse().unwrap();
//! let config = SolverConfig::default()
//!     .with_population_size(10)
//!     .with_generation_limit(5)
//!     .with_seed(1);
//! let result = Solver::new(problem, config).unwrap().run();
//! println!("best fitness {}", result.best_fitness);
//! ```
//!
//! # Logging
//!
//! Solve progress is reported through [`tracing`]; install a subscriber to
//! see it. The library never installs one itself.

pub mod error;
#[cfg(feature = "serde")]
pub mod export;
pub mod ga;
pub mod model;
