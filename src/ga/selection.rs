//! Parent selection strategies.
//!
//! Every strategy returns a pair of population indices. All strategies
//! assume **minimization** (lower fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Scored;
use crate::error::ConfigError;
use rand::Rng;

/// Selection strategy for choosing two parents.
///
/// # Examples
///
/// ```
/// use u_pcbroute::ga::Selection;
///
/// // Tournament over 10% of the population
/// let sel = Selection::Tournament { percentage: 0.1 };
/// assert!(sel.validate().is_ok());
///
/// // Exponentially biased roulette wheel
/// let sel = Selection::Roulette { bias: 1e3 };
/// assert!(sel.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Biased roulette wheel.
    ///
    /// Fitness is mapped linearly onto `[0, 1]` (generation best → 0,
    /// generation worst → 1) and each individual weighs `bias^(-normalized)`.
    /// The best individual therefore weighs 1 and the worst `1 / bias`.
    /// The two parents are drawn independently and may coincide.
    ///
    /// # Complexity
    /// O(n) prefix build, O(log n) per draw
    Roulette { bias: f64 },

    /// Tournament over a random `ceil(n * percentage)` sample.
    ///
    /// The population order is shuffled and the best of the leading sample
    /// becomes the first parent. The second parent is drawn the same way
    /// from a fresh shuffle that excludes the first parent.
    ///
    /// # Complexity
    /// O(n) per pair
    Tournament { percentage: f64 },

    /// Always picks the first individual as both parents.
    First,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament { percentage: 0.1 }
    }
}

impl Selection {
    /// Selects two parent indices from `population`.
    ///
    /// `best_fitness` and `worst_fitness` are the population's extremes.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select_parents<R: Rng>(
        &self,
        population: &[Scored],
        best_fitness: f64,
        worst_fitness: f64,
        rng: &mut R,
    ) -> (usize, usize) {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Roulette { bias } => {
                let prefix = roulette_prefix(population, *bias, best_fitness, worst_fitness);
                (spin(&prefix, rng), spin(&prefix, rng))
            }
            Selection::Tournament { percentage } => tournament(population, *percentage, rng),
            Selection::First => (0, 0),
        }
    }

    /// Checks the strategy's parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Selection::Roulette { bias } if !bias.is_finite() || bias <= 1.0 => {
                Err(ConfigError::InvalidRouletteBias(bias))
            }
            Selection::Tournament { percentage } if !(percentage > 0.0 && percentage <= 1.0) => {
                Err(ConfigError::InvalidTournamentPercentage(percentage))
            }
            _ => Ok(()),
        }
    }
}

/// Cumulative roulette weights.
fn roulette_prefix(population: &[Scored], bias: f64, best: f64, worst: f64) -> Vec<f64> {
    let range = worst - best;
    let mut total = 0.0;
    population
        .iter()
        .map(|ind| {
            let weight = if range.is_finite() && range > 0.0 {
                let normalized = (ind.fitness - best) / range;
                // Non-finite fitness ranks as the worst.
                let normalized = if normalized.is_finite() {
                    normalized.clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let weight = bias.powf(-normalized);
                if weight.is_finite() {
                    weight
                } else {
                    1.0
                }
            } else {
                1.0
            };
            total += weight;
            total
        })
        .collect()
}

/// Draws one index from a cumulative weight array.
fn spin<R: Rng>(prefix: &[f64], rng: &mut R) -> usize {
    let total = prefix.last().copied().unwrap_or(0.0);
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..prefix.len());
    }
    let sample = rng.random_range(0.0..total);
    // First index whose cumulative weight reaches the sample.
    prefix
        .partition_point(|&cumulative| cumulative < sample)
        .min(prefix.len() - 1)
}

fn tournament<R: Rng>(population: &[Scored], percentage: f64, rng: &mut R) -> (usize, usize) {
    let n = population.len();
    if n == 1 {
        return (0, 0);
    }
    let size = ((n as f64 * percentage).ceil() as usize).clamp(1, n);

    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, rng);
    let first = fittest(population, &order[..size]);

    shuffle(&mut order, rng);
    order.retain(|&i| i != first);
    let second = fittest(population, &order[..size.min(order.len())]);

    (first, second)
}

/// Pairwise-swap shuffle: each position trades places with a uniformly
/// drawn position.
fn shuffle<R: Rng>(order: &mut [usize], rng: &mut R) {
    for i in 0..order.len() {
        let j = rng.random_range(0..order.len());
        order.swap(i, j);
    }
}

/// Lowest-fitness member of `candidates`; ties go to the earliest.
fn fittest(population: &[Scored], candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if population[i].fitness < population[best].fitness {
            best = i;
        }
    }
    best
}
