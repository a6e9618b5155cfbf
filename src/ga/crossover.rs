//! Path-level crossover.
//!
//! Children inherit whole paths; a path is never split between parents, so
//! every child path is canonical whenever both parents are.

use crate::error::ConfigError;
use crate::model::Solution;
use rand::Rng;

/// Crossover strategy for combining two parents into one child.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_pcbroute::ga::Crossover;
/// use u_pcbroute::model::Solution;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let a = Solution::new(Vec::new());
/// let child = Crossover::default().apply(&a, &a, &mut rng);
/// assert!(child.paths().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Per path slot, take the first parent's path with probability
    /// `first_parent_probability`, otherwise the second's.
    Uniform { first_parent_probability: f64 },

    /// Clone the first parent.
    None,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Uniform {
            first_parent_probability: 0.5,
        }
    }
}

impl Crossover {
    /// Builds a child from `parent1` and `parent2`.
    ///
    /// Both parents must route the same problem, so their path counts match.
    pub fn apply<R: Rng>(&self, parent1: &Solution, parent2: &Solution, rng: &mut R) -> Solution {
        debug_assert_eq!(parent1.paths().len(), parent2.paths().len());
        match self {
            Crossover::None => parent1.clone(),
            Crossover::Uniform {
                first_parent_probability,
            } => Solution::new(
                parent1
                    .paths()
                    .iter()
                    .zip(parent2.paths())
                    .map(|(a, b)| {
                        if rng.random_bool(*first_parent_probability) {
                            a.clone()
                        } else {
                            b.clone()
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Checks the operator's parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Crossover::Uniform {
                first_parent_probability,
            } if !(0.0..=1.0).contains(first_parent_probability) => {
                Err(ConfigError::InvalidProbability {
                    name: "first_parent_probability",
                    value: *first_parent_probability,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, Path, Point, Segment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Solution with `n` straight paths, each shifted by `offset` rows.
    fn parent(n: usize, offset: i32) -> Solution {
        Solution::new(
            (0..n)
                .map(|i| {
                    let y = i as i32 * 10 + offset;
                    let start = Point::new(0, y);
                    let end = Point::new(5, y);
                    Path::with_segments(start, end, vec![Segment::new(start, Direction::Right, 5)])
                })
                .collect(),
        )
    }

    #[test]
    fn test_child_takes_whole_paths_from_parents() {
        let a = parent(6, 0);
        let b = parent(6, 1);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let child = Crossover::default().apply(&a, &b, &mut rng);
            assert_eq!(child.paths().len(), 6);
            for (i, path) in child.paths().iter().enumerate() {
                assert!(path == &a.paths()[i] || path == &b.paths()[i]);
            }
        }
    }

    #[test]
    fn test_uniform_is_symmetric_in_aggregate() {
        let a = parent(4, 0);
        let b = parent(4, 1);
        let mut rng = StdRng::seed_from_u64(7);
        let n = 10_000;

        let mut from_a_forward = 0u32;
        let mut from_a_reversed = 0u32;
        for _ in 0..n {
            let forward = Crossover::default().apply(&a, &b, &mut rng);
            let reversed = Crossover::default().apply(&b, &a, &mut rng);
            from_a_forward += (forward.paths()[0] == a.paths()[0]) as u32;
            from_a_reversed += (reversed.paths()[0] == a.paths()[0]) as u32;
        }
        // Both should be close to n/2.
        for count in [from_a_forward, from_a_reversed] {
            assert!(
                (4500..5500).contains(&count),
                "expected about {} draws from a, got {count}",
                n / 2
            );
        }
    }

    #[test]
    fn test_extreme_bias() {
        let a = parent(3, 0);
        let b = parent(3, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let always_first = Crossover::Uniform {
            first_parent_probability: 1.0,
        };
        assert_eq!(always_first.apply(&a, &b, &mut rng), a);
        assert_eq!(Crossover::None.apply(&b, &a, &mut rng), b);
    }

    #[test]
    fn test_validate() {
        assert!(Crossover::default().validate().is_ok());
        assert!(Crossover::None.validate().is_ok());
        assert!(Crossover::Uniform {
            first_parent_probability: -0.1
        }
        .validate()
        .is_err());
    }
}
