//! Path mutation operators.
//!
//! Every operator acts on one randomly chosen path of a solution and leaves
//! it canonical. Operators that cannot produce a canonical result leave the
//! path untouched and report [`MutationOutcome::Abandoned`].
//!
//! # Operators
//!
//! - [`Mutation::Shift`]: move a segment perpendicular to itself
//! - [`Mutation::SplitShift`]: cut a fragment out of a segment and shift it
//! - [`Mutation::RandomSubPath`]: replace a segment by a random detour
//! - [`Mutation::Replace`]: regenerate the whole path
//! - [`Mutation::Combined`]: pick one of two operators at random

mod shift;
mod split_shift;
mod subpath;

use crate::error::ConfigError;
use crate::ga::types::PathInitializer;
use crate::model::{Path, Segment, Solution};
use rand::Rng;

/// What a mutation did to its target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The path was changed and is canonical.
    Applied,
    /// The edit could not be made canonical; the path is unchanged.
    Abandoned,
    /// Nothing to mutate (empty solution, empty path or no-op operator).
    Skipped,
}

/// Replaces `path`'s segments with `segments` if they form a canonical
/// chain between the same pins.
fn commit(path: &mut Path, segments: Vec<Segment>) -> MutationOutcome {
    let candidate = Path::with_segments(path.start(), path.end(), segments);
    match candidate.validate() {
        Ok(()) => {
            *path = candidate;
            MutationOutcome::Applied
        }
        Err(defect) => {
            tracing::trace!(%defect, "mutation abandoned");
            MutationOutcome::Abandoned
        }
    }
}

/// Mutation strategy applied to a child solution.
///
/// # Examples
///
/// ```
/// use u_pcbroute::ga::Mutation;
///
/// // Half shifts, half random detours
/// let m = Mutation::Combined {
///     first: Box::new(Mutation::RandomSubPath),
///     second: Box::new(Mutation::shift(5)),
///     first_probability: 0.5,
/// };
/// assert!(m.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Leaves the solution unchanged.
    None,

    /// Shifts a random segment by `1..=max_shift` cells.
    Shift {
        max_shift: u32,
        /// Regenerate the whole path when the shift cannot be made canonical.
        regenerate_on_failure: bool,
    },

    /// Shifts a random fragment of a random segment by `1..=max_shift`.
    SplitShift { max_shift: u32 },

    /// Replaces a random segment with a random sub-path between its
    /// endpoints.
    RandomSubPath,

    /// Regenerates the whole path.
    Replace,

    /// Applies `first` with probability `first_probability`, otherwise
    /// `second`.
    Combined {
        first: Box<Mutation>,
        second: Box<Mutation>,
        first_probability: f64,
    },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Combined {
            first: Box::new(Mutation::RandomSubPath),
            second: Box::new(Mutation::shift(5)),
            first_probability: 0.5,
        }
    }
}

impl Mutation {
    /// Plain shift without regeneration.
    pub fn shift(max_shift: u32) -> Self {
        Mutation::Shift {
            max_shift,
            regenerate_on_failure: false,
        }
    }

    /// Mutates one random path of `solution` in place.
    pub fn apply<I: PathInitializer, R: Rng>(
        &self,
        solution: &mut Solution,
        initializer: &I,
        rng: &mut R,
    ) -> MutationOutcome {
        if let Mutation::None = self {
            return MutationOutcome::Skipped;
        }
        if solution.paths().is_empty() {
            return MutationOutcome::Skipped;
        }
        let index = rng.random_range(0..solution.paths().len());
        self.apply_to_path(&mut solution.paths_mut()[index], initializer, rng)
    }

    fn apply_to_path<I: PathInitializer, R: Rng>(
        &self,
        path: &mut Path,
        initializer: &I,
        rng: &mut R,
    ) -> MutationOutcome {
        match self {
            Mutation::None => MutationOutcome::Skipped,
            Mutation::Shift {
                max_shift,
                regenerate_on_failure,
            } => {
                let outcome = shift::shift_random_segment(path, *max_shift, rng);
                if outcome == MutationOutcome::Abandoned && *regenerate_on_failure {
                    *path = initializer.generate_path(path.start(), path.end(), rng);
                    return MutationOutcome::Applied;
                }
                outcome
            }
            Mutation::SplitShift { max_shift } => split_shift::split_shift(path, *max_shift, rng),
            Mutation::RandomSubPath => subpath::replace_random_segment(path, initializer, rng),
            Mutation::Replace => {
                *path = initializer.generate_path(path.start(), path.end(), rng);
                MutationOutcome::Applied
            }
            Mutation::Combined {
                first,
                second,
                first_probability,
            } => {
                if rng.random_bool(*first_probability) {
                    first.apply_to_path(path, initializer, rng)
                } else {
                    second.apply_to_path(path, initializer, rng)
                }
            }
        }
    }

    /// Checks operator parameters recursively.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Mutation::None | Mutation::RandomSubPath | Mutation::Replace => Ok(()),
            Mutation::Shift { max_shift, .. } | Mutation::SplitShift { max_shift } => {
                if *max_shift == 0 {
                    Err(ConfigError::ZeroMaxShift)
                } else {
                    Ok(())
                }
            }
            Mutation::Combined {
                first,
                second,
                first_probability,
            } => {
                if !(0.0..=1.0).contains(first_probability) {
                    return Err(ConfigError::InvalidProbability {
                        name: "first_probability",
                        value: *first_probability,
                    });
                }
                first.validate()?;
                second.validate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::RandomWalkInitializer;
    use crate::model::{PinPair, Point, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn problem() -> Problem {
        Problem::new(
            12,
            12,
            vec![
                PinPair::new(Point::new(0, 0), Point::new(11, 11)),
                PinPair::new(Point::new(3, 8), Point::new(9, 1)),
                PinPair::new(Point::new(5, 5), Point::new(6, 5)),
            ],
        )
        .unwrap()
    }

    fn all_operators() -> Vec<Mutation> {
        vec![
            Mutation::shift(3),
            Mutation::Shift {
                max_shift: 3,
                regenerate_on_failure: true,
            },
            Mutation::SplitShift { max_shift: 3 },
            Mutation::RandomSubPath,
            Mutation::Replace,
            Mutation::default(),
        ]
    }

    #[test]
    fn test_every_operator_preserves_canonical_form() {
        let problem = problem();
        let init = RandomWalkInitializer::default();
        let mut rng = StdRng::seed_from_u64(42);

        for mutation in all_operators() {
            let mut solution = init.initialize(&problem, &mut rng);
            for _ in 0..300 {
                mutation.apply(&mut solution, &init, &mut rng);
                assert!(solution.is_canonical(), "{mutation:?} broke {solution:?}");
                for (path, pair) in solution.paths().iter().zip(problem.pairs()) {
                    assert_eq!(path.start(), pair.start);
                    assert_eq!(path.end(), pair.end);
                }
            }
        }
    }

    #[test]
    fn test_none_leaves_solution_untouched() {
        let problem = problem();
        let init = RandomWalkInitializer::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut solution = init.initialize(&problem, &mut rng);
        let before = solution.clone();
        assert_eq!(
            Mutation::None.apply(&mut solution, &init, &mut rng),
            MutationOutcome::Skipped
        );
        assert_eq!(solution, before);
    }

    #[test]
    fn test_empty_solution_is_skipped() {
        let init = RandomWalkInitializer::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut solution = Solution::new(Vec::new());
        assert_eq!(
            Mutation::Replace.apply(&mut solution, &init, &mut rng),
            MutationOutcome::Skipped
        );
    }

    #[test]
    fn test_regenerate_on_failure_never_abandons() {
        let problem = problem();
        let init = RandomWalkInitializer::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mutation = Mutation::Shift {
            max_shift: 4,
            regenerate_on_failure: true,
        };
        let mut solution = init.initialize(&problem, &mut rng);
        for _ in 0..500 {
            let outcome = mutation.apply(&mut solution, &init, &mut rng);
            assert_ne!(outcome, MutationOutcome::Abandoned);
        }
    }

    #[test]
    fn test_validate() {
        assert!(Mutation::default().validate().is_ok());
        assert_eq!(Mutation::shift(0).validate(), Err(ConfigError::ZeroMaxShift));
        assert_eq!(
            Mutation::SplitShift { max_shift: 0 }.validate(),
            Err(ConfigError::ZeroMaxShift)
        );
        let nested = Mutation::Combined {
            first: Box::new(Mutation::Replace),
            second: Box::new(Mutation::shift(0)),
            first_probability: 0.5,
        };
        assert_eq!(nested.validate(), Err(ConfigError::ZeroMaxShift));
        let bad_probability = Mutation::Combined {
            first: Box::new(Mutation::Replace),
            second: Box::new(Mutation::Replace),
            first_probability: 1.5,
        };
        assert!(bad_probability.validate().is_err());
    }

    #[test]
    fn test_zero_max_shift_skips_without_validation() {
        let problem = problem();
        let init = RandomWalkInitializer::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut solution = init.initialize(&problem, &mut rng);
        let before = solution.clone();

        for mutation in [Mutation::shift(0), Mutation::SplitShift { max_shift: 0 }] {
            for _ in 0..50 {
                assert_eq!(
                    mutation.apply(&mut solution, &init, &mut rng),
                    MutationOutcome::Skipped
                );
            }
        }
        assert_eq!(solution, before);
    }
}
