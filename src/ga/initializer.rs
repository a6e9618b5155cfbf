//! Biased random-walk path generation.

use super::repair::{connect, repair_path};
use super::types::PathInitializer;
use crate::error::ConfigError;
use crate::model::{Axis, Path, Point, Segment};
use rand::Rng;

/// Generates paths by a random walk that gradually heads for the target.
///
/// Each step draws an axis and a length in `1..=max_length`. With the
/// current head-to-target probability the direction points at the end pin;
/// otherwise it is random and the probability grows by a random increment
/// (saturating at 100). A step on the running segment's axis extends it
/// (same direction) or shortens it to no less than 1 (opposite direction);
/// a step on the other axis starts a new segment. The walk stops as soon as
/// the running segment's line passes through the end pin, trimming it to
/// end exactly there.
///
/// A zero `max_length` draws no steps and connects the pins directly.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_pcbroute::ga::{PathInitializer, RandomWalkInitializer};
/// use u_pcbroute::model::Point;
///
/// let init = RandomWalkInitializer::default().with_max_length(3);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let path = init.generate_path(Point::new(0, 0), Point::new(4, 2), &mut rng);
/// assert!(path.is_canonical());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWalkInitializer {
    /// Longest single random step.
    pub max_length: u32,

    /// Starting head-to-target probability, in percent.
    pub initial_head_to_target_probability: u32,

    /// Walk steps after which the remaining distance is bridged directly.
    pub max_steps: usize,
}

impl Default for RandomWalkInitializer {
    fn default() -> Self {
        Self {
            max_length: 5,
            initial_head_to_target_probability: 0,
            max_steps: 10_000,
        }
    }
}

impl RandomWalkInitializer {
    /// Sets the longest single random step.
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the starting head-to-target probability (percent).
    pub fn with_initial_head_to_target_probability(mut self, percent: u32) -> Self {
        self.initial_head_to_target_probability = percent;
        self
    }

    /// Sets the step budget before the walk is bridged directly.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    fn random_step<R: Rng>(
        &self,
        from: Point,
        target: Point,
        head_probability: &mut u32,
        rng: &mut R,
    ) -> Segment {
        let length = rng.random_range(1..=self.max_length);
        let axis = if rng.random_bool(0.5) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        let direction = if rng.random_range(0..100) < *head_probability {
            axis.toward(from, target)
        } else {
            *head_probability = (*head_probability + rng.random_range(0..100)).min(100);
            axis.directions()[usize::from(rng.random_bool(0.5))]
        };

        Segment::new(from, direction, length)
    }
}

impl PathInitializer for RandomWalkInitializer {
    fn generate_path<R: Rng>(&self, start: Point, end: Point, rng: &mut R) -> Path {
        if start == end {
            return Path::new(start, end);
        }
        if self.max_length == 0 {
            return Path::with_segments(start, end, connect(start, end));
        }

        let mut head_probability = self.initial_head_to_target_probability;
        let mut segments = vec![self.random_step(start, end, &mut head_probability, rng)];
        let mut steps = 0usize;

        loop {
            let Some(last) = segments.last_mut() else {
                break;
            };
            if last.contains(end) {
                last.length = last.start.manhattan(end);
                if last.length == 0 {
                    segments.pop();
                }
                break;
            }
            if steps >= self.max_steps {
                let mut path = Path::with_segments(start, end, segments);
                repair_path(&mut path);
                return path;
            }
            steps += 1;

            let step = self.random_step(last.end(), end, &mut head_probability, rng);
            if step.axis() == last.axis() {
                if step.direction == last.direction {
                    last.length += step.length;
                } else {
                    last.length = last.length.saturating_sub(step.length).max(1);
                }
            } else {
                segments.push(step);
            }
        }

        Path::with_segments(start, end, segments)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.initial_head_to_target_probability > 100 {
            return Err(ConfigError::InvalidPercentage {
                name: "initial_head_to_target_probability",
                value: self.initial_head_to_target_probability,
            });
        }
        Ok(())
    }
}
