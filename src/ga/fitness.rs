//! Weighted-sum fitness evaluators.
//!
//! The cost of a solution is
//!
//! ```text
//! intersections * w_i + total_length * w_l + segment_count * w_s
//!     + outside_segments * w_o + outside_fragment_length * w_f
//! ```
//!
//! Lower is better. [`DynamicEvaluator`] adapts the weights between
//! generations based on how often the generation best was crossing-free.

use super::types::FitnessEvaluator;
use crate::error::ConfigError;
use crate::model::{Problem, Solution};

/// Largest factor the dynamic intersection weight may grow over its base.
pub const MAX_INTERSECTION_ESCALATION: f64 = (1u64 << 20) as f64;

/// The five penalty weights.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessWeights {
    /// Per extra visit of a grid point.
    pub intersection: f64,
    /// Per unit of routed length.
    pub total_length: f64,
    /// Per segment.
    pub segment_count: f64,
    /// Per segment with an endpoint off the board.
    pub outside_segments: f64,
    /// Per unit of length lying off the board.
    pub outside_fragments: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            intersection: 1.0,
            total_length: 1.0,
            segment_count: 1.0,
            outside_segments: 1.0,
            outside_fragments: 1.0,
        }
    }
}

impl FitnessWeights {
    /// Sets the intersection weight.
    pub fn with_intersection(mut self, w: f64) -> Self {
        self.intersection = w;
        self
    }

    /// Sets the total-length weight.
    pub fn with_total_length(mut self, w: f64) -> Self {
        self.total_length = w;
        self
    }

    /// Sets the segment-count weight.
    pub fn with_segment_count(mut self, w: f64) -> Self {
        self.segment_count = w;
        self
    }

    /// Sets the outside-segment-count weight.
    pub fn with_outside_segments(mut self, w: f64) -> Self {
        self.outside_segments = w;
        self
    }

    /// Sets the outside-fragment-length weight.
    pub fn with_outside_fragments(mut self, w: f64) -> Self {
        self.outside_fragments = w;
        self
    }

    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("intersection", self.intersection),
            ("total_length", self.total_length),
            ("segment_count", self.segment_count),
            ("outside_segments", self.outside_segments),
            ("outside_fragments", self.outside_fragments),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// Weighted cost of `solution`.
    pub fn cost(&self, solution: &Solution, problem: &Problem) -> f64 {
        let outside = solution.outside_board_stats(problem);
        term(solution.intersections() as u64, self.intersection)
            + term(solution.total_length(), self.total_length)
            + term(solution.total_segment_count() as u64, self.segment_count)
            + term(outside.count as u64, self.outside_segments)
            + term(outside.length, self.outside_fragments)
    }
}

/// A zero metric costs nothing, whatever its weight.
fn term(metric: u64, weight: f64) -> f64 {
    if metric == 0 {
        0.0
    } else {
        metric as f64 * weight
    }
}

/// Static weighted-sum evaluator.
///
/// # Examples
///
/// ```
/// use u_pcbroute::ga::{FitnessEvaluator, WeightedEvaluator};
/// use u_pcbroute::model::{Direction, Path, PinPair, Point, Problem, Segment, Solution};
///
/// let problem = Problem::new(4, 4, vec![PinPair::new(Point::new(0, 0), Point::new(3, 0))]).unwrap();
/// let path = Path::with_segments(
///     Point::new(0, 0),
///     Point::new(3, 0),
///     vec![Segment::new(Point::new(0, 0), Direction::Right, 3)],
/// );
/// let solution = Solution::new(vec![path]);
/// // length 3 + one segment
/// assert_eq!(WeightedEvaluator::default().evaluate(&solution, &problem), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedEvaluator {
    pub weights: FitnessWeights,
}

impl WeightedEvaluator {
    /// Creates an evaluator with the given weights.
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }
}

impl FitnessEvaluator for WeightedEvaluator {
    fn evaluate(&self, solution: &Solution, problem: &Problem) -> f64 {
        self.weights.cost(solution, problem)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()
    }
}

/// Weighted-sum evaluator that shifts focus between legality and
/// compactness.
///
/// After every generation the generation best's intersection count is
/// pushed into a ring buffer of the last `buffer_size` generations. When
/// more than half of the slots hold zero, length and segment weights are
/// restored and the intersection weight doubles, up to
/// [`MAX_INTERSECTION_ESCALATION`] times its base value. Otherwise length and
/// segment weights drop to zero so the search only resolves crossings and
/// board violations. Slots that were never written count as non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicEvaluator {
    base: FitnessWeights,
    current: FitnessWeights,
    history: Vec<Option<usize>>,
    cursor: usize,
}

impl Default for DynamicEvaluator {
    fn default() -> Self {
        Self::new(FitnessWeights::default(), 50)
    }
}

impl DynamicEvaluator {
    /// Creates an evaluator remembering `buffer_size` generations.
    pub fn new(weights: FitnessWeights, buffer_size: usize) -> Self {
        Self {
            base: weights,
            current: weights,
            history: vec![None; buffer_size],
            cursor: 0,
        }
    }

    /// Weights used for the next evaluation.
    pub fn current_weights(&self) -> &FitnessWeights {
        &self.current
    }

    /// Number of generations remembered.
    pub fn buffer_size(&self) -> usize {
        self.history.len()
    }

    fn record(&mut self, intersections: usize) {
        if self.history.is_empty() {
            return;
        }
        self.history[self.cursor] = Some(intersections);
        self.cursor = (self.cursor + 1) % self.history.len();
    }

    fn mostly_legal(&self) -> bool {
        let zeros = self.history.iter().filter(|slot| **slot == Some(0)).count();
        zeros * 2 > self.history.len()
    }
}

impl FitnessEvaluator for DynamicEvaluator {
    fn evaluate(&self, solution: &Solution, problem: &Problem) -> f64 {
        self.current.cost(solution, problem)
    }

    fn observe_generation(&mut self, generation_best: &Solution, _problem: &Problem) {
        self.record(generation_best.intersections());

        if self.mostly_legal() {
            self.current.total_length = self.base.total_length;
            self.current.segment_count = self.base.segment_count;
            let ceiling = self.base.intersection * MAX_INTERSECTION_ESCALATION;
            self.current.intersection = (self.current.intersection * 2.0).min(ceiling);
        } else {
            self.current.total_length = 0.0;
            self.current.segment_count = 0.0;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history.is_empty() {
            return Err(ConfigError::ZeroBufferSize);
        }
        self.base.validate()
    }
}
