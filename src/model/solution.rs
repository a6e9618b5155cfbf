//! A complete routing: one path per pin pair.

use super::geometry::{Axis, Point};
use super::path::Path;
use super::problem::Problem;
use super::segment::Segment;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segments leaving the board and how far they reach outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutsideBoardStats {
    /// Segments with at least one endpoint off the board.
    pub count: usize,
    /// Summed length of the off-board fragments of those segments.
    pub length: u64,
}

/// One path per pin pair of a [`Problem`], indexed identically.
///
/// All metrics are recomputed on every call; nothing is cached, so a
/// solution can be edited freely between evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    paths: Vec<Path>,
}

impl Solution {
    /// Creates a solution from its paths.
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// The paths.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Mutable access to the paths.
    pub fn paths_mut(&mut self) -> &mut [Path] {
        &mut self.paths
    }

    /// Replaces the path list.
    pub fn set_paths(&mut self, paths: Vec<Path>) {
        self.paths = paths;
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> u64 {
        self.paths.iter().map(Path::total_length).sum()
    }

    /// Number of segments across all paths.
    pub fn total_segment_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Number of extra visits to grid points.
    ///
    /// Every path is rasterised unit-step by unit-step; a path's first
    /// point is visited once and shared joints between consecutive
    /// segments are not double counted. The result is total visits minus
    /// distinct points visited.
    pub fn intersections(&self) -> usize {
        let mut visits: HashMap<Point, usize> = HashMap::new();
        let mut total = 0usize;
        for path in &self.paths {
            for (i, segment) in path.segments().iter().enumerate() {
                for point in segment.points(i > 0) {
                    *visits.entry(point).or_insert(0) += 1;
                    total += 1;
                }
            }
        }
        total - visits.len()
    }

    /// Counts segments with an endpoint off the board and sums the length
    /// of their off-board fragments.
    pub fn outside_board_stats(&self, problem: &Problem) -> OutsideBoardStats {
        self.paths
            .iter()
            .flat_map(|p| p.segments())
            .filter(|s| problem.is_point_outside(s.start) || problem.is_point_outside(s.end()))
            .fold(OutsideBoardStats::default(), |mut acc, s| {
                acc.count += 1;
                acc.length += u64::from(outside_fragment(s, problem));
                acc
            })
    }

    /// Projects every path onto its ordered point list.
    pub fn point_lists(&self) -> Vec<Vec<Point>> {
        self.paths.iter().map(Path::point_list).collect()
    }

    /// Whether every path is in canonical form.
    pub fn is_canonical(&self) -> bool {
        self.paths.iter().all(Path::is_canonical)
    }
}

/// Length of the part of `s` lying outside the board.
///
/// A segment whose fixed coordinate is off the board lies entirely
/// outside; otherwise the off-board part is whatever its span does not
/// share with `[0, dim - 1]` on its axis.
fn outside_fragment(s: &Segment, problem: &Problem) -> u32 {
    let axis = s.axis();
    let (fixed, fixed_dim, span_dim) = match axis {
        Axis::Horizontal => (s.start.y, problem.height(), problem.width()),
        Axis::Vertical => (s.start.x, problem.width(), problem.height()),
    };
    if fixed < 0 || fixed >= fixed_dim {
        return s.length;
    }
    let a = s.start.along(axis);
    let b = s.end().along(axis);
    let lo = a.min(b).max(0);
    let hi = a.max(b).min(span_dim - 1);
    let inside = u32::try_from(hi - lo).unwrap_or(0);
    s.length - inside.min(s.length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, PinPair};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn seg(x: i32, y: i32, d: Direction, len: u32) -> Segment {
        Segment::new(p(x, y), d, len)
    }

    fn problem() -> Problem {
        Problem::new(
            6,
            6,
            vec![
                PinPair::new(p(1, 3), p(5, 3)),
                PinPair::new(p(3, 1), p(3, 3)),
            ],
        )
        .unwrap()
    }

    fn overhanging_path() -> Path {
        Path::with_segments(
            p(1, 3),
            p(5, 3),
            vec![
                seg(1, 3, Direction::Down, 1),
                seg(1, 4, Direction::Right, 5),
                seg(6, 4, Direction::Up, 1),
                seg(6, 3, Direction::Left, 1),
            ],
        )
    }

    #[test]
    fn test_no_intersections() {
        let solution = Solution::new(vec![
            Path::with_segments(
                p(1, 3),
                p(5, 3),
                vec![
                    seg(1, 3, Direction::Down, 1),
                    seg(1, 4, Direction::Right, 4),
                    seg(5, 4, Direction::Up, 1),
                ],
            ),
            Path::with_segments(p(3, 1), p(3, 3), vec![seg(3, 1, Direction::Down, 2)]),
        ]);
        assert_eq!(solution.intersections(), 0);
        assert_eq!(solution.total_length(), 8);
        assert_eq!(solution.total_segment_count(), 4);
    }

    #[test]
    fn test_two_intersections() {
        let solution = Solution::new(vec![
            Path::with_segments(p(1, 3), p(5, 3), vec![seg(1, 3, Direction::Right, 4)]),
            Path::with_segments(
                p(3, 1),
                p(3, 3),
                vec![
                    seg(3, 1, Direction::Left, 1),
                    seg(2, 1, Direction::Down, 3),
                    seg(2, 4, Direction::Right, 1),
                    seg(3, 4, Direction::Up, 1),
                ],
            ),
        ]);
        assert_eq!(solution.intersections(), 2);
    }

    #[test]
    fn test_self_overlap_counts() {
        // Right 3 then back Left 2 revisits (2,0) and (1,0).
        let solution = Solution::new(vec![Path::with_segments(
            p(0, 0),
            p(1, 0),
            vec![seg(0, 0, Direction::Right, 3), seg(3, 0, Direction::Left, 2)],
        )]);
        assert_eq!(solution.intersections(), 2);
    }

    #[test]
    fn test_outside_board_stats() {
        let solution = Solution::new(vec![overhanging_path()]);
        let stats = solution.outside_board_stats(&problem());
        assert_eq!(stats.count, 3);
        assert_eq!(stats.length, 3);
    }

    #[test]
    fn test_inside_board_has_no_outside_stats() {
        let solution = Solution::new(vec![Path::with_segments(
            p(0, 0),
            p(5, 5),
            vec![seg(0, 0, Direction::Right, 5), seg(5, 0, Direction::Down, 5)],
        )]);
        assert_eq!(
            solution.outside_board_stats(&problem()),
            OutsideBoardStats::default()
        );
    }

    #[test]
    fn test_fragment_of_segment_spanning_board() {
        let problem = problem();
        // From x=-2 to x=8 on row 2: 10 long, 5 of it over the board.
        let s = seg(-2, 2, Direction::Right, 10);
        assert_eq!(outside_fragment(&s, &problem), 5);
        // Entirely off-board row.
        let s = seg(0, -1, Direction::Right, 3);
        assert_eq!(outside_fragment(&s, &problem), 3);
        // Entirely off-board to the left on a valid row.
        let s = seg(-1, 2, Direction::Left, 2);
        assert_eq!(outside_fragment(&s, &problem), 2);
    }

    #[test]
    fn test_point_lists() {
        let solution = Solution::new(vec![overhanging_path()]);
        assert_eq!(
            solution.point_lists(),
            vec![vec![p(1, 3), p(1, 4), p(6, 4), p(6, 3), p(5, 3)]]
        );
    }
}
