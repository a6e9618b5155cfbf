//! Axis-aligned straight runs.

use super::geometry::{Axis, Direction, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One straight, axis-aligned run of a [`Path`](super::Path).
///
/// The end point is derived from `start`, `direction` and `length`, so
/// moving `start` moves the whole segment. A segment inside a canonical
/// path always has `length >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub start: Point,
    pub direction: Direction,
    pub length: u32,
}

impl Segment {
    /// Creates a segment.
    pub const fn new(start: Point, direction: Direction, length: u32) -> Self {
        Self {
            start,
            direction,
            length,
        }
    }

    /// Derived end point: `start + unit(direction) * length`.
    pub fn end(&self) -> Point {
        self.start.step(self.direction, self.length)
    }

    /// General direction of the segment.
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// Whether `point` lies on the segment, endpoints included.
    pub fn contains(&self, point: Point) -> bool {
        let end = self.end();
        match self.axis() {
            Axis::Horizontal => {
                point.y == self.start.y
                    && point.x >= self.start.x.min(end.x)
                    && point.x <= self.start.x.max(end.x)
            }
            Axis::Vertical => {
                point.x == self.start.x
                    && point.y >= self.start.y.min(end.y)
                    && point.y <= self.start.y.max(end.y)
            }
        }
    }

    /// Grid points visited by the segment, from `start` (when `skip_start`
    /// is false) through `end` inclusive.
    pub fn points(&self, skip_start: bool) -> impl Iterator<Item = Point> + '_ {
        let first = u32::from(skip_start);
        (first..=self.length).map(move |i| self.start.step(self.direction, i))
    }
}
