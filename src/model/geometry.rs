//! Grid points and orthogonal directions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer grid point.
///
/// The y axis grows downward: [`Direction::Down`] increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point `distance` unit steps away in `direction`.
    pub fn step(self, direction: Direction, distance: u32) -> Self {
        let (dx, dy) = direction.unit();
        let d = distance as i32;
        Self::new(self.x + dx * d, self.y + dy * d)
    }

    /// Manhattan distance between two points.
    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Coordinate along `axis`.
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Returns the point as an `[x, y]` pair.
    pub fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// General direction of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Direction along this axis that moves from `from` toward `to`.
    ///
    /// Ties resolve to the positive direction (`Right` / `Down`).
    pub fn toward(self, from: Point, to: Point) -> Direction {
        match self {
            Axis::Horizontal if to.x >= from.x => Direction::Right,
            Axis::Horizontal => Direction::Left,
            Axis::Vertical if to.y >= from.y => Direction::Down,
            Axis::Vertical => Direction::Up,
        }
    }

    /// The two directions on this axis, negative first.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }
}

/// One of the four orthogonal unit directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// General direction (axis) of this direction.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// The reverse direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step `(dx, dy)`.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_unit_vector() {
        let p = Point::new(2, 3);
        assert_eq!(p.step(Direction::Left, 2), Point::new(0, 3));
        assert_eq!(p.step(Direction::Right, 4), Point::new(6, 3));
        assert_eq!(p.step(Direction::Up, 3), Point::new(2, 0));
        assert_eq!(p.step(Direction::Down, 1), Point::new(2, 4));
        assert_eq!(p.step(Direction::Down, 0), p);
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.opposite().axis(), d.axis());
        }
    }

    #[test]
    fn test_toward() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 0);
        assert_eq!(Axis::Horizontal.toward(a, b), Direction::Right);
        assert_eq!(Axis::Vertical.toward(a, b), Direction::Up);
        assert_eq!(Axis::Horizontal.toward(b, a), Direction::Left);
        assert_eq!(Axis::Vertical.toward(b, a), Direction::Down);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Point::new(-1, 2).manhattan(Point::new(3, -2)), 8);
    }
}
