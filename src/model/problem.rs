//! Routing problem definition and its text loader.
//!
//! The text format is one `width;height` header line followed by one
//! `x1;y1;x2;y2` line per pin pair. Blank lines are ignored.

use super::geometry::Point;
use crate::error::ProblemError;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(start, end)` pin pair that one path must connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinPair {
    pub start: Point,
    pub end: Point,
}

impl PinPair {
    /// Creates a pin pair.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Board dimensions plus the ordered pin pairs to connect.
///
/// Immutable once built. The playable area is `[0, width) x [0, height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Problem {
    width: i32,
    height: i32,
    pairs: Vec<PinPair>,
}

impl Problem {
    /// Creates a problem.
    ///
    /// # Errors
    /// Returns [`ProblemError::InvalidBoard`] for non-positive dimensions and
    /// [`ProblemError::NoPairs`] when `pairs` is empty.
    pub fn new(width: i32, height: i32, pairs: Vec<PinPair>) -> Result<Self, ProblemError> {
        if width <= 0 || height <= 0 {
            return Err(ProblemError::InvalidBoard { width, height });
        }
        if pairs.is_empty() {
            return Err(ProblemError::NoPairs);
        }
        Ok(Self {
            width,
            height,
            pairs,
        })
    }

    /// Board width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pin pairs, in path order.
    pub fn pairs(&self) -> &[PinPair] {
        &self.pairs
    }

    /// Whether `p` lies outside `[0, width) x [0, height)`.
    pub fn is_point_outside(&self, p: Point) -> bool {
        p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height
    }

    /// Parses the `width;height` / `x1;y1;x2;y2` text format.
    ///
    /// # Errors
    /// Returns a [`ProblemError`] describing the first malformed line.
    pub fn parse(input: &str) -> Result<Self, ProblemError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(ProblemError::MissingHeader)?;
        let dims = parse_numbers(header)
            .filter(|d| d.len() == 2)
            .ok_or_else(|| ProblemError::MalformedHeader(header.to_string()))?;

        let pairs = lines
            .map(|(line, content)| match parse_numbers(content).as_deref() {
                Some(&[x1, y1, x2, y2]) => {
                    Ok(PinPair::new(Point::new(x1, y1), Point::new(x2, y2)))
                }
                _ => Err(ProblemError::MalformedPair {
                    line,
                    content: content.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(dims[0], dims[1], pairs)
    }

    /// Reads and parses a problem file.
    ///
    /// # Errors
    /// Propagates I/O failures and every [`parse`](Self::parse) error.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ProblemError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

impl FromStr for Problem {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_numbers(line: &str) -> Option<Vec<i32>> {
    line.split(';')
        .map(|n| n.trim().parse::<i32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Problem {
        Problem::new(
            6,
            6,
            vec![
                PinPair::new(Point::new(1, 3), Point::new(5, 3)),
                PinPair::new(Point::new(3, 1), Point::new(3, 3)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_point_outside() {
        let problem = board();
        let cases = [
            ((0, 0), false),
            ((-1, -1), true),
            ((3, 4), false),
            ((6, 0), true),
            ((6, 6), true),
            ((0, 6), true),
            ((3, 10), true),
            ((-1, 10), true),
            ((-1, 0), true),
            ((0, -1), true),
            ((6, -1), true),
            ((6, 7), true),
            ((5, 5), false),
        ];
        for ((x, y), expected) in cases {
            assert_eq!(
                problem.is_point_outside(Point::new(x, y)),
                expected,
                "point ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_parse() {
        let problem = Problem::parse("6;6\n1;3;5;3\n\n3;1;3;3\n").unwrap();
        assert_eq!(problem, board());
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert!(matches!(
            Problem::parse("6;x\n1;3;5;3"),
            Err(ProblemError::MalformedHeader(_))
        ));
        assert!(matches!(Problem::parse(""), Err(ProblemError::MissingHeader)));
    }

    #[test]
    fn test_parse_reports_line_number() {
        match Problem::parse("6;6\n1;3;5;3\n3;1;3") {
            Err(ProblemError::MalformedPair { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedPair, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_degenerate_problems() {
        assert!(matches!(
            Problem::new(0, 5, vec![PinPair::new(Point::new(0, 0), Point::new(1, 1))]),
            Err(ProblemError::InvalidBoard { .. })
        ));
        assert!(matches!(Problem::new(4, 4, vec![]), Err(ProblemError::NoPairs)));
        assert!(matches!(Problem::parse("4;4\n"), Err(ProblemError::NoPairs)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("board.txt");
        std::fs::write(&file, "6;6\n1;3;5;3\n3;1;3;3\n").unwrap();
        assert_eq!(Problem::from_file(&file).unwrap(), board());
        assert!(matches!(
            Problem::from_file(dir.path().join("missing.txt")),
            Err(ProblemError::Io(_))
        ));
    }
}
