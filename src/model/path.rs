//! Segment chains between two fixed pins.

use super::geometry::Point;
use super::segment::Segment;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a segment chain is not in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathDefect {
    #[error("first segment starts at {found:?}, path starts at {expected:?}")]
    DetachedStart { expected: Point, found: Point },

    #[error("segment {index} starts at {found:?}, previous segment ends at {expected:?}")]
    Gap {
        index: usize,
        expected: Point,
        found: Point,
    },

    #[error("last segment ends at {found:?}, path ends at {expected:?}")]
    DetachedEnd { expected: Point, found: Point },

    #[error("segments {index} and {} share a direction", index + 1)]
    Collinear { index: usize },

    #[error("segment {index} has zero length")]
    ZeroLength { index: usize },
}

/// An ordered chain of segments connecting a fixed start pin to a fixed
/// end pin.
///
/// The pins never change after construction. Operators edit the segment
/// list and must leave it canonical (see [`Path::validate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    start: Point,
    end: Point,
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path with no segments.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            segments: Vec::new(),
        }
    }

    /// Creates a path from an existing segment list.
    ///
    /// The list is taken as-is; call [`validate`](Self::validate) to check it.
    pub fn with_segments(start: Point, end: Point, segments: Vec<Segment>) -> Self {
        Self {
            start,
            end,
            segments,
        }
    }

    /// Start pin.
    pub fn start(&self) -> Point {
        self.start
    }

    /// End pin.
    pub fn end(&self) -> Point {
        self.end
    }

    /// The segment chain.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access to the segment chain.
    pub fn segments_mut(&mut self) -> &mut Vec<Segment> {
        &mut self.segments
    }

    /// Replaces the segment chain.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    /// Takes the segment chain out, leaving the path empty.
    pub fn take_segments(&mut self) -> Vec<Segment> {
        std::mem::take(&mut self.segments)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of segment lengths.
    pub fn total_length(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.length)).sum()
    }

    /// Checks canonical form: the chain starts at the start pin, each
    /// segment starts where the previous one ends, the chain ends at the
    /// end pin, no two neighbours share a direction and no segment has
    /// zero length.
    ///
    /// An empty chain is canonical only when both pins coincide.
    pub fn validate(&self) -> Result<(), PathDefect> {
        let mut cursor = self.start;
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.length == 0 {
                return Err(PathDefect::ZeroLength { index });
            }
            if segment.start != cursor {
                return Err(if index == 0 {
                    PathDefect::DetachedStart {
                        expected: self.start,
                        found: segment.start,
                    }
                } else {
                    PathDefect::Gap {
                        index,
                        expected: cursor,
                        found: segment.start,
                    }
                });
            }
            if index > 0 && self.segments[index - 1].direction == segment.direction {
                return Err(PathDefect::Collinear { index: index - 1 });
            }
            cursor = segment.end();
        }
        if cursor != self.end {
            return Err(PathDefect::DetachedEnd {
                expected: self.end,
                found: cursor,
            });
        }
        Ok(())
    }

    /// Shorthand for `validate().is_ok()`.
    pub fn is_canonical(&self) -> bool {
        self.validate().is_ok()
    }

    /// Projects the path onto an ordered point list: every segment's start
    /// point followed by the end pin.
    pub fn point_list(&self) -> Vec<Point> {
        self.segments
            .iter()
            .map(|s| s.start)
            .chain(std::iter::once(self.end))
            .collect()
    }
}
