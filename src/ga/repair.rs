//! Canonicalization of segment chains.
//!
//! The repair pass reconnects a chain whose links were broken by an edit
//! and then folds neighbouring same-direction segments into one. Every
//! operator that splices foreign segments into a path finishes with it.

use crate::model::{Axis, Path, Point, Segment};

/// Straight connection from `from` to `to`: one horizontal segment, then
/// one vertical segment, each omitted when its displacement is zero.
pub fn connect(from: Point, to: Point) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(2);
    let mut cursor = from;
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let distance = cursor.along(axis).abs_diff(to.along(axis));
        if distance == 0 {
            continue;
        }
        let segment = Segment::new(cursor, axis.toward(cursor, to), distance);
        cursor = segment.end();
        segments.push(segment);
    }
    segments
}

/// Folds every run of consecutive same-direction segments into a single
/// segment starting where the run starts.
pub fn merge_collinear(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.direction == segment.direction => last.length += segment.length,
            _ => merged.push(segment),
        }
    }
    merged
}

/// Reconnects and canonicalizes `path` in place.
///
/// Walks the chain from the start pin, inserting a [`connect`]ion wherever
/// the cursor and the next segment's start disagree (including before the
/// first and after the last segment), then merges collinear neighbours.
/// Zero-length segments are dropped on the way.
pub fn repair_path(path: &mut Path) {
    let start = path.start();
    let end = path.end();
    let original = path.take_segments();

    let mut chain = Vec::with_capacity(original.len() + 2);
    let mut cursor = start;
    for segment in original.into_iter().filter(|s| s.length > 0) {
        if segment.start != cursor {
            chain.extend(connect(cursor, segment.start));
        }
        cursor = segment.end();
        chain.push(segment);
    }
    if cursor != end {
        chain.extend(connect(cursor, end));
    }

    path.set_segments(merge_collinear(chain));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_connect_horizontal_first() {
        let segments = connect(p(1, 1), p(4, -2));
        assert_eq!(
            segments,
            vec![
                Segment::new(p(1, 1), Direction::Right, 3),
                Segment::new(p(4, 1), Direction::Up, 3),
            ]
        );
        assert_eq!(connect(p(2, 2), p(2, 5)).len(), 1);
        assert!(connect(p(2, 2), p(2, 2)).is_empty());
    }

    #[test]
    fn test_merge_collinear() {
        let merged = merge_collinear(vec![
            Segment::new(p(0, 0), Direction::Right, 1),
            Segment::new(p(1, 0), Direction::Right, 2),
            Segment::new(p(3, 0), Direction::Down, 1),
            Segment::new(p(3, 1), Direction::Down, 1),
            Segment::new(p(3, 2), Direction::Left, 1),
        ]);
        assert_eq!(
            merged,
            vec![
                Segment::new(p(0, 0), Direction::Right, 3),
                Segment::new(p(3, 0), Direction::Down, 2),
                Segment::new(p(3, 2), Direction::Left, 1),
            ]
        );
    }

    #[test]
    fn test_repair_fills_gaps_and_merges() {
        let mut path = Path::with_segments(
            p(0, 0),
            p(6, 4),
            vec![
                Segment::new(p(1, 0), Direction::Right, 2),
                Segment::new(p(3, 2), Direction::Down, 1),
            ],
        );
        repair_path(&mut path);
        assert!(path.is_canonical(), "{:?}", path.validate());
        assert_eq!(path.segments()[0], Segment::new(p(0, 0), Direction::Right, 3));
    }

    #[test]
    fn test_repair_empty_path_connects_pins() {
        let mut path = Path::new(p(0, 0), p(2, 3));
        repair_path(&mut path);
        assert!(path.is_canonical());
        assert_eq!(path.len(), 2);
    }
}
