//! Shift of a fragment cut out of a segment.
//!
//! A random sub-run of a random segment is cut out, shifted on its own as a
//! one-segment path (which always grows two connectors) and spliced back.
//! Opposite-running overlaps at both splice boundaries are collapsed, and
//! the repair pass restores canonical form.

use super::shift::shift_random_segment;
use super::MutationOutcome;
use crate::ga::repair::repair_path;
use crate::model::{Path, Segment};
use rand::Rng;
use std::cmp::Ordering;

pub(crate) fn split_shift<R: Rng>(path: &mut Path, max_shift: u32, rng: &mut R) -> MutationOutcome {
    if path.is_empty() || max_shift == 0 {
        return MutationOutcome::Skipped;
    }

    let index = rng.random_range(0..path.len());
    let segment = path.segments()[index];

    // Fragment of 1..=max(1, L-1) cells at a random offset.
    let fragment_length = rng.random_range(1..segment.length.max(2));
    let offset = rng.random_range(0..=segment.length - fragment_length);
    let fragment = Segment::new(
        segment.start.step(segment.direction, offset),
        segment.direction,
        fragment_length,
    );

    let mut isolated = Path::with_segments(fragment.start, fragment.end(), vec![fragment]);
    if shift_random_segment(&mut isolated, max_shift, rng) != MutationOutcome::Applied {
        return MutationOutcome::Abandoned;
    }

    let mut pieces = Vec::with_capacity(isolated.len() + 2);
    if offset > 0 {
        pieces.push(Segment::new(segment.start, segment.direction, offset));
    }
    pieces.extend(isolated.take_segments());
    let tail = segment.length - offset - fragment_length;
    if tail > 0 {
        pieces.push(Segment::new(fragment.end(), segment.direction, tail));
    }

    let mut segments = path.segments().to_vec();
    let spliced = pieces.len();
    segments.splice(index..=index, pieces);

    let (first, spliced) = collapse_left(&mut segments, index, spliced);
    collapse_right(&mut segments, first, spliced);

    let mut candidate = Path::with_segments(path.start(), path.end(), segments);
    repair_path(&mut candidate);
    super::commit(path, candidate.take_segments())
}

/// Collapses an opposite-running overlap between the spliced region
/// `[first, first + count)` and the segment before it. Returns the region's
/// new bounds.
fn collapse_left(segments: &mut Vec<Segment>, first: usize, count: usize) -> (usize, usize) {
    if first == 0 || count == 0 {
        return (first, count);
    }
    let head = segments[first];
    let prev = &mut segments[first - 1];
    if prev.direction != head.direction.opposite() {
        return (first, count);
    }

    match prev.length.cmp(&head.length) {
        Ordering::Greater => {
            prev.length -= head.length;
            segments.remove(first);
            (first, count - 1)
        }
        Ordering::Less => {
            prev.direction = head.direction;
            prev.length = head.length - prev.length;
            segments.remove(first);
            (first, count - 1)
        }
        Ordering::Equal => {
            segments.drain(first - 1..=first);
            (first - 1, count - 1)
        }
    }
}

/// Collapses an opposite-running overlap between the last spliced segment
/// and the segment after the region.
fn collapse_right(segments: &mut Vec<Segment>, first: usize, count: usize) {
    if count == 0 {
        return;
    }
    let last = first + count - 1;
    let next_index = last + 1;
    if next_index >= segments.len() {
        return;
    }
    let tail = segments[last];
    let next = &mut segments[next_index];
    if next.direction != tail.direction.opposite() {
        return;
    }

    match next.length.cmp(&tail.length) {
        Ordering::Greater => {
            next.length -= tail.length;
            next.start = tail.start;
            segments.remove(last);
        }
        Ordering::Less => {
            next.direction = tail.direction;
            next.length = tail.length - next.length;
            next.start = tail.start;
            segments.remove(last);
        }
        Ordering::Equal => {
            segments.drain(last..=next_index);
        }
    }
}
