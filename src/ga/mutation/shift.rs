//! Perpendicular segment shift with neighbour repair.
//!
//! The mutated segment's start point moves by `shift` cells in a direction
//! perpendicular to the segment. Its end point is derived, so the whole
//! segment moves. The trailing and following neighbours are then adjusted
//! so the chain stays connected:
//!
//! - a missing neighbour (path pin) gets a fresh connector of length `shift`
//! - a neighbour running opposite to the mutated segment gets a connector
//!   inserted between them
//! - otherwise the neighbour lies on the shift axis and its length changes
//!   by `shift`; a zero result removes it (merging the mutated segment with
//!   the segment beyond when they share a direction), a negative result
//!   flips it
//!
//! Edits happen on a scratch copy and are committed only when the result is
//! canonical.

use super::MutationOutcome;
use crate::model::{Direction, Path, Segment};
use rand::Rng;
use std::cmp::Ordering;

/// Shifts a random segment of `path` by `1..=max_shift` cells.
///
/// Skips when the path is empty or `max_shift` is zero.
pub(crate) fn shift_random_segment<R: Rng>(
    path: &mut Path,
    max_shift: u32,
    rng: &mut R,
) -> MutationOutcome {
    if path.is_empty() || max_shift == 0 {
        return MutationOutcome::Skipped;
    }
    let index = rng.random_range(0..path.len());
    let shift = rng.random_range(1..=max_shift);
    let axis = path.segments()[index].axis().perpendicular();
    let direction = axis.directions()[usize::from(rng.random_bool(0.5))];
    shift_segment(path, index, direction, shift)
}

/// Shifts segment `index` of `path` by `shift` cells toward `direction`.
///
/// `direction` must be perpendicular to the segment.
pub(crate) fn shift_segment(
    path: &mut Path,
    index: usize,
    direction: Direction,
    shift: u32,
) -> MutationOutcome {
    debug_assert_ne!(path.segments()[index].axis(), direction.axis());

    let mut segments = path.segments().to_vec();
    segments[index].start = segments[index].start.step(direction, shift);

    let index = repair_trailing(&mut segments, path, index, direction, shift);
    repair_following(&mut segments, index, direction, shift);

    super::commit(path, segments)
}

/// Reconnects the segment before `mutated`. Returns the mutated segment's
/// new index.
fn repair_trailing(
    segments: &mut Vec<Segment>,
    path: &Path,
    mut mutated: usize,
    direction: Direction,
    shift: u32,
) -> usize {
    if mutated == 0 {
        segments.insert(0, Segment::new(path.start(), direction, shift));
        return 1;
    }

    let mutated_direction = segments[mutated].direction;
    let prev = &mut segments[mutated - 1];

    if prev.direction == mutated_direction.opposite() {
        let connector = Segment::new(prev.end(), direction, shift);
        segments.insert(mutated, connector);
        return mutated + 1;
    }

    let delta = if prev.direction == direction {
        i64::from(shift)
    } else {
        -i64::from(shift)
    };
    let resized = i64::from(prev.length) + delta;

    match resized.cmp(&0) {
        Ordering::Greater => prev.length = resized.unsigned_abs() as u32,
        Ordering::Less => {
            prev.direction = prev.direction.opposite();
            prev.length = resized.unsigned_abs() as u32;
        }
        Ordering::Equal => {
            segments.remove(mutated - 1);
            mutated -= 1;
            if mutated > 0 && segments[mutated - 1].direction == segments[mutated].direction {
                let before = segments.remove(mutated - 1);
                mutated -= 1;
                let merged = &mut segments[mutated];
                merged.start = before.start;
                merged.length += before.length;
            }
        }
    }
    mutated
}

/// Reconnects the segment after `mutated`.
fn repair_following(segments: &mut Vec<Segment>, mutated: usize, direction: Direction, shift: u32) {
    let back = direction.opposite();
    let moved = segments[mutated];
    let moved_end = moved.end();
    let next_index = mutated + 1;

    if next_index == segments.len() {
        segments.push(Segment::new(moved_end, back, shift));
        return;
    }
    if segments[next_index].direction == moved.direction.opposite() {
        segments.insert(next_index, Segment::new(moved_end, back, shift));
        return;
    }

    let next = &mut segments[next_index];
    let delta = if next.direction == direction {
        -i64::from(shift)
    } else {
        i64::from(shift)
    };
    let resized = i64::from(next.length) + delta;

    match resized.cmp(&0) {
        Ordering::Greater => {
            next.start = moved_end;
            next.length = resized.unsigned_abs() as u32;
        }
        Ordering::Less => {
            next.start = moved_end;
            next.direction = next.direction.opposite();
            next.length = resized.unsigned_abs() as u32;
        }
        Ordering::Equal => {
            segments.remove(next_index);
            if next_index < segments.len() && segments[next_index].direction == moved.direction {
                let after = segments.remove(next_index);
                segments[mutated].length += after.length;
            }
        }
    }
}
