//! Replacement of a single segment by a freshly generated detour.

use super::MutationOutcome;
use crate::ga::repair::merge_collinear;
use crate::ga::types::PathInitializer;
use crate::model::Path;
use rand::Rng;

/// Replaces a random segment of `path` with a random sub-path between the
/// segment's endpoints.
pub(crate) fn replace_random_segment<I, R>(
    path: &mut Path,
    initializer: &I,
    rng: &mut R,
) -> MutationOutcome
where
    I: PathInitializer,
    R: Rng,
{
    if path.is_empty() {
        return MutationOutcome::Skipped;
    }

    let index = rng.random_range(0..path.len());
    let segment = path.segments()[index];
    let mut detour = initializer.generate_path(segment.start, segment.end(), rng);

    let mut segments = path.segments().to_vec();
    segments.splice(index..=index, detour.take_segments());

    super::commit(path, merge_collinear(segments))
}
