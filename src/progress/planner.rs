use crate::clock::Clock;
use crate::easing::Easing;
use crate::progress::interpolate::tween;
use crate::progress::sequencer::play_segments;
use crate::progress::{PlaybackError, SnapshotResult};
use crate::snapshot::Snapshot;
use crate::timeline::{Segment, Sequence};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

/// What a resume does when the captured snapshot's segment id is no
/// longer in the sequence (e.g. the sequence changed between pause and
/// resume).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumePolicy {
    /// Finish the captured in-flight tween and end; there is nothing
    /// left to play into.
    #[default]
    FinishInterrupted,
    /// Fail the branch with [`PlaybackError::UnknownSegment`].
    RejectUnknown,
}

/// Segments strictly after the one the snapshot was captured in.
///
/// None of them has started, so each re-enters at progress 0. An id that
/// is not in the list yields an empty slice.
pub fn remaining_segments<'a>(last: &Snapshot, all: &'a [Segment]) -> &'a [Segment] {
    match all.iter().position(|segment| segment.id == last.segment_id) {
        Some(index) => &all[index + 1..],
        None => &[],
    }
}

/// Reconstruct a full forward-progress stream from one captured snapshot.
///
/// The first leg tweens the interrupted segment from its captured
/// progress to 1 over its remaining time, under the same segment id —
/// the segment is finished in place, never restarted. The remaining
/// segments then play out in order. Nothing beyond the snapshot and the
/// static sequence is needed; no tick history is kept anywhere.
pub fn resume_from(
    clock: Arc<dyn Clock>,
    last: Snapshot,
    sequence: &Sequence,
    policy: ResumePolicy,
) -> BoxStream<'static, SnapshotResult> {
    if sequence.position_of(&last.segment_id).is_none()
        && policy == ResumePolicy::RejectUnknown
    {
        let unknown = PlaybackError::UnknownSegment(last.segment_id);
        return stream::once(async move { Err(unknown) }).boxed();
    }

    let tail = remaining_segments(&last, sequence.segments()).to_vec();
    let remaining = last.duration.mul_f64((1.0 - last.progress).clamp(0.0, 1.0));
    let frames = if remaining.is_zero() {
        stream::empty().boxed()
    } else {
        clock.frames()
    };
    let finish = tween(frames, last.progress, 1.0, remaining, Easing::Identity)
        .map(move |step| step.map(|progress| last.with_progress(progress)));
    finish.chain(play_segments(clock, tail)).boxed()
}
