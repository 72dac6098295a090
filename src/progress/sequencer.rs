use crate::clock::Clock;
use crate::easing::Easing;
use crate::progress::{interpolate, SnapshotResult};
use crate::snapshot::Snapshot;
use crate::timeline::Segment;
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;

/// Play a list of segments front-to-back as one continuous snapshot
/// stream.
///
/// Each segment gets a fresh clock subscription, interpolated to full
/// progress and tagged with that segment's id and duration. The next
/// subscription is not opened until the previous segment's stream has
/// emitted its terminal snapshot and ended, so emissions never interleave
/// across segments. An empty list yields an empty stream.
pub fn play_segments(
    clock: Arc<dyn Clock>,
    segments: Vec<Segment>,
) -> impl Stream<Item = SnapshotResult> + Send {
    stream::iter(segments).flat_map(move |segment| {
        // An instant segment needs no clock; don't open a subscription for it.
        let frames = if segment.duration.is_zero() {
            stream::empty().boxed()
        } else {
            clock.frames()
        };
        interpolate(frames, segment.duration, Easing::Identity)
            .map(move |step| step.map(|progress| Snapshot::running(&segment, progress)))
    })
}
