use crate::clock::FrameStream;
use crate::easing::Easing;
use crate::progress::PlaybackError;
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;

enum Leg {
    Ticking(FrameStream),
    Terminal,
    Done,
}

/// Drive a normalized progress ratio for one segment.
///
/// Emits `easing(elapsed / duration)` for every frame while the linear
/// ratio stays below 1, then exactly one terminal `easing(1.0)` and ends,
/// so every interpolation lands precisely on the boundary even when the
/// last frame overshoots it. The stream is finite and never repeats.
///
/// A zero duration emits the terminal immediately, without consuming the
/// frame source. A frame source that ends before the ratio reaches 1
/// surfaces as [`PlaybackError::ClockStalled`].
pub fn interpolate(
    frames: FrameStream,
    duration: Duration,
    easing: Easing,
) -> impl Stream<Item = Result<f64, PlaybackError>> + Send {
    let start = if duration.is_zero() {
        Leg::Terminal
    } else {
        Leg::Ticking(frames)
    };
    stream::unfold(start, move |leg| async move {
        match leg {
            Leg::Ticking(mut frames) => match frames.next().await {
                Some(elapsed) => {
                    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
                    if ratio < 1.0 {
                        Some((Ok(easing.apply(ratio)), Leg::Ticking(frames)))
                    } else {
                        Some((Ok(easing.apply(1.0)), Leg::Done))
                    }
                }
                None => Some((Err(PlaybackError::ClockStalled), Leg::Done)),
            },
            Leg::Terminal => Some((Ok(easing.apply(1.0)), Leg::Done)),
            Leg::Done => None,
        }
    })
}

/// Interpolate between two arbitrary values over a duration.
///
/// Scales the eased ratio into `[start, end]`. This is what continues a
/// partially-progressed segment: a tween from its captured progress to 1
/// over the remaining time.
pub fn tween(
    frames: FrameStream,
    start: f64,
    end: f64,
    duration: Duration,
    easing: Easing,
) -> impl Stream<Item = Result<f64, PlaybackError>> + Send {
    let delta = end - start;
    interpolate(frames, duration, easing).map(move |step| step.map(|ratio| start + ratio * delta))
}
