pub mod interpolate;
pub mod planner;
pub mod sequencer;

pub use interpolate::{interpolate, tween};
pub use planner::{remaining_segments, resume_from, ResumePolicy};
pub use sequencer::play_segments;

use thiserror::Error;

/// Failures raised while driving a progress stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The frame source ended before the active segment reached full
    /// progress. Progress must not freeze silently short of 1.
    #[error("frame clock ended before the active segment completed")]
    ClockStalled,
    /// A resume was requested for a segment id the sequence does not
    /// contain.
    #[error("segment {0:?} is not part of the sequence")]
    UnknownSegment(String),
}

/// Item type shared by every snapshot-producing stream.
pub type SnapshotResult = Result<crate::snapshot::Snapshot, PlaybackError>;
