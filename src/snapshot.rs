use crate::timeline::{Segment, Sequence};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether the whole sequence has finished.
///
/// Only the final segment at full progress counts; an earlier segment at
/// progress 1 is merely done with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionStatus {
    Complete,
    NotComplete,
}

/// Point-in-time playback state.
///
/// This is the sole carrier of resumability: the controller retains the
/// latest snapshot between toggle edges, and a resume is reconstructed
/// from nothing but a snapshot and the static sequence. Snapshots are
/// replaced, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub segment_id: String,
    pub duration: Duration,
    /// Normalized completion ratio of the segment, in `[0, 1]`.
    pub progress: f64,
    pub completion: CompletionStatus,
}

impl Snapshot {
    /// Sentinel retained before any playback has started: first segment
    /// id, zero duration, zero progress.
    pub fn initial(sequence: &Sequence) -> Self {
        Self {
            segment_id: sequence
                .first_segment()
                .map(|s| s.id.clone())
                .unwrap_or_default(),
            duration: Duration::ZERO,
            progress: 0.0,
            completion: CompletionStatus::NotComplete,
        }
    }

    /// True when nothing has played yet, i.e. this is still the sentinel.
    pub fn is_initial(&self, sequence: &Sequence) -> bool {
        self.progress == 0.0
            && self.duration.is_zero()
            && sequence
                .first_segment()
                .map(|s| s.id.as_str())
                .unwrap_or_default()
                == self.segment_id
    }

    /// Snapshot of `segment` at the given progress, not yet classified.
    pub fn running(segment: &Segment, progress: f64) -> Self {
        Self {
            segment_id: segment.id.clone(),
            duration: segment.duration,
            progress,
            completion: CompletionStatus::NotComplete,
        }
    }

    /// Same segment at a new progress value. Completion is reset; it is
    /// reclassified against the sequence wherever the snapshot is retained.
    pub fn with_progress(&self, progress: f64) -> Self {
        Self {
            segment_id: self.segment_id.clone(),
            duration: self.duration,
            progress,
            completion: CompletionStatus::NotComplete,
        }
    }

    /// Classify completion: `Complete` iff this snapshot is the final
    /// segment of `sequence` at full progress. Pure; the rest of the
    /// snapshot is untouched.
    pub fn to_completion(&self, sequence: &Sequence) -> Self {
        let at_final_segment = sequence
            .last_segment()
            .map(|last| last.id == self.segment_id)
            .unwrap_or(false);
        let completion = if at_final_segment && self.progress >= 1.0 {
            CompletionStatus::Complete
        } else {
            CompletionStatus::NotComplete
        };
        Self {
            completion,
            ..self.clone()
        }
    }
}

/// Play/pause intent, derived purely from counting toggle edges.
///
/// The controller never stores a mutated flag: its toggle state is the
/// fold of [`ToggleState::flipped`] over every edge received, seeded with
/// the [`Default`] (paused) state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Paused,
    Running,
}

impl ToggleState {
    /// Step function of the edge fold: each edge flips the state.
    pub fn flipped(self) -> Self {
        match self {
            ToggleState::Paused => ToggleState::Running,
            ToggleState::Running => ToggleState::Paused,
        }
    }
}
