use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors rejected when assembling a sequence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("duplicate segment id: {0}")]
    DuplicateSegmentId(String),
    #[error("segment id must not be blank")]
    BlankSegmentId,
}

/// One timed unit of playback.
///
/// Negative durations are unrepresentable here; zero durations are valid
/// and play as an instant segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub duration: Duration,
}

impl Segment {
    pub fn new(id: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}

/// Ordered, immutable list of segments played front-to-back.
///
/// Ordering is meaningful: it defines play order and what "remaining
/// segments" means after an interruption. Segment ids must be unique
/// within a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    id: String,
    segments: Vec<Segment>,
}

impl Sequence {
    /// Build a sequence, rejecting blank or duplicate segment ids.
    pub fn new(id: impl Into<String>, segments: Vec<Segment>) -> Result<Self, SequenceError> {
        let mut seen = HashSet::new();
        for segment in &segments {
            if segment.id.trim().is_empty() {
                return Err(SequenceError::BlankSegmentId);
            }
            if !seen.insert(segment.id.as_str()) {
                return Err(SequenceError::DuplicateSegmentId(segment.id.clone()));
            }
        }
        Ok(Self {
            id: id.into(),
            segments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Index of the segment with the given id, if present.
    pub fn position_of(&self, segment_id: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.id == segment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: &str, ms: u64) -> Segment {
        Segment::new(id, Duration::from_millis(ms))
    }

    #[test]
    fn test_sequence_accepts_ordered_unique_segments() {
        let sequence =
            Sequence::new("season 1", vec![seg("e1", 2000), seg("e2", 2000), seg("e3", 2000)])
                .unwrap();

        assert_eq!(sequence.id(), "season 1");
        assert_eq!(sequence.segments().len(), 3);
        assert_eq!(sequence.first_segment().unwrap().id, "e1");
        assert_eq!(sequence.last_segment().unwrap().id, "e3");
        assert_eq!(sequence.position_of("e2"), Some(1));
        assert_eq!(sequence.position_of("e9"), None);
    }

    #[test]
    fn test_sequence_rejects_duplicate_ids() {
        let result = Sequence::new("s", vec![seg("e1", 100), seg("e1", 200)]);
        assert_eq!(
            result.unwrap_err(),
            SequenceError::DuplicateSegmentId("e1".to_string())
        );
    }

    #[test]
    fn test_sequence_rejects_blank_ids() {
        let result = Sequence::new("s", vec![seg("  ", 100)]);
        assert_eq!(result.unwrap_err(), SequenceError::BlankSegmentId);
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let sequence = Sequence::new("empty", vec![]).unwrap();
        assert!(sequence.first_segment().is_none());
        assert!(sequence.last_segment().is_none());
    }

    #[test]
    fn test_zero_duration_segment_is_valid() {
        let sequence = Sequence::new("s", vec![seg("instant", 0)]).unwrap();
        assert!(sequence.segments()[0].duration.is_zero());
    }
}
