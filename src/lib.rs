// Resumable sequential playback scheduling: clock-driven progress over an
// ordered list of timed segments, with pause/resume snapshots.

pub mod clock;
pub mod controller;
pub mod easing;
pub mod progress;
pub mod snapshot;
pub mod timeline;

pub use clock::{Clock, FrameClock, FrameStream};
pub use controller::{ControllerConfig, ControllerHandle, PlaybackController, PlaybackEvent};
pub use easing::Easing;
pub use progress::{PlaybackError, ResumePolicy};
pub use snapshot::{CompletionStatus, Snapshot, ToggleState};
pub use timeline::{Segment, Sequence, SequenceError};
