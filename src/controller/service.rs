use crate::clock::Clock;
use crate::controller::events::{EventsHandle, PlaybackEvent};
use crate::controller::ControllerConfig;
use crate::progress::{play_segments, resume_from, SnapshotResult};
use crate::snapshot::{Snapshot, ToggleState};
use crate::timeline::Sequence;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Commands sent to the controller task.
#[derive(Debug, Clone)]
enum ControllerCommand {
    Toggle,
}

/// Handle for driving the controller: send toggle edges, subscribe to
/// emitted snapshots. Cloneable; all clones feed the same control loop.
#[derive(Clone)]
pub struct ControllerHandle {
    command_tx: mpsc::UnboundedSender<ControllerCommand>,
    events: EventsHandle,
}

impl ControllerHandle {
    /// One payload-less toggle edge: pause if running, run if paused.
    ///
    /// Edges are queued on the controller's command channel, so an edge
    /// arriving mid-transition is processed after it, never concurrently
    /// with it and never dropped.
    pub fn toggle(&self) {
        let _ = self.command_tx.send(ControllerCommand::Toggle);
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        self.events.subscribe_all()
    }
}

type SnapshotStream = BoxStream<'static, SnapshotResult>;

/// The playback state machine.
///
/// Consumes toggle edges, retains the latest snapshot between them, and
/// keeps at most one progress stream alive at any instant. The retained
/// snapshot is the only state carried across pause/resume boundaries.
pub struct PlaybackController {
    sequence: Sequence,
    clock: Arc<dyn Clock>,
    config: ControllerConfig,
    command_rx: mpsc::UnboundedReceiver<ControllerCommand>,
    event_tx: mpsc::UnboundedSender<PlaybackEvent>,
    toggle: ToggleState,
    retained: Snapshot,
    active: Option<SnapshotStream>,
}

impl PlaybackController {
    /// Spawn the control task and return its handle.
    ///
    /// Must be called from within a tokio runtime. The task exits when
    /// every handle clone has been dropped.
    pub fn start(
        sequence: Sequence,
        clock: Arc<dyn Clock>,
        config: ControllerConfig,
    ) -> ControllerHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let events = EventsHandle::new(event_rx);
        let handle = ControllerHandle { command_tx, events };

        let retained = Snapshot::initial(&sequence);
        let controller = PlaybackController {
            sequence,
            clock,
            config,
            command_rx,
            event_tx,
            toggle: ToggleState::default(),
            retained,
            active: None,
        };
        tokio::spawn(controller.run());

        handle
    }

    async fn run(mut self) {
        info!("Playback controller started for sequence {}", self.sequence.id());

        loop {
            tokio::select! {
                // Edges win over ticks: a branch is cancelled before its
                // next tick can be observed.
                biased;

                command = self.command_rx.recv() => match command {
                    Some(ControllerCommand::Toggle) => self.on_toggle(),
                    None => break,
                },

                step = next_step(self.active.as_mut()), if self.active.is_some() => {
                    self.on_step(step);
                }
            }
        }

        info!("Playback controller stopped");
    }

    /// One toggle edge: cancel whatever is live, flip the fold, then
    /// either classify-and-hold (pause) or start the branch the retained
    /// snapshot calls for (fresh run vs resume).
    fn on_toggle(&mut self) {
        // Cancellation is ownership: dropping the stream drops its clock
        // subscription with it, so no late tick can land after this point.
        self.active = None;
        self.toggle = self.toggle.flipped();

        match self.toggle {
            ToggleState::Paused => {
                let classified = self.retained.to_completion(&self.sequence);
                info!(
                    "Paused at segment {} progress {:.3}",
                    classified.segment_id, classified.progress
                );
                self.retained = classified.clone();
                let _ = self.event_tx.send(PlaybackEvent::Snapshot(classified));
            }
            ToggleState::Running => {
                let branch: SnapshotStream = if self.retained.is_initial(&self.sequence) {
                    info!("Starting sequence {} from the beginning", self.sequence.id());
                    play_segments(self.clock.clone(), self.sequence.segments().to_vec()).boxed()
                } else {
                    info!(
                        "Resuming segment {} from progress {:.3}",
                        self.retained.segment_id, self.retained.progress
                    );
                    resume_from(
                        self.clock.clone(),
                        self.retained.clone(),
                        &self.sequence,
                        self.config.resume_policy,
                    )
                };
                self.active = Some(branch);
            }
        }
    }

    /// One item from the active branch.
    fn on_step(&mut self, step: Option<SnapshotResult>) {
        match step {
            Some(Ok(snapshot)) => {
                let snapshot = snapshot.to_completion(&self.sequence);
                self.retained = snapshot.clone();
                let _ = self.event_tx.send(PlaybackEvent::Snapshot(snapshot));
            }
            Some(Err(fault)) => {
                error!("Progress stream failed: {}", fault);
                self.active = None;
                let _ = self.event_tx.send(PlaybackEvent::Fault(fault));
            }
            // The branch ran to its natural end; idle until the next edge.
            None => {
                self.active = None;
            }
        }
    }
}

/// Next item of the active branch. The `None` arm never resolves; the
/// select guard keeps it from being polled at all.
async fn next_step(active: Option<&mut SnapshotStream>) -> Option<SnapshotResult> {
    match active {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
