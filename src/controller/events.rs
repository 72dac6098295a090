use crate::progress::PlaybackError;
use crate::snapshot::Snapshot;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::sync::mpsc;
use tracing::debug;

/// What the controller publishes to its subscribers.
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// A new retained snapshot: a progress tick, a pause classification,
    /// or a terminal emission.
    Snapshot(Snapshot),
    /// The active branch failed; playback is idle at the last retained
    /// snapshot until the next toggle edge.
    Fault(PlaybackError),
}

type SubscriptionId = u64;

/// Fan-out of controller events to any number of render sinks.
///
/// Each subscription is a plain unbounded receiver; a subscription whose
/// receiver was dropped is pruned on the next dispatch.
#[derive(Clone)]
pub struct EventsHandle {
    subscriptions: Arc<Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<PlaybackEvent>>>>,
    next_id: Arc<AtomicU64>,
}

impl EventsHandle {
    /// Spawn the dispatch task draining `event_rx` into all subscribers.
    pub(crate) fn new(mut event_rx: mpsc::UnboundedReceiver<PlaybackEvent>) -> Self {
        let subscriptions: Arc<Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<PlaybackEvent>>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let dispatch_subscriptions = subscriptions.clone();

        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                let mut subs = dispatch_subscriptions.lock().unwrap();
                let mut dropped = Vec::new();

                for (id, tx) in subs.iter() {
                    // If send fails, the receiver was dropped - mark for removal
                    if tx.send(event.clone()).is_err() {
                        dropped.push(*id);
                    }
                }

                for id in dropped {
                    subs.remove(&id);
                }
            }
            debug!("Controller event channel closed, dispatch exiting");
        });

        Self {
            subscriptions,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Subscribe to every event emitted from now on.
    ///
    /// The subscription is removed automatically once the receiver is
    /// dropped.
    pub fn subscribe_all(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscriptions.lock().unwrap().insert(id, tx);
        rx
    }
}
