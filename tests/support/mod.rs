use futures::StreamExt;
use playhead::{Clock, FrameStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Frame source driven explicitly by the test.
///
/// Every subscription is backed by a channel; `tick_ms` delivers one
/// frame (elapsed since that subscription) to the newest one, which is
/// always the single active stream. Subscriptions belonging to cancelled
/// branches are dead channels, so a tick aimed at them goes nowhere -
/// exactly what total cancellation promises.
pub struct ManualClock {
    senders: Mutex<Vec<mpsc::UnboundedSender<Duration>>>,
    opened: AtomicUsize,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            senders: Mutex::new(Vec::new()),
            opened: AtomicUsize::new(0),
        })
    }

    /// Total number of subscriptions ever opened.
    pub fn subscriptions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Deliver one frame to the newest subscription.
    pub fn tick_ms(&self, elapsed_ms: u64) {
        if let Some(tx) = self.senders.lock().unwrap().last() {
            let _ = tx.send(Duration::from_millis(elapsed_ms));
        }
    }

    /// End the newest subscription the way a dying frame source would.
    pub fn stall(&self) {
        self.senders.lock().unwrap().pop();
    }

    /// Yield until `count` subscriptions have been opened in total.
    pub async fn wait_for_subscriptions(&self, count: usize) {
        for _ in 0..10_000 {
            if self.subscriptions_opened() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!(
            "never saw subscription #{count}; {} opened",
            self.subscriptions_opened()
        );
    }
}

impl Clock for ManualClock {
    fn frames(&self) -> FrameStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().unwrap().push(tx);
        self.opened.fetch_add(1, Ordering::SeqCst);
        UnboundedReceiverStream::new(rx).boxed()
    }
}
