use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// A fresh, unbounded elapsed-time subscription.
pub type FrameStream = BoxStream<'static, Duration>;

/// Source of per-frame elapsed-time ticks.
///
/// Every call to [`Clock::frames`] opens a fresh subscription whose items
/// are the total time elapsed since that subscription, monotonically
/// increasing, one per frame, unbounded. Dropping the returned stream
/// cancels the subscription completely; nothing keeps ticking behind it.
pub trait Clock: Send + Sync {
    fn frames(&self) -> FrameStream;
}

/// Production clock ticking at a fixed frame period.
///
/// Subscriptions must be polled from within a tokio runtime. Elapsed time
/// is measured with `tokio::time::Instant`, so tests running under a
/// paused runtime clock see deterministic frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
}

impl FrameClock {
    /// Roughly 60 frames per second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(16);

    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl Clock for FrameClock {
    fn frames(&self) -> FrameStream {
        let mut interval = tokio::time::interval(self.period);
        // Frame semantics: a late frame is skipped, not replayed in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let start = tokio::time::Instant::now();
        IntervalStream::new(interval)
            .map(move |tick| tick.duration_since(start))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn test_frames_report_elapsed_time_since_subscription() {
        let clock = FrameClock::new(Duration::from_millis(10));
        let mut frames = clock.frames();

        let first = frames.next().await.unwrap();
        assert!(first.is_zero());

        let second = frames.next().await.unwrap();
        let third = frames.next().await.unwrap();
        assert_eq!(second, Duration::from_millis(10));
        assert_eq!(third, Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_subscription_starts_from_zero() {
        let clock = FrameClock::new(Duration::from_millis(10));

        let mut first_sub = clock.frames();
        first_sub.next().await.unwrap();
        first_sub.next().await.unwrap();
        drop(first_sub);

        let mut second_sub = clock.frames();
        assert!(second_sub.next().await.unwrap().is_zero());
    }
}
