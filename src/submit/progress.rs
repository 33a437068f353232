//! Estimated progress for slow backend calls
//!
//! The backend exposes no progress channel, so progress is a time-based
//! estimate: a ticker task raises the value on a fixed interval, capped below
//! 100, while the real request runs as a separate future. When the request
//! settles the ticker is aborted and the value snaps to its final state.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::debug;

/// Receiver of progress updates
///
/// - CLI implementations draw a progress bar
/// - Tests record the values they see
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Called with the current estimate, in percent
    async fn on_progress(&self, percent: f64);

    /// Called once when the real request settles
    async fn on_settled(&self, succeeded: bool);
}

/// No-op sink for testing or when progress isn't shown
pub struct NoopProgress;

#[async_trait]
impl ProgressSink for NoopProgress {
    async fn on_progress(&self, _percent: f64) {}
    async fn on_settled(&self, _succeeded: bool) {}
}

/// Timing of the estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSchedule {
    /// Tick interval
    pub interval: Duration,
    /// Time over which the estimate rises linearly
    pub expected: Duration,
    /// Highest value shown while waiting
    pub cap: f64,
    /// How long 100% stays up before resetting to 0
    pub reset_delay: Duration,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(50),
            expected: Duration::from_millis(3000),
            cap: 95.0,
            reset_delay: Duration::from_millis(1000),
        }
    }
}

const MIN_TICK: Duration = Duration::from_millis(1);

impl ProgressSchedule {
    /// Tick period actually used; never below 1 ms
    fn period(&self) -> Duration {
        self.interval.max(MIN_TICK)
    }

    /// Number of ticks in the expected duration (at least one)
    fn steps(&self) -> u32 {
        u32::try_from(self.expected.as_millis() / self.period().as_millis())
            .unwrap_or(u32::MAX)
            .max(1)
    }

    /// Estimate after `step` ticks
    pub fn estimate(&self, step: u32) -> f64 {
        (f64::from(step) / f64::from(self.steps()) * 100.0).min(self.cap)
    }
}

/// Running estimate tied to one request
///
/// The ticker is aborted by [`finish`](Self::finish) or, if the owning future
/// is dropped first, by `Drop`.
pub struct EstimatedProgress {
    ticker: JoinHandle<()>,
    sink: Arc<dyn ProgressSink>,
    schedule: ProgressSchedule,
}

impl EstimatedProgress {
    /// Reset the sink to 0 and start ticking
    pub async fn start(sink: Arc<dyn ProgressSink>, schedule: ProgressSchedule) -> Self {
        sink.on_progress(0.0).await;

        let ticker_sink = Arc::clone(&sink);
        let ticker = tokio::spawn(async move {
            let period = schedule.period();
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let steps = schedule.steps();

            for step in 1..=steps {
                ticks.tick().await;
                ticker_sink.on_progress(schedule.estimate(step)).await;
            }
        });

        Self {
            ticker,
            sink,
            schedule,
        }
    }

    /// Stop ticking and show the final state
    ///
    /// Success shows 100, then resets to 0 after the display delay without
    /// holding up the caller. Failure resets to 0 right away.
    pub async fn finish(self, succeeded: bool) {
        self.ticker.abort();
        debug!(succeeded, "Progress ticker cancelled");

        self.sink.on_settled(succeeded).await;
        if succeeded {
            self.sink.on_progress(100.0).await;
            let sink = Arc::clone(&self.sink);
            let delay = self.schedule.reset_delay;
            tokio::spawn(async move {
                sleep(delay).await;
                sink.on_progress(0.0).await;
            });
        } else {
            self.sink.on_progress(0.0).await;
        }
    }
}

impl Drop for EstimatedProgress {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
