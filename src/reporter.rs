//! Windowed throughput reporting.

use std::time::Duration;
use tokio::time::Instant;

/// Default reporting window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Observed throughput over one closed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputSample {
    pub messages: u64,
    pub elapsed: Duration,
}

impl ThroughputSample {
    /// Messages per second over the window.
    pub fn rate(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.messages as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Counts publishes and closes a window once it has lasted at least
/// `window`. Windows are independent; nothing is smoothed across them.
#[derive(Debug)]
pub struct ThroughputReporter {
    window: Duration,
    count: u64,
    window_start: Instant,
}

impl ThroughputReporter {
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            count: 0,
            window_start: now,
        }
    }

    /// Publishes counted in the current window.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn window_start(&self) -> Instant {
        self.window_start
    }

    /// Count one publish at `now`. Returns a sample and starts a new window
    /// when the current one has reached its length.
    pub fn record_publish(&mut self, now: Instant) -> Option<ThroughputSample> {
        self.count += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }

        let sample = ThroughputSample {
            messages: self.count,
            elapsed,
        };
        self.count = 0;
        self.window_start = now;
        Some(sample)
    }
}
