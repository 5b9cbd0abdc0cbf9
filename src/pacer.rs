//! Fixed-delay rate pacing.
//!
//! The pacer sleeps `60 / rate` seconds after each publish. Publish latency and
//! reporting overhead are not compensated, so the achieved rate sits slightly
//! below target.

use std::num::NonZeroU32;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePacer {
    interval: Duration,
}

impl RatePacer {
    /// Pacer for a target mean rate in messages per minute.
    pub fn per_minute(target: NonZeroU32) -> Self {
        Self {
            interval: Duration::from_secs_f64(60.0 / f64::from(target.get())),
        }
    }

    /// Delay between consecutive publishes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn pace(&self) {
        tokio::time::sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn per_minute(rate: u32) -> RatePacer {
        RatePacer::per_minute(NonZeroU32::new(rate).unwrap())
    }

    #[test]
    fn test_interval_for_default_rate() {
        assert_eq!(per_minute(20_000).interval(), Duration::from_millis(3));
    }

    #[test]
    fn test_interval_for_slow_rate() {
        assert_eq!(per_minute(30).interval(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_matches_target_rate() {
        let pacer = per_minute(60_000);
        let start = Instant::now();

        for _ in 0..250 {
            pacer.pace().await;
        }

        // 250 iterations at 1 ms each
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(250), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(260), "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_elapsed_on_wall_clock() {
        let pacer = per_minute(6_000);
        let start = std::time::Instant::now();

        for _ in 0..20 {
            pacer.pace().await;
        }

        // 20 iterations at 10 ms; sleeps never return early
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(2), "{elapsed:?}");
    }
}
