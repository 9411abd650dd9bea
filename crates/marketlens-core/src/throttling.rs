//! Outbound request pacing.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

/// Default minimum spacing between calls to the market-data provider.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(300);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Paces outbound calls so successive permits are at least a fixed interval
/// apart, process-wide for the shared instance.
///
/// Constructed once per provider client and cloned into every fetch path.
/// The underlying GCRA state replaces the "last request time" variable a
/// naive limiter would keep, and stays correct when fetches run
/// concurrently.
#[derive(Clone)]
pub struct RequestPacer {
    limiter: Arc<DirectRateLimiter>,
    interval: Duration,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        let period = interval.max(Duration::from_millis(1));
        let quota = Quota::with_period(period)
            .expect("pacing period is always greater than zero")
            .allow_burst(NonZeroU32::MIN);

        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            interval,
        }
    }

    /// Suspends, without busy-waiting, until the shared budget admits one
    /// more call. The first permit is granted immediately.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(MIN_REQUEST_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn default_pacer_uses_provider_interval() {
        assert_eq!(RequestPacer::default().interval(), MIN_REQUEST_INTERVAL);
    }

    #[tokio::test]
    async fn successive_acquires_are_spaced_by_the_interval() {
        let pacer = RequestPacer::new(Duration::from_millis(20));
        let started = Instant::now();

        for _ in 0..4 {
            pacer.acquire().await;
        }

        // 4 permits need at least 3 full intervals between them.
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn clones_share_one_budget() {
        let pacer = RequestPacer::new(Duration::from_millis(20));
        let clone = pacer.clone();
        let started = Instant::now();

        pacer.acquire().await;
        clone.acquire().await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
