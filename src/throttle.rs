//! Process-wide spacing of backend calls against a shared quota

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Enforces a minimum interval between backend calls
///
/// A depth-1 leaky bucket: one timestamp, shared process-wide. The composer
/// and classifier hold the same `Arc<RateLimiter>` so both count against the
/// single external quota. The mutex is held across the sleep, which
/// serializes concurrent callers; without that, two callers could both
/// observe an expired interval and fire together.
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Block until at least `min_interval` has elapsed since the previous
    /// call, then stamp the current time
    ///
    /// Safe to call unconditionally before every backend invocation; the
    /// first call never waits.
    pub async fn throttle(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!("rate limiting: waiting {:.1}s", wait.as_secs_f64());
                sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced_by_min_interval() {
        let limiter = RateLimiter::new(Duration::from_secs(6));

        limiter.throttle().await;
        let first = Instant::now();
        limiter.throttle().await;
        let second = Instant::now();

        assert!(second - first >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(6));

        let before = Instant::now();
        limiter.throttle().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_serialize_through_the_quota() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(6)));

        let start = Instant::now();
        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.throttle().await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // Three calls through a 6s quota span at least two full intervals.
        assert!(Instant::now() - start >= Duration::from_secs(12));
    }
}
