//! Fixed-interval request pacing.
//!
//! [`RateGate`] enforces a minimum delay between consecutive requests,
//! whatever the latency of the responses. It reads time from
//! [`tokio::time::Instant`], so tests can drive it with a paused clock.

use std::time::Duration;

use tokio::time::Instant;

/// Spaces calls to [`RateGate::wait`] at least `min_interval` apart.
#[derive(Debug, Clone)]
pub struct RateGate {
    min_interval: Duration,
    last: Option<Instant>,
}

impl RateGate {
    /// Creates a gate. The first call to [`RateGate::wait`] never blocks.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Sleeps until `min_interval` has passed since the previous call,
    /// then records the current instant. Returns how long it slept.
    pub async fn wait(&mut self) -> Duration {
        let mut slept = Duration::ZERO;
        if let Some(last) = self.last {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                slept = ready_at - now;
                tracing::info!(wait_secs = slept.as_secs_f64(), "rate limiting");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last = Some(Instant::now());
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate() {
        let mut gate = RateGate::new(Duration::from_secs(6));
        let start = Instant::now();
        assert_eq!(gate.wait().await, Duration::ZERO);
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced() {
        let mut gate = RateGate::new(Duration::from_secs(6));
        gate.wait().await;
        let first = Instant::now();
        gate.wait().await;
        let second = Instant::now();
        gate.wait().await;
        let third = Instant::now();
        assert!(second - first >= Duration::from_secs(6));
        assert!(third - second >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_caller_is_not_delayed_further() {
        let mut gate = RateGate::new(Duration::from_secs(6));
        gate.wait().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(gate.wait().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn partial_elapsed_time_is_credited() {
        let mut gate = RateGate::new(Duration::from_secs(6));
        gate.wait().await;
        tokio::time::advance(Duration::from_secs(4)).await;
        let slept = gate.wait().await;
        assert_eq!(slept, Duration::from_secs(2));
    }
}
