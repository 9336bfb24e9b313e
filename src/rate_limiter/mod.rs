use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Spaces requests to the results site a minimum interval apart.
///
/// Shared across concurrent fetch tasks: slot bookkeeping happens under the
/// lock, the sleeping happens outside it, so waiters queue up on evenly
/// spaced slots instead of stampeding when the lock frees.
pub struct RateLimiter {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(delay_ms),
            next_slot: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        let slot = self.reserve_slot().await;
        sleep_until(slot).await;
    }

    async fn reserve_slot(&self) -> Instant {
        let mut next = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + self.min_interval);
        slot
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_request_passes_immediately() {
        let limiter = RateLimiter::new(10_000);
        let started = Instant::now();
        limiter.wait().await;
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn subsequent_requests_are_spaced() {
        let limiter = RateLimiter::new(30);
        let started = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(60));
    }
}
