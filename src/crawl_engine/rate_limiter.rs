//! Request pacing for the single source host.
//!
//! Every page of a run lives on the same host, so one bucket paces the whole
//! crawl. The bucket holds a single token: after a request is allowed the
//! next one is denied until `1 / rate` has elapsed.
//!
//! Key features:
//! - Async-friendly with `tokio::sync` primitives
//! - Immediate Allow/Deny decisions via [`RequestPacer::check`]
//! - Waiting acquisition via [`RequestPacer::acquire`]

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Rate limit decision for a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is allowed to proceed
    Allow,
    /// Request should be deferred
    /// Contains the duration to wait before retrying
    Deny { retry_after: Duration },
}

/// Paces requests to at most `rate_rps` per second.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    /// Earliest instant the next request may start; `None` before the first
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer for `rate_rps` requests per second.
    ///
    /// Non-positive or non-finite rates disable pacing.
    #[must_use]
    pub fn new(rate_rps: f64) -> Self {
        let interval = if rate_rps.is_finite() && rate_rps > 0.0 {
            Duration::from_secs_f64(1.0 / rate_rps)
        } else {
            Duration::ZERO
        };
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take the slot if it is free, otherwise report how long to wait.
    pub async fn check(&self) -> RateLimitDecision {
        let now = Instant::now();
        let mut next_slot = self.next_slot.lock().await;

        match *next_slot {
            Some(slot) if slot > now => RateLimitDecision::Deny {
                retry_after: slot - now,
            },
            _ => {
                *next_slot = Some(now + self.interval);
                RateLimitDecision::Allow
            }
        }
    }

    /// Wait until a request may start, then take the slot.
    pub async fn acquire(&self) {
        loop {
            match self.check().await {
                RateLimitDecision::Allow => return,
                RateLimitDecision::Deny { retry_after } => {
                    log::trace!("Pacing request, waiting {retry_after:?}");
                    tokio::time::sleep(retry_after).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_immediate_request_is_denied() {
        let pacer = RequestPacer::new(1.0);
        assert_eq!(pacer.check().await, RateLimitDecision::Allow);
        match pacer.check().await {
            RateLimitDecision::Deny { retry_after } => {
                assert!(retry_after <= Duration::from_secs(1));
                assert!(retry_after > Duration::ZERO);
            }
            RateLimitDecision::Allow => panic!("second request should be paced"),
        }
    }

    #[tokio::test]
    async fn zero_rate_never_denies() {
        let pacer = RequestPacer::new(0.0);
        assert_eq!(pacer.interval(), Duration::ZERO);
        for _ in 0..5 {
            assert_eq!(pacer.check().await, RateLimitDecision::Allow);
        }
    }

    #[tokio::test]
    async fn acquire_waits_for_the_next_slot() {
        let pacer = RequestPacer::new(50.0);
        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(19));
    }
}
