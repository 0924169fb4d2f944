//! Request spacing shared by every in-flight extraction.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

/// Hands out request slots at most once per `interval`.
///
/// A server-reported `Retry-After` pushes the next free slot forward for all
/// callers, not just the one that was throttled.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimiter {
    /// Zero means unlimited.
    pub fn per_minute(requests: u32) -> Self {
        let interval = if requests == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(60) / requests
        };
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    pub fn unlimited() -> Self {
        Self::per_minute(0)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until a slot is free and claim it. Returns the time waited.
    pub fn acquire(&self) -> Duration {
        let wait = {
            let mut next = self.slot();
            let now = Instant::now();
            let slot = (*next).max(now);
            *next = slot + self.interval;
            slot - now
        };
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "waiting for rate limit slot");
            std::thread::sleep(wait);
        }
        wait
    }

    /// Make every caller wait at least `delay` from now.
    pub fn defer(&self, delay: Duration) {
        let until = Instant::now() + delay;
        let mut next = self.slot();
        if *next < until {
            *next = until;
        }
    }

    fn slot(&self) -> MutexGuard<'_, Instant> {
        self.next_slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let limiter = RateLimiter::unlimited();
        for _ in 0..5 {
            assert_eq!(limiter.acquire(), Duration::ZERO);
        }
    }

    #[test]
    fn spaces_consecutive_requests() {
        let limiter = RateLimiter::per_minute(1200);
        assert_eq!(limiter.interval(), Duration::from_millis(50));
        limiter.acquire();
        let started = Instant::now();
        limiter.acquire();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn deferral_delays_the_next_slot() {
        let limiter = RateLimiter::unlimited();
        limiter.defer(Duration::from_millis(30));
        let waited = limiter.acquire();
        assert!(waited >= Duration::from_millis(20));
    }
}
