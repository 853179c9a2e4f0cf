use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, Result};

/// One fixed window of request counting for a single caller
#[derive(Debug, Clone)]
struct FixedWindow {
    count: u64,
    window_started_at: i64,
}

/// Expired windows are swept once the map grows past this many keys, so
/// unauthenticated traffic cannot grow the map without bound
const SWEEP_THRESHOLD: usize = 1024;

/// In-memory fixed-window rate limiter keyed by caller identity.
///
/// Replaces the store-backed counters with per-process state; the window
/// resets wholesale when it expires rather than sliding.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u64,
    window_secs: u64,
    windows: Mutex<HashMap<String, FixedWindow>>,
}

impl RateLimiter {
    pub fn new(limit: u64, window_secs: u64) -> Self {
        Self {
            limit,
            window_secs,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether the caller is within its window, counting this request.
    /// Returns Err(RateLimitExceeded) once the limit is reached.
    pub fn check_and_increment(&self, key: &str, now: i64) -> Result<()> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() >= SWEEP_THRESHOLD {
            let window_secs = self.window_secs as i64;
            windows.retain(|_, w| now - w.window_started_at < window_secs);
        }

        let window = windows.entry(key.to_string()).or_insert(FixedWindow {
            count: 0,
            window_started_at: now,
        });

        // Reset the window if it has expired
        if now - window.window_started_at >= self.window_secs as i64 {
            window.count = 0;
            window.window_started_at = now;
        }

        if window.count >= self.limit {
            tracing::warn!(
                "Rate limit would be exceeded for {}: {}/{}",
                key,
                window.count,
                self.limit
            );
            return Err(AppError::RateLimitExceeded);
        }

        window.count += 1;
        Ok(())
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(3, 60);
        let now = 1_000_000;

        for _ in 0..3 {
            assert!(limiter.check_and_increment("alice", now).is_ok());
        }
        assert!(matches!(
            limiter.check_and_increment("alice", now),
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, 60);
        let now = 1_000_000;

        assert!(limiter.check_and_increment("alice", now).is_ok());
        assert!(limiter.check_and_increment("bob", now).is_ok());
        assert!(limiter.check_and_increment("alice", now).is_err());
    }

    #[test]
    fn test_expired_windows_are_swept() {
        let limiter = RateLimiter::new(1, 60);
        let now = 1_000_000;

        // Flood with distinct keys to cross the sweep threshold
        for i in 0..SWEEP_THRESHOLD {
            limiter.check_and_increment(&format!("key-{}", i), now).unwrap();
        }
        assert_eq!(limiter.tracked_keys(), SWEEP_THRESHOLD);

        // Once every window has expired, the next request sweeps them all
        limiter.check_and_increment("fresh", now + 60).unwrap();
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn test_sweep_keeps_live_windows() {
        let limiter = RateLimiter::new(1, 60);
        let now = 1_000_000;

        for i in 0..SWEEP_THRESHOLD {
            limiter.check_and_increment(&format!("key-{}", i), now).unwrap();
        }
        limiter.check_and_increment("alice", now + 30).unwrap();

        // The flood has expired by now but alice's window has not
        limiter.check_and_increment("fresh", now + 70).unwrap();
        assert_eq!(limiter.tracked_keys(), 2);

        // alice's count survived the sweep, so she is still limited
        assert!(limiter.check_and_increment("alice", now + 70).is_err());
    }

    #[test]
    fn test_window_reset() {
        let limiter = RateLimiter::new(1, 60);
        let now = 1_000_000;

        assert!(limiter.check_and_increment("alice", now).is_ok());
        assert!(limiter.check_and_increment("alice", now + 30).is_err());

        // Window expires, counting starts over
        assert!(limiter.check_and_increment("alice", now + 60).is_ok());
    }
}
