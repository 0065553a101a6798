//! Fixed-window rate limiting keyed by client address.
//!
//! Requests are counted per key per discrete time bucket. The counter
//! store and the clock are both injectable: the store so a shared cache
//! can back a clustered deployment, the clock so tests are deterministic.

use std::sync::Arc;

use dashmap::DashMap;

/// Source of the current unix timestamp.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Counter storage for one limiter.
pub trait RateLimitStore: Send + Sync {
    /// Increment the counter for `key` in the window starting at
    /// `window_start` and return the new count. A counter carried over
    /// from an earlier window is discarded first.
    fn increment(&self, key: &str, window_start: i64) -> u32;
}

/// In-process store: key → (window_start, count).
#[derive(Debug, Default)]
pub struct MemoryStore {
    windows: DashMap<String, (i64, u32)>,
}

impl RateLimitStore for MemoryStore {
    fn increment(&self, key: &str, window_start: i64) -> u32 {
        // The entry guard holds the shard lock, so the reset-then-increment
        // below is atomic per key.
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert((window_start, 0));
        if entry.0 != window_start {
            *entry = (window_start, 0);
        }
        entry.1 += 1;
        entry.1
    }
}

/// Outcome of a single rate-limit check.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Configured maximum for the window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Seconds until the current window rolls over.
    pub reset_secs: i64,
}

/// Fixed-window request counter.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    limit: u32,
    window_secs: i64,
}

impl FixedWindowLimiter {
    /// Limiter backed by an in-memory store and the system clock.
    pub fn new(limit: u32, window_secs: i64) -> Self {
        Self::with_parts(
            Arc::new(MemoryStore::default()),
            Arc::new(SystemClock),
            limit,
            window_secs,
        )
    }

    /// Limiter with injected store and clock.
    pub fn with_parts(
        store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
        limit: u32,
        window_secs: i64,
    ) -> Self {
        Self {
            store,
            clock,
            limit,
            window_secs,
        }
    }

    /// Charge one request to `key` and decide whether it may proceed.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = self.clock.now_unix();
        let window_start = now - now.rem_euclid(self.window_secs);
        let count = self.store.increment(key, window_start);
        RateLimitDecision {
            allowed: count <= self.limit,
            limit: self.limit,
            remaining: self.limit.saturating_sub(count),
            reset_secs: window_start + self.window_secs - now,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    struct ManualClock(AtomicI64);

    impl Clock for ManualClock {
        fn now_unix(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn limiter(limit: u32) -> (FixedWindowLimiter, Arc<ManualClock>) {
        // Start exactly on a window boundary so reset_secs is predictable.
        let clock = Arc::new(ManualClock(AtomicI64::new(1_000_020)));
        let limiter = FixedWindowLimiter::with_parts(
            Arc::new(MemoryStore::default()),
            clock.clone(),
            limit,
            60,
        );
        (limiter, clock)
    }

    #[test]
    fn sixth_request_in_window_is_rejected() {
        let (limiter, _clock) = limiter(5);
        for i in 1..=5 {
            let d = limiter.check("10.0.0.1");
            assert!(d.allowed, "request {i} should pass");
            assert_eq!(d.remaining, 5 - i);
        }
        let d = limiter.check("10.0.0.1");
        assert!(!d.allowed);
        assert_eq!(d.remaining, 0);
    }

    #[test]
    fn window_rollover_resets_the_counter() {
        let (limiter, clock) = limiter(5);
        for _ in 0..6 {
            limiter.check("10.0.0.1");
        }
        assert!(!limiter.check("10.0.0.1").allowed);

        clock.0.fetch_add(60, Ordering::SeqCst);
        let d = limiter.check("10.0.0.1");
        assert!(d.allowed);
        assert_eq!(d.remaining, 4);
    }

    #[test]
    fn keys_are_counted_independently() {
        let (limiter, _clock) = limiter(1);
        assert!(limiter.check("10.0.0.1").allowed);
        assert!(!limiter.check("10.0.0.1").allowed);
        assert!(limiter.check("10.0.0.2").allowed);
    }

    #[test]
    fn reset_counts_down_within_the_window() {
        let (limiter, clock) = limiter(5);
        assert_eq!(limiter.check("k").reset_secs, 60);
        clock.0.fetch_add(25, Ordering::SeqCst);
        assert_eq!(limiter.check("k").reset_secs, 35);
    }
}
