//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with a sliding deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Instant at or after which the entry counts as expired
    pub delete_at: Instant,
    /// Position in the recency index, refreshed on every touch
    pub touch_seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    pub fn new(value: T, now: Instant, ttl: Duration, touch_seq: u64) -> Self {
        Self {
            value,
            delete_at: now + ttl,
            touch_seq,
        }
    }

    // == Bump ==
    /// Pushes the deadline out to `now + ttl` and records the new touch.
    pub fn bump(&mut self, now: Instant, ttl: Duration, touch_seq: u64) {
        self.delete_at = now + ttl;
        self.touch_seq = touch_seq;
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry whose deadline equals `now` is expired, so a
    /// key touched at `t` is live on `[t, t + ttl)` only.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.delete_at
    }

    /// Remaining lifetime as of `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.delete_at.saturating_duration_since(now)
    }
}
