//! Entry Store Module
//!
//! Key/value storage combining a HashMap with a recency index and sliding deadlines.
//! The store itself is not synchronized; `LruCache` serializes every access to it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyIndex};
use crate::error::{CacheError, Result};

// == Entry Store ==
/// Storage with sliding-TTL expiry and least-recently-touched eviction.
#[derive(Debug)]
pub(crate) struct EntryStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Touch order, oldest first
    recency: RecencyIndex,
    /// Counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    item_limit: usize,
    /// Lifetime granted on every touch
    ttl: Duration,
}

impl<T: Clone> EntryStore<T> {
    // == Constructor ==
    /// Creates an empty store. `item_limit` must be positive; the cache handle
    /// validates this before building a store.
    pub fn new(item_limit: usize, ttl: Duration) -> Self {
        debug_assert!(item_limit > 0, "item_limit must be positive");
        Self {
            entries: HashMap::new(),
            recency: RecencyIndex::new(),
            stats: CacheStats::new(),
            item_limit,
            ttl,
        }
    }

    // == Has ==
    /// Returns true if `key` is live, refreshing its deadline.
    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(key, Instant::now())
    }

    pub fn has_at(&mut self, key: &str, now: Instant) -> bool {
        self.touch_live(key, now).is_some()
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, refreshing its deadline.
    ///
    /// Entries past their deadline are reported as missing even if the sweeper
    /// has not reached them yet.
    pub fn get(&mut self, key: &str) -> Result<T> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&mut self, key: &str, now: Instant) -> Result<T> {
        match self.touch_live(key, now).map(|entry| entry.value.clone()) {
            Some(value) => {
                self.stats.record_hit();
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key` and returns the stored value.
    ///
    /// Overwrites never evict. A new key arriving at capacity first evicts the
    /// least recently touched entry.
    pub fn set(&mut self, key: String, value: T) -> T {
        self.set_at(key, value, Instant::now())
    }

    pub fn set_at(&mut self, key: String, value: T, now: Instant) -> T {
        if let Some(entry) = self.entries.get_mut(&key) {
            let seq = self.recency.touch(&key, Some(entry.touch_seq));
            entry.value = value.clone();
            entry.bump(now, self.ttl, seq);
            return value;
        }

        if self.entries.len() >= self.item_limit {
            self.evict_oldest(now);
        }

        let seq = self.recency.touch(&key, None);
        self.entries
            .insert(key, CacheEntry::new(value.clone(), now, self.ttl, seq));
        self.stats.set_total_entries(self.entries.len());
        value
    }

    // == Sweep Expired ==
    /// Removes every entry whose deadline is at or before now.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let mut removed = 0;

        // Deadlines grow with touch order, so the first live entry ends the scan.
        while let Some(key) = self.recency.peek_oldest() {
            let expired = self
                .entries
                .get(key)
                .map_or(true, |entry| entry.is_expired_at(now));
            if !expired {
                break;
            }
            if let Some(key) = self.recency.pop_oldest() {
                self.entries.remove(&key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds a live entry and refreshes it; drops it if its deadline passed.
    fn touch_live(&mut self, key: &str, now: Instant) -> Option<&CacheEntry<T>> {
        let expired = self.entries.get(key)?.is_expired_at(now);
        if expired {
            if let Some(entry) = self.entries.remove(key) {
                self.recency.remove(entry.touch_seq);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
            }
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        let seq = self.recency.touch(key, Some(entry.touch_seq));
        entry.bump(now, self.ttl, seq);
        Some(&*entry)
    }

    /// Removes the least recently touched entry, if any.
    fn evict_oldest(&mut self, now: Instant) -> Option<String> {
        let key = self.recency.pop_oldest()?;
        if let Some(entry) = self.entries.remove(&key) {
            if entry.is_expired_at(now) {
                self.stats.record_expirations(1);
            } else {
                self.stats.record_eviction();
            }
        }
        debug!("evicted least recently touched key {}", key);
        Some(key)
    }
}
