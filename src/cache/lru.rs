//! Recency Index Module
//!
//! Orders keys by their last touch for eviction and sweeping.

use std::collections::BTreeMap;

// == Recency Index ==
/// Tracks touch order for least-recently-touched eviction.
///
/// Every touch is stamped with a strictly increasing sequence number. All
/// entries of one cache share the same TTL, so the smallest stamp also carries
/// the earliest deadline: the front of the index is both the eviction victim
/// and the first candidate for expiry.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    /// Touch stamp -> key, oldest first
    order: BTreeMap<u64, String>,
    /// Next stamp to hand out
    next_seq: u64,
}

impl RecencyIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Records a touch of `key`, dropping its previous stamp if any.
    ///
    /// Returns the new stamp, which the caller stores on the entry.
    pub fn touch(&mut self, key: &str, previous: Option<u64>) -> u64 {
        if let Some(seq) = previous {
            self.order.remove(&seq);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.to_string());
        seq
    }

    // == Remove ==
    /// Forgets the touch recorded under `seq`.
    pub fn remove(&mut self, seq: u64) {
        self.order.remove(&seq);
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently touched key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the least recently touched key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
