//! Cache Module
//!
//! In-process caching with sliding TTL expiry and least-recently-touched eviction.

mod entry;
mod handle;
mod lru;
mod provider;
mod stats;
pub(crate) mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::LruCache;
pub use lru::RecencyIndex;
pub use provider::{CacheProvider, InMemoryCacheProvider, LruCacher};
pub use stats::CacheStats;
