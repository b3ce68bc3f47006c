//! Slide Cache - an in-process key/value cache
//!
//! Bounds memory by item count and staleness by a sliding TTL. When full, the
//! least recently touched entry is evicted; a background sweeper reclaims
//! expired entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use cache::{CacheProvider, CacheStats, InMemoryCacheProvider, LruCache, LruCacher};
pub use config::{CacheConfig, ServerConfig};
pub use error::{CacheError, Result};
