//! Cache Handle Module
//!
//! The shareable cache: one lock around the entry store, plus the sweeper it owns.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::provider::LruCacher;
use crate::cache::store::EntryStore;
use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweeper;

// == LRU Cache ==
/// In-process cache with a sliding TTL and least-recently-touched eviction.
///
/// Every accessor and every sweeper pass takes the same lock, so each
/// operation observes and leaves a consistent store. The background sweeper
/// lives exactly as long as the handle: dropping the handle stops it.
///
/// # Example
/// ```ignore
/// let cache = LruCache::new(CacheConfig::new(2, 50_000))?;
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3); // evicts "a"
/// assert!(cache.get("a").is_err());
/// ```
#[derive(Debug)]
pub struct LruCache<T> {
    store: Arc<Mutex<EntryStore<T>>>,
    config: CacheConfig,
    sweeper: JoinHandle<()>,
}

impl<T> LruCache<T>
where
    T: Clone + Send + 'static,
{
    // == Constructors ==
    /// Creates a cache whose sweeper runs on the current tokio runtime.
    ///
    /// Fails with `InvalidConfig` for a non-positive limit or TTL, and with
    /// `Runtime` when called outside a runtime.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let runtime =
            Handle::try_current().map_err(|err| CacheError::Runtime(err.to_string()))?;
        Ok(Self::start(config, &runtime))
    }

    /// Creates a cache whose sweeper runs on `runtime`.
    ///
    /// Usable from synchronous code that holds a runtime handle.
    pub fn with_runtime(config: CacheConfig, runtime: &Handle) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, runtime))
    }

    fn start(config: CacheConfig, runtime: &Handle) -> Self {
        let store = Arc::new(Mutex::new(EntryStore::new(config.item_limit, config.ttl())));
        let sweeper = spawn_sweeper(Arc::downgrade(&store), config.sweep_interval, runtime);

        info!(
            "cache created: item_limit={}, ttl={}ms, sweep_interval={:?}",
            config.item_limit, config.ttl_millis, config.sweep_interval
        );

        Self {
            store,
            config,
            sweeper,
        }
    }

    // == Accessors ==
    /// True iff `key` is live; a true result refreshes its deadline.
    pub fn has(&self, key: &str) -> bool {
        self.store.lock().has(key)
    }

    /// A copy of the value under `key`, refreshing its deadline.
    pub fn get(&self, key: &str) -> Result<T> {
        self.store.lock().get(key)
    }

    /// Stores `value` under `key`, evicting the least recently touched entry
    /// first when a new key would exceed the item limit.
    pub fn set(&self, key: impl Into<String>, value: T) -> T {
        self.store.lock().set(key.into(), value)
    }

    // == Inspection ==
    // None of these touch entries.

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<T> LruCacher<T> for LruCache<T>
where
    T: Clone + Send + 'static,
{
    fn has(&self, key: &str) -> bool {
        LruCache::has(self, key)
    }

    fn get(&self, key: &str) -> Result<T> {
        LruCache::get(self, key)
    }

    fn set(&self, key: String, value: T) -> T {
        LruCache::set(self, key, value)
    }
}

impl<T> Drop for LruCache<T> {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cache_rejects_zero_item_limit() {
        let result = LruCache::<String>::new(CacheConfig::new(0, 50_000));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_cache_rejects_zero_ttl() {
        let result = LruCache::<String>::new(CacheConfig::new(10, 0));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_cache_requires_runtime() {
        let result = LruCache::<String>::new(CacheConfig::new(10, 500));
        assert!(matches!(result, Err(CacheError::Runtime(_))));
    }

    #[test]
    fn test_config_error_reported_before_runtime_error() {
        let result = LruCache::<String>::new(CacheConfig::new(0, 500));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = LruCache::new(CacheConfig::new(10, 50_000)).unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.set("foo", "bar".to_string()), "bar");
        assert!(cache.has("foo"));
        assert_eq!(cache.get("foo"), Ok("bar".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.config().item_limit, 10);
    }

    #[tokio::test]
    async fn test_inspection_does_not_touch() {
        let cache = LruCache::new(CacheConfig::new(2, 50_000)).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        let _ = cache.len();
        let _ = cache.stats();
        cache.set("c", 3);

        assert!(!cache.has("a"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_expired_entries() {
        let config =
            CacheConfig::new(10, 100).with_sweep_interval(Duration::from_millis(20));
        let cache = LruCache::new(config).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(Duration::from_millis(300)).await;

        // Removed physically, without any lookup
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 2);
    }

    #[tokio::test]
    async fn test_sweeper_survives_empty_ticks() {
        let config =
            CacheConfig::new(10, 100).with_sweep_interval(Duration::from_millis(10));
        let cache = LruCache::new(config).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!cache.sweeper.is_finished());

        cache.set("late", 1);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_drop_stops_sweeper() {
        let cache = LruCache::<u32>::new(CacheConfig::new(10, 500)).unwrap();
        let abort_handle = cache.sweeper.abort_handle();
        assert!(!abort_handle.is_finished());

        drop(cache);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(abort_handle.is_finished(), "Sweeper should stop with its cache");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_access_respects_limit() {
        let cache = Arc::new(LruCache::new(CacheConfig::new(16, 50_000)).unwrap());
        let mut handles = Vec::new();

        for worker in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("w{}-{}", worker, i % 40);
                    cache.set(key.clone(), i);
                    let _ = cache.get(&key);
                    let _ = cache.has(&key);
                    assert!(cache.len() <= 16);
                }
            }));
        }

        for handle in handles {
            handle.await.expect("worker should not panic");
        }
        assert!(cache.len() <= 16);
    }
}
