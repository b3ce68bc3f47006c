//! Cache Provider Module
//!
//! The accessor contract every cache handle fulfils, and the factory that builds one.

use tokio::runtime::Handle;

use crate::cache::LruCache;
use crate::config::CacheConfig;
use crate::error::Result;

// == Accessor Contract ==
/// The three operations a cache handle exposes.
///
/// Every successful call touches the key: its deadline moves to `now + ttl`.
pub trait LruCacher<T>: Send + Sync {
    /// True iff `key` is live. A true result refreshes the key.
    fn has(&self, key: &str) -> bool;

    /// A copy of the value under `key`, or `CacheError::NotFound`.
    fn get(&self, key: &str) -> Result<T>;

    /// Unconditionally stores `value` under `key` and returns it.
    fn set(&self, key: String, value: T) -> T;
}

// == Provider Contract ==
/// Builds cache handles from a [`CacheConfig`].
///
/// Alternative backing stores plug in by implementing this trait.
pub trait CacheProvider<T> {
    /// Validates `config` and returns a ready handle.
    fn new_cache(&self, config: CacheConfig) -> Result<Box<dyn LruCacher<T>>>;
}

// == In-Memory Provider ==
/// Provider for process-local [`LruCache`] handles.
///
/// Sweepers are spawned on `runtime` when set, otherwise on the runtime the
/// caller is running in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCacheProvider {
    runtime: Option<Handle>,
}

impl InMemoryCacheProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that spawns sweepers on `runtime`.
    pub fn with_runtime(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }
}

impl<T> CacheProvider<T> for InMemoryCacheProvider
where
    T: Clone + Send + 'static,
{
    fn new_cache(&self, config: CacheConfig) -> Result<Box<dyn LruCacher<T>>> {
        let cache = match &self.runtime {
            Some(runtime) => LruCache::with_runtime(config, runtime)?,
            None => LruCache::new(config)?,
        };
        Ok(Box::new(cache))
    }
}
