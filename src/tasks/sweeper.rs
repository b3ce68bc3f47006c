//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::store::EntryStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval` between passes and takes the store lock for
/// the duration of a pass only. It holds a weak reference, so it exits on its
/// own once the store has been dropped; the owning handle also aborts it.
///
/// # Arguments
/// * `store` - weak reference to the locked entry store
/// * `interval` - time between two sweeps
/// * `runtime` - runtime the task is spawned on
pub(crate) fn spawn_sweeper<T>(
    store: Weak<Mutex<EntryStore<T>>>,
    interval: Duration,
    runtime: &Handle,
) -> JoinHandle<()>
where
    T: Clone + Send + 'static,
{
    runtime.spawn(async move {
        debug!("Starting TTL sweeper with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let Some(store) = store.upgrade() else {
                    debug!("TTL sweeper: cache dropped, stopping");
                    break;
                };
                let mut guard = store.lock();
                guard.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
