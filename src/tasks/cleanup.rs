//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! The task owns a dedicated thread running a current-thread tokio runtime,
//! so callers never need a runtime of their own. Each loop waits on either
//! the next tick or the shutdown signal.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

/// Name given to the cleanup worker thread.
pub const CLEANUP_THREAD_NAME: &str = "ttl-cache-cleanup";

// == Cleanup Task ==
/// Handle to a running cleanup task.
///
/// `stop` signals the task and joins its thread. Stopping twice is harmless.
#[derive(Debug)]
pub struct CleanupTask {
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl CleanupTask {
    /// Returns true while the worker thread has not exited.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Signals the task to terminate and blocks until its thread has exited.
    ///
    /// No sweep runs after this returns.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The receiver is gone only if the worker already exited.
            let _ = shutdown.send(());
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("TTL cleanup task panicked before shutdown");
            }
        }
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a background task that periodically cleans up expired entries.
///
/// The first sweep happens one `interval` after spawning. Sweeps take the
/// store's write lock for their duration.
///
/// # Arguments
/// * `store` - shared reference to the cache store
/// * `interval` - time between sweeps, must be non-zero and small enough
///   that the first tick fits the clock
///
/// # Errors
/// Returns `CacheError::InvalidCleanupInterval` for a zero or overflowing
/// interval and `CacheError::Runtime` if the timer runtime or thread cannot
/// be created.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::<String>::new());
/// let mut cleanup = spawn_cleanup_task(store.clone(), Duration::from_secs(1))?;
/// // Later, during shutdown:
/// cleanup.stop();
/// ```
pub fn spawn_cleanup_task<V>(store: Arc<CacheStore<V>>, interval: Duration) -> Result<CleanupTask>
where
    V: Send + Sync + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::InvalidCleanupInterval(interval));
    }
    let first_tick = Instant::now()
        .checked_add(interval)
        .ok_or(CacheError::InvalidCleanupInterval(interval))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let worker = thread::Builder::new()
        .name(CLEANUP_THREAD_NAME.to_string())
        .spawn(move || {
            runtime.block_on(run_cleanup_loop(store, first_tick, interval, shutdown_rx))
        })?;

    Ok(CleanupTask {
        shutdown: Some(shutdown_tx),
        worker: Some(worker),
    })
}

async fn run_cleanup_loop<V>(
    store: Arc<CacheStore<V>>,
    first_tick: Instant,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(?interval, "Starting TTL cleanup task");
    debug!("TTL cleanup task running");

    let mut ticker = time::interval_at(first_tick, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            // Fires on an explicit stop or when the handle is dropped.
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let removed = store.cleanup_expired();

                if removed > 0 {
                    info!("TTL cleanup: removed {} expired entries", removed);
                } else {
                    debug!("TTL cleanup: no expired entries found");
                }
            }
        }
    }

    debug!("TTL cleanup task terminating");
    drop(ticker);
    info!("TTL cleanup task stopped");
}
