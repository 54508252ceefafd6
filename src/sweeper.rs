//! Expiration Sweeper Module
//!
//! Background task that periodically removes expired session entries, so
//! records that are set and never read again still get reclaimed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::SessionStore;

// == Sweeper ==
/// Owns the recurring expiration sweep over a shared store.
///
/// The lifecycle is Stopped -> Running (on [`spawn`](Sweeper::spawn)) ->
/// Stopped (on [`stop`](Sweeper::stop)); there are no other states. Each tick
/// runs a complete sweep under the write lock, so ticks are atomic with
/// respect to other cache mutation and never overlap. Dropping the sweeper
/// stops it, so no background work outlives its cache.
#[derive(Debug)]
pub struct Sweeper {
    /// Handle of the running sweep task; None once stopped
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    // == Spawn ==
    /// Starts the recurring sweep over `store`, ticking every `check_period`.
    pub fn spawn(store: Arc<RwLock<SessionStore>>, check_period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            info!(period_ms = check_period.as_millis() as u64, "expiration sweeper started");

            loop {
                tokio::time::sleep(check_period).await;

                let removed = {
                    let mut store = store.write().await;
                    store.sweep_expired()
                };

                if removed > 0 {
                    info!(removed, "sweep removed expired entries");
                } else {
                    debug!("sweep found no expired entries");
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    // == Stop ==
    /// Cancels the recurring sweep. Idempotent; stopping an already stopped
    /// sweeper is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("expiration sweeper stopped");
        }
    }

    // == Is Running ==
    /// Returns true while the sweep task is scheduled.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
