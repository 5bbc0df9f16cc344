//! Background scheduler for the periodic rate sync.
//!
//! Runs `sync_all` once at startup and then on a fixed interval. Runs never
//! overlap: a tick that fires while a sync is in flight is skipped.

use std::sync::Arc;
use std::time::Duration;

use ratekeeper_core::fx::RateSyncServiceTrait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Handle to the running scheduler task.
pub struct RateSyncScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RateSyncScheduler {
    /// Starts the scheduler. The first run happens immediately.
    pub fn start(sync_service: Arc<dyn RateSyncServiceTrait>, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            info!("Rate sync scheduler started ({}s interval)", period.as_secs());

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => run_scheduled_sync(sync_service.as_ref()).await,
                }
            }

            info!("Rate sync scheduler stopped");
        });

        Self { shutdown, handle }
    }

    /// Signals the task to stop and waits for an in-flight run to finish.
    pub async fn stop(self) {
        // Err means the task already exited.
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!("Rate sync scheduler did not shut down cleanly: {}", e);
        }
    }
}

/// Runs a single scheduled sync. Failures are logged and retried on the next tick.
async fn run_scheduled_sync(sync_service: &dyn RateSyncServiceTrait) {
    info!("Running scheduled rate sync...");

    match sync_service.sync_all().await {
        Ok(summary) => {
            info!(
                "Scheduled rate sync completed: {} created, {} updated, {} skipped",
                summary.created,
                summary.updated,
                summary.skipped.len()
            );
        }
        Err(e) => {
            error!("Scheduled rate sync failed: {}", e);
        }
    }
}
