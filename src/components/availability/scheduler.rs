use super::handle::AvailabilityHandle;
use crate::dashboard::SharedDashboard;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Start the poll-and-reconcile loop.
///
/// The first poll runs immediately; later polls follow every `interval`.
pub fn start_poller(
    handle: AvailabilityHandle,
    dashboard: SharedDashboard,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Availability poller started, interval {:?}", interval);

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => break,
                result = handle.refresh() => result,
            };

            dashboard.write().await.reconcile(result);

            debug!("Next availability poll in {:?}", interval);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(interval) => {}
            }
        }

        info!("Availability poller stopped");
    })
}
