use crate::dashboard::SharedDashboard;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Start the page rotation loop
pub fn start_rotation(
    dashboard: SharedDashboard,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Page rotation started, interval {:?}", interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(interval) => {}
            }

            let mut state = dashboard.write().await;
            state.advance_page();
            debug!("Rotated to column page {}", state.pager().current());
        }

        info!("Page rotation stopped");
    })
}
