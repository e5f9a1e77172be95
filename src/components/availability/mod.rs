mod actor;
mod handle;
pub mod merge;
pub mod models;
mod scheduler;
pub mod time;

pub use actor::{fetch_availability, fetch_calendar, fetch_classrooms};
pub use handle::AvailabilityHandle;
pub use models::{BusyType, CalendarEvent, UserAvailability};

use crate::config::Config;
use crate::dashboard::SharedDashboard;
use crate::error::{component_error, GridResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use scheduler::start_poller;

/// Polls the classroom and calendar endpoints and feeds the dashboard
#[derive(Default)]
pub struct AvailabilityFeed {
    handle: RwLock<Option<AvailabilityHandle>>,
    poller: RwLock<Option<JoinHandle<()>>>,
    cancel: CancellationToken,
}

impl AvailabilityFeed {
    /// Create a new availability feed component
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<AvailabilityHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }

    /// Poll right away, outside the regular interval
    pub async fn poll_now(&self, dashboard: &SharedDashboard) -> GridResult<()> {
        let handle = self
            .get_handle()
            .await
            .ok_or_else(|| component_error("Availability feed is not initialized"))?;
        let result = handle.refresh().await;
        dashboard.write().await.reconcile(result);
        Ok(())
    }
}

#[async_trait]
impl super::Component for AvailabilityFeed {
    fn name(&self) -> &'static str {
        "availability"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, dashboard: SharedDashboard) -> GridResult<()> {
        let (interval, timeout) = {
            let config_read = config.read().await;
            (
                Duration::from_secs(config_read.refresh_interval_secs),
                Duration::from_secs(config_read.http_timeout_secs),
            )
        };

        let mut handle_lock = self.handle.write().await;
        let handle = handle_lock
            .get_or_insert_with(|| AvailabilityHandle::new(Arc::clone(&config), timeout))
            .clone();
        drop(handle_lock);

        let mut poller_lock = self.poller.write().await;
        if poller_lock.is_none() {
            *poller_lock = Some(start_poller(handle, dashboard, interval, self.cancel.clone()));
        } else {
            tracing::debug!("Availability poller already running");
        }

        Ok(())
    }

    async fn shutdown(&self) -> GridResult<()> {
        self.cancel.cancel();

        if let Some(task) = self.poller.write().await.take() {
            if let Err(e) = task.await {
                tracing::warn!("Availability poller ended abnormally: {}", e);
            }
        }

        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
