mod scheduler;

use crate::config::Config;
use crate::dashboard::SharedDashboard;
use crate::error::GridResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use scheduler::start_rotation;

/// Cycles the visible column page on a fixed interval
#[derive(Default)]
pub struct PageRotation {
    task: RwLock<Option<JoinHandle<()>>>,
    cancel: CancellationToken,
}

impl PageRotation {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::Component for PageRotation {
    fn name(&self) -> &'static str {
        "page_rotation"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, dashboard: SharedDashboard) -> GridResult<()> {
        let interval = Duration::from_secs(config.read().await.page_interval_secs);

        let mut task_lock = self.task.write().await;
        if task_lock.is_none() {
            *task_lock = Some(start_rotation(dashboard, interval, self.cancel.clone()));
        }

        Ok(())
    }

    async fn shutdown(&self) -> GridResult<()> {
        self.cancel.cancel();
        if let Some(task) = self.task.write().await.take() {
            if let Err(e) = task.await {
                tracing::warn!("Page rotation ended abnormally: {}", e);
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
