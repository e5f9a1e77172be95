use super::actor::AvailabilityActorHandle;
use super::models::UserAvailability;
use crate::config::Config;
use crate::error::GridResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the availability actor
#[derive(Clone)]
pub struct AvailabilityHandle {
    actor_handle: AvailabilityActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl AvailabilityHandle {
    /// Create a new AvailabilityHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>, timeout: Duration) -> Self {
        use super::actor::AvailabilityActor;

        let (mut actor, handle) = AvailabilityActor::new(config, timeout);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Poll both endpoints once
    pub async fn refresh(&self) -> GridResult<Vec<UserAvailability>> {
        self.actor_handle.refresh().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> GridResult<()> {
        self.actor_handle.shutdown().await
    }
}
