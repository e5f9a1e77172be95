use super::merge::merge_classrooms;
use super::models::{CalendarResponse, UserAvailability};
use crate::config::Config;
use crate::error::{fetch_error, GridResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

/// The availability actor that owns the HTTP client and performs polls
pub struct AvailabilityActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<AvailabilityCommand>,
}

/// Commands that can be sent to the availability actor
pub enum AvailabilityCommand {
    Refresh(mpsc::Sender<GridResult<Vec<UserAvailability>>>),
    Shutdown,
}

/// Handle for communicating with the availability actor
#[derive(Clone)]
pub struct AvailabilityActorHandle {
    command_tx: mpsc::Sender<AvailabilityCommand>,
}

impl AvailabilityActorHandle {
    /// Fetch both endpoints and return the merged column list
    pub async fn refresh(&self) -> GridResult<Vec<UserAvailability>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AvailabilityCommand::Refresh(response_tx))
            .await
            .map_err(|e| fetch_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| fetch_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> GridResult<()> {
        let _ = self.command_tx.send(AvailabilityCommand::Shutdown).await;
        Ok(())
    }
}

impl AvailabilityActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>, timeout: Duration) -> (Self, AvailabilityActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
            Client::new()
        });

        let actor = Self {
            config,
            client,
            command_rx,
        };

        (actor, AvailabilityActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Availability actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AvailabilityCommand::Refresh(response_tx) => {
                    let config = self.config.read().await.clone();
                    let result = fetch_availability(&self.client, &config).await;
                    let _ = response_tx.send(result).await;
                }
                AvailabilityCommand::Shutdown => {
                    info!("Availability actor shutting down");
                    break;
                }
            }
        }

        info!("Availability actor shut down");
    }
}

/// Fetch the classroom list and calendar data and merge them into columns
pub async fn fetch_availability(
    client: &Client,
    config: &Config,
) -> GridResult<Vec<UserAvailability>> {
    let classrooms = fetch_classrooms(client, config.classrooms_url.as_deref()).await?;
    let availability = fetch_calendar(client, config.calendar_url.as_deref()).await?;

    let merged = merge_classrooms(availability, classrooms);
    info!("Fetched availability for {} classrooms", merged.len());
    Ok(merged)
}

/// Classroom identifiers; no URL or a `null` body means none
pub async fn fetch_classrooms(client: &Client, url: Option<&str>) -> GridResult<Vec<String>> {
    let Some(url) = url else {
        debug!("No classrooms endpoint configured");
        return Ok(Vec::new());
    };

    let classrooms: Option<Vec<String>> = get_json(client, url, "classrooms").await?;
    Ok(classrooms.unwrap_or_default())
}

/// Per-classroom events; no URL or `success: false` means none
pub async fn fetch_calendar(
    client: &Client,
    url: Option<&str>,
) -> GridResult<Vec<UserAvailability>> {
    let Some(url) = url else {
        debug!("No calendar endpoint configured");
        return Ok(Vec::new());
    };

    let response: CalendarResponse = get_json(client, url, "calendar").await?;
    if !response.success {
        warn!("Calendar endpoint reported success=false, showing no events");
    }
    Ok(response.into_users())
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str, what: &str) -> GridResult<T> {
    // Transport failures surface as Error::Http
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(fetch_error(&format!(
            "Failed to fetch {}: HTTP {} - {}",
            what, status, error_body
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| fetch_error(&format!("Failed to parse {} response: {}", what, e)))
}
