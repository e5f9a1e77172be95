use crate::components::availability::models::UserAvailability;
use crate::error::GridResult;
use crate::utils::pagination::Paginator;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Text shown in place of the grid when a poll fails
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching data.";

/// Columns from the latest successful poll
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySnapshot {
    pub users: Vec<UserAvailability>,
    pub fetched_at: DateTime<Utc>,
}

/// What the grid currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum GridState {
    Loading,
    Ready(AvailabilitySnapshot),
    Error(String),
}

/// Everything the web handlers and background loops share
#[derive(Debug, Clone)]
pub struct DashboardState {
    grid: GridState,
    pager: Paginator,
}

pub type SharedDashboard = Arc<RwLock<DashboardState>>;

impl DashboardState {
    pub fn new(columns_per_page: usize) -> Self {
        Self {
            grid: GridState::Loading,
            pager: Paginator::new(columns_per_page),
        }
    }

    pub fn shared(columns_per_page: usize) -> SharedDashboard {
        Arc::new(RwLock::new(Self::new(columns_per_page)))
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    /// Columns available for paging; zero unless ready
    pub fn column_count(&self) -> usize {
        match &self.grid {
            GridState::Ready(snapshot) => snapshot.users.len(),
            _ => 0,
        }
    }

    /// Apply the outcome of one poll.
    ///
    /// Success replaces the columns wholesale. Failure replaces whatever was
    /// shown with the generic error text until a later poll succeeds.
    pub fn reconcile(&mut self, result: GridResult<Vec<UserAvailability>>) {
        match result {
            Ok(users) => {
                info!("Grid updated with {} columns", users.len());
                self.grid = GridState::Ready(AvailabilitySnapshot {
                    users,
                    fetched_at: Utc::now(),
                });
                let total = self.column_count();
                self.pager.clamp(total);
            }
            Err(e) => {
                error!("Failed to fetch availability data: {:?}", e);
                self.grid = GridState::Error(FETCH_ERROR_MESSAGE.to_string());
                self.pager.clamp(0);
            }
        }
    }

    /// Timer step of the page rotation
    pub fn advance_page(&mut self) {
        let total = self.column_count();
        self.pager.advance(total);
    }

    pub fn previous_page(&mut self) {
        self.pager.previous();
    }

    pub fn next_page(&mut self) {
        let total = self.column_count();
        self.pager.next(total);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.column_count();
        self.pager.go_to(page, total);
    }
}
