use crate::components::availability::time::is_busy;
use crate::config::GridLayout;
use crate::dashboard::{DashboardState, GridState};
use crate::error::GridResult;
use crate::utils::display::column_label;
use crate::utils::time::{generate_time_slots, GridZone, TimeSlot};
use askama::Template;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStatus {
    Loading,
    Ready,
    Error,
}

/// Column header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellView {
    pub busy: bool,
}

impl CellView {
    pub fn label(&self) -> &'static str {
        if self.busy {
            "Busy"
        } else {
            "Free"
        }
    }

    pub fn class(&self) -> &'static str {
        if self.busy {
            "busy-cell"
        } else {
            "free-cell"
        }
    }
}

/// One time slot across the visible columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub slot: TimeSlot,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

/// The current page of the grid, ready to render as HTML or JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub status: GridStatus,
    pub message: String,
    pub date: String,
    pub fetched_at: Option<String>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub pages: Vec<PageLink>,
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
}

impl GridView {
    /// Evaluate the visible page for `date`
    pub fn build(
        state: &DashboardState,
        layout: &GridLayout,
        zone: &GridZone,
        date: NaiveDate,
    ) -> GridResult<Self> {
        let pager = state.pager();
        let mut view = GridView {
            status: GridStatus::Loading,
            message: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            fetched_at: None,
            current_page: pager.current(),
            total_pages: 0,
            has_previous: false,
            has_next: false,
            pages: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        };

        let snapshot = match state.grid() {
            GridState::Loading => return Ok(view),
            GridState::Error(message) => {
                view.status = GridStatus::Error;
                view.message = message.clone();
                return Ok(view);
            }
            GridState::Ready(snapshot) => snapshot,
        };

        let total = snapshot.users.len();
        let visible = pager.slice(&snapshot.users);
        let slots = generate_time_slots(
            layout.day_start_hour,
            layout.day_end_hour,
            layout.slot_minutes,
        )?;

        view.status = GridStatus::Ready;
        view.fetched_at = Some(snapshot.fetched_at.to_rfc3339());
        view.total_pages = pager.total_pages(total);
        view.has_previous = pager.has_previous();
        view.has_next = pager.has_next(total);
        view.pages = (1..=view.total_pages)
            .map(|number| PageLink {
                number,
                active: number == pager.current(),
            })
            .collect();
        view.columns = visible
            .iter()
            .map(|user| ColumnView {
                id: user.user_email.clone(),
                label: column_label(&user.user_email),
            })
            .collect();
        view.rows = slots
            .into_iter()
            .map(|slot| RowView {
                slot,
                cells: visible
                    .iter()
                    .map(|user| CellView {
                        busy: is_busy(slot, date, &user.user_event, zone),
                    })
                    .collect(),
            })
            .collect();

        Ok(view)
    }

    pub fn is_loading(&self) -> bool {
        self.status == GridStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == GridStatus::Error
    }
}

/// HTML page wrapping a [`GridView`]
#[derive(Template)]
#[template(path = "grid.html")]
pub struct GridPage<'a> {
    pub view: &'a GridView,
    /// Seconds before the browser reloads to follow the page rotation
    pub refresh_secs: u64,
}

/// Render the HTML page for `view`
pub fn render_grid(view: &GridView, refresh_secs: u64) -> GridResult<String> {
    let html = GridPage { view, refresh_secs }.render()?;
    Ok(html)
}
