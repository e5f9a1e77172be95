use super::models::{BusyType, CalendarEvent};
use crate::utils::time::{floor_to_minute, GridZone, TimeSlot};
use chrono::{DateTime, NaiveDate, Utc};

/// Whether `instant` lies inside a busy event.
///
/// Both event bounds are compared at minute precision, start inclusive and
/// end exclusive, so a 09:00-09:30 event covers the 09:00 slot but not 09:30.
pub fn is_busy_at(instant: DateTime<Utc>, events: &[CalendarEvent], zone: &GridZone) -> bool {
    let Some(instant) = floor_to_minute(instant) else {
        return false;
    };

    events
        .iter()
        .filter(|event| event.busy_type == BusyType::Busy)
        .any(|event| {
            let start = event.start_time.resolve(zone).and_then(floor_to_minute);
            let end = event.end_time.resolve(zone).and_then(floor_to_minute);
            match (start, end) {
                (Some(start), Some(end)) => start <= instant && instant < end,
                _ => false,
            }
        })
}

/// Whether a slot on `date` is busy. A slot that does not exist on that day
/// (skipped by a DST change) is free.
pub fn is_busy(slot: TimeSlot, date: NaiveDate, events: &[CalendarEvent], zone: &GridZone) -> bool {
    zone.slot_instant(date, slot)
        .map(|instant| is_busy_at(instant, events, zone))
        .unwrap_or(false)
}
