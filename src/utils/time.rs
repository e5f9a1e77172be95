use crate::error::{config_error, GridResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use std::fmt;

/// A grid row label, a wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
}

impl TimeSlot {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight
    pub fn minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    fn from_minutes(minutes: u32) -> Self {
        Self::new(minutes / 60, minutes % 60)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Slots from `start_hour` (inclusive) to `end_hour` (exclusive), `step_minutes` apart
pub fn generate_time_slots(
    start_hour: u32,
    end_hour: u32,
    step_minutes: u32,
) -> GridResult<Vec<TimeSlot>> {
    if step_minutes == 0 {
        return Err(config_error("Slot length must be positive"));
    }
    if end_hour > 24 || start_hour >= end_hour {
        return Err(config_error(&format!(
            "Invalid day bounds {}..{}",
            start_hour, end_hour
        )));
    }

    let slots = (start_hour * 60..end_hour * 60)
        .step_by(step_minutes as usize)
        .map(TimeSlot::from_minutes)
        .collect();

    Ok(slots)
}

/// Timezone in which "today" and floating event times are interpreted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridZone {
    Local,
    Named(Tz),
}

impl GridZone {
    /// Look up an IANA timezone name
    pub fn named(name: &str) -> GridResult<Self> {
        name.parse::<Tz>()
            .map(GridZone::Named)
            .map_err(|_| config_error(&format!("Unknown timezone: {}", name)))
    }

    /// Calendar date of `now` in this zone
    pub fn date_of(&self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            GridZone::Local => now.with_timezone(&Local).date_naive(),
            GridZone::Named(tz) => now.with_timezone(tz).date_naive(),
        }
    }

    /// Today's date in this zone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// Pin a wall-clock time in this zone to an instant.
    /// Times skipped by a DST jump have no instant; repeated ones take the earlier.
    pub fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            GridZone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            GridZone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Instant of a slot on the given day
    pub fn slot_instant(&self, date: NaiveDate, slot: TimeSlot) -> Option<DateTime<Utc>> {
        let naive = date.and_hms_opt(slot.hour, slot.minute, 0)?;
        self.resolve(&naive)
    }
}

/// Drop seconds and below
pub fn floor_to_minute(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    instant.with_second(0)?.with_nanosecond(0)
}
