use crate::utils::time::GridZone;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Layouts accepted for timestamps without an offset
const FLOATING_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// One grid column: a classroom and its calendar for the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAvailability {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userEvent", default)]
    pub user_event: Vec<CalendarEvent>,
}

impl UserAvailability {
    /// A classroom with no known events
    pub fn empty(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            user_event: Vec::new(),
        }
    }
}

/// One occupancy interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarEvent {
    pub start_time: EventTimestamp,
    pub end_time: EventTimestamp,
    #[serde(default)]
    pub busy_type: BusyType,
}

/// Free/busy classification as reported by the calendar backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusyType {
    #[serde(alias = "busy")]
    Busy,
    #[serde(alias = "free")]
    Free,
    #[serde(alias = "tentative")]
    Tentative,
    #[serde(alias = "oof")]
    Oof,
    #[serde(alias = "workingElsewhere")]
    WorkingElsewhere,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Event boundary as received.
///
/// Timestamps with an offset are absolute. Timestamps without one are
/// wall-clock times in the grid's zone. Anything else is kept verbatim and
/// never matches a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTimestamp {
    Zoned(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
    Unparsed(String),
}

impl EventTimestamp {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return EventTimestamp::Zoned(dt);
        }
        FLOATING_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(EventTimestamp::Floating)
            .unwrap_or_else(|| EventTimestamp::Unparsed(raw.to_string()))
    }

    /// Absolute instant, if the timestamp has one in `zone`
    pub fn resolve(&self, zone: &GridZone) -> Option<DateTime<Utc>> {
        match self {
            EventTimestamp::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            EventTimestamp::Floating(naive) => zone.resolve(naive),
            EventTimestamp::Unparsed(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for EventTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EventTimestamp::parse(&raw))
    }
}

impl Serialize for EventTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventTimestamp::Zoned(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            EventTimestamp::Floating(naive) => {
                serializer.collect_str(&naive.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
            EventTimestamp::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Body of the calendar endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<UserAvailability>>,
}

impl CalendarResponse {
    /// Columns to show; an unsuccessful response counts as no data
    pub fn into_users(self) -> Vec<UserAvailability> {
        if self.success {
            self.data.unwrap_or_default()
        } else {
            Vec::new()
        }
    }
}
