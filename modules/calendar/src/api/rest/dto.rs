use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::{CalendarEvent, EventSnapshot};

/// Body of `POST /calendar`: the event to pin plus the snapshot that
/// seeds the local replica on first sight.
#[derive(Debug, Clone, Deserialize)]
pub struct AddToCalendarReq {
    pub event_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}

impl From<AddToCalendarReq> for EventSnapshot {
    fn from(req: AddToCalendarReq) -> Self {
        Self {
            event_id: req.event_id,
            name: req.name,
            description: req.description,
            location: req.location,
            tags: req.tags,
            created_by: req.created_by,
            datetime: req.datetime,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEventDto {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}

impl From<CalendarEvent> for CalendarEventDto {
    fn from(e: CalendarEvent) -> Self {
        Self {
            event_id: e.event_id,
            name: e.name,
            description: e.description,
            location: e.location,
            tags: e.tags,
            created_by: e.created_by,
            datetime: e.datetime,
        }
    }
}
