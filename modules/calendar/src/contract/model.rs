use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of an event supplied when it is added to a calendar. Seeds
/// the local replica; later edits arrive through the sync queue. Tags
/// are kept as wire names so the calendar never rejects a category it
/// does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}

/// Replicated event record as served from a user's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}
