use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::{CalendarEvent, EventSnapshot};

/// Field set applied to a replica when the owning service reports an
/// edit. Always the full post-edit state.
#[derive(Debug, Clone)]
pub struct ReplicaUpdate {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}

/// Persistence port for the calendar. Every mutation is idempotent:
/// the sync queue is at-least-once, so the same change may be applied
/// more than once.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Insert the replica row unless one already exists for the event.
    async fn seed_replica(&self, snapshot: EventSnapshot) -> anyhow::Result<()>;

    /// Insert the `(user, event)` join row unless it already exists.
    async fn add_entry(&self, user_id: i64, event_id: i64) -> anyhow::Result<()>;

    /// Delete the `(user, event)` join row. No-op if absent.
    async fn remove_entry(&self, user_id: i64, event_id: i64) -> anyhow::Result<()>;

    /// Delete every join row belonging to the user.
    async fn remove_entries_for_user(&self, user_id: i64) -> anyhow::Result<()>;

    /// Delete every join row referencing the event.
    async fn remove_entries_for_event(&self, event_id: i64) -> anyhow::Result<()>;

    /// Overwrite the replica's fields. No-op success if the replica is
    /// absent.
    async fn apply_replica_update(&self, update: ReplicaUpdate) -> anyhow::Result<()>;

    /// Delete the replica row. No-op if absent.
    async fn delete_replica(&self, event_id: i64) -> anyhow::Result<()>;

    /// Replica rows joined through the user's entries, restricted to
    /// `from <= datetime < to`, ordered by `(datetime, event_id)`
    /// ascending.
    async fn list_window(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
}
