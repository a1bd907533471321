use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::{Event, Tag};

/// Inclusive datetime window. Either bound may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatetimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Keyset position in the `(datetime, id)` ascending order. Listing
/// resumes strictly after this position.
#[derive(Debug, Clone, Copy)]
pub struct ChronoKey {
    pub datetime: DateTime<Utc>,
    pub id: i64,
}

/// Insert record; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewStoredEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
    pub image_hash: String,
}

/// Persistence port for the event service. Object-safe and
/// async-friendly via `async_trait`.
#[async_trait]
pub trait EventsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Event>>;

    /// Uniqueness probe for the `(name, datetime)` creation invariant.
    async fn exists_by_name_and_datetime(
        &self,
        name: &str,
        datetime: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// Insert and return the stored record with its assigned id.
    async fn insert(&self, event: NewStoredEvent) -> anyhow::Result<Event>;

    /// Update an existing event (by primary key in `event.id`).
    async fn update(&self, event: Event) -> anyhow::Result<()>;

    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;

    /// Range scan in `(datetime, id)` ascending order, optionally
    /// restricted to an inclusive window, resuming strictly after the
    /// keyset position, truncated to `limit` rows.
    async fn list_chronological(
        &self,
        range: DatetimeRange,
        after: Option<ChronoKey>,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Event>>;

    /// All events strictly after `now`, in `(datetime, id)` ascending
    /// order. Feeds the in-memory ranking strategies.
    async fn list_upcoming(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Event>>;

    /// Owner-scoped listing, id ascending, resuming strictly after
    /// `after_id`.
    async fn list_by_owner(
        &self,
        owner: i64,
        after_id: i64,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Event>>;
}
