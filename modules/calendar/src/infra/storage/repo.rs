//! SeaORM-backed implementation of the calendar persistence port.
//!
//! Mutations use probe-then-write instead of relying on driver-specific
//! conflict clauses; the consumer applies one message at a time, so the
//! probe is race-free within the process.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::contract::{CalendarEvent, EventSnapshot};
use crate::domain::repo::{CalendarRepository, ReplicaUpdate};
use crate::infra::storage::entity::{event_replica, user_event};

pub struct SeaOrmCalendarRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmCalendarRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn tags_to_column(tags: &[String]) -> anyhow::Result<String> {
    serde_json::to_string(tags).context("tag payload is not encodable")
}

fn row_to_contract(row: event_replica::Model) -> anyhow::Result<CalendarEvent> {
    let tags: Vec<String> =
        serde_json::from_str(&row.tags).context("stored tag payload is not decodable")?;
    Ok(CalendarEvent {
        event_id: row.event_id,
        name: row.name,
        description: row.description,
        location: row.location,
        tags,
        created_by: row.created_by,
        datetime: row.datetime,
    })
}

#[async_trait::async_trait]
impl<C> CalendarRepository for SeaOrmCalendarRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn seed_replica(&self, snapshot: EventSnapshot) -> anyhow::Result<()> {
        let existing = event_replica::Entity::find_by_id(snapshot.event_id)
            .one(&self.conn)
            .await
            .context("replica lookup failed")?;
        if existing.is_some() {
            return Ok(());
        }
        let m = event_replica::ActiveModel {
            event_id: Set(snapshot.event_id),
            name: Set(snapshot.name),
            description: Set(snapshot.description),
            location: Set(snapshot.location),
            tags: Set(tags_to_column(&snapshot.tags)?),
            created_by: Set(snapshot.created_by),
            datetime: Set(snapshot.datetime),
        };
        let _ = m.insert(&self.conn).await.context("seed_replica failed")?;
        Ok(())
    }

    async fn add_entry(&self, user_id: i64, event_id: i64) -> anyhow::Result<()> {
        let count = user_event::Entity::find()
            .filter(user_event::Column::UserId.eq(user_id))
            .filter(user_event::Column::EventId.eq(event_id))
            .count(&self.conn)
            .await
            .context("entry lookup failed")?;
        if count > 0 {
            return Ok(());
        }
        let m = user_event::ActiveModel {
            user_id: Set(user_id),
            event_id: Set(event_id),
        };
        let _ = m.insert(&self.conn).await.context("add_entry failed")?;
        Ok(())
    }

    async fn remove_entry(&self, user_id: i64, event_id: i64) -> anyhow::Result<()> {
        user_event::Entity::delete_many()
            .filter(user_event::Column::UserId.eq(user_id))
            .filter(user_event::Column::EventId.eq(event_id))
            .exec(&self.conn)
            .await
            .context("remove_entry failed")?;
        Ok(())
    }

    async fn remove_entries_for_user(&self, user_id: i64) -> anyhow::Result<()> {
        user_event::Entity::delete_many()
            .filter(user_event::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("remove_entries_for_user failed")?;
        Ok(())
    }

    async fn remove_entries_for_event(&self, event_id: i64) -> anyhow::Result<()> {
        user_event::Entity::delete_many()
            .filter(user_event::Column::EventId.eq(event_id))
            .exec(&self.conn)
            .await
            .context("remove_entries_for_event failed")?;
        Ok(())
    }

    async fn apply_replica_update(&self, update: ReplicaUpdate) -> anyhow::Result<()> {
        let existing = event_replica::Entity::find_by_id(update.event_id)
            .one(&self.conn)
            .await
            .context("replica lookup failed")?;
        if existing.is_none() {
            return Ok(());
        }
        let m = event_replica::ActiveModel {
            event_id: Set(update.event_id),
            name: Set(update.name),
            description: Set(update.description),
            location: Set(update.location),
            tags: Set(tags_to_column(&update.tags)?),
            created_by: Set(update.created_by),
            datetime: Set(update.datetime),
        };
        let _ = m
            .update(&self.conn)
            .await
            .context("apply_replica_update failed")?;
        Ok(())
    }

    async fn delete_replica(&self, event_id: i64) -> anyhow::Result<()> {
        event_replica::Entity::delete_many()
            .filter(event_replica::Column::EventId.eq(event_id))
            .exec(&self.conn)
            .await
            .context("delete_replica failed")?;
        Ok(())
    }

    async fn list_window(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let entries = user_event::Entity::find()
            .filter(user_event::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
            .context("entry scan failed")?;
        let event_ids: Vec<i64> = entries.into_iter().map(|e| e.event_id).collect();
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = event_replica::Entity::find()
            .filter(event_replica::Column::EventId.is_in(event_ids))
            .filter(event_replica::Column::Datetime.gte(from))
            .filter(event_replica::Column::Datetime.lt(to))
            .order_by_asc(event_replica::Column::Datetime)
            .order_by_asc(event_replica::Column::EventId)
            .all(&self.conn)
            .await
            .context("list_window failed")?;
        rows.into_iter().map(row_to_contract).collect()
    }
}
