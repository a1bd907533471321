//! SeaORM-backed implementation of the events persistence port.
//!
//! Generic over `C: ConnectionTrait` so it works with a plain
//! `DatabaseConnection` or a transactional one.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::contract::Event;
use crate::domain::repo::{ChronoKey, DatetimeRange, EventsRepository, NewStoredEvent};
use crate::infra::storage::entity::{ActiveModel as EventAM, Column, Entity as EventRow};
use crate::infra::storage::mapper::{row_to_contract, tags_to_column};

pub struct SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// `(datetime, id)` strictly greater than the keyset position.
fn after_chrono(key: ChronoKey) -> Condition {
    Condition::any()
        .add(Column::Datetime.gt(key.datetime))
        .add(
            Condition::all()
                .add(Column::Datetime.eq(key.datetime))
                .add(Column::Id.gt(key.id)),
        )
}

#[async_trait::async_trait]
impl<C> EventsRepository for SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Event>> {
        let found = EventRow::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        found.map(row_to_contract).transpose()
    }

    async fn exists_by_name_and_datetime(
        &self,
        name: &str,
        datetime: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let count = EventRow::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Datetime.eq(datetime))
            .count(&self.conn)
            .await
            .context("exists_by_name_and_datetime failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, event: NewStoredEvent) -> anyhow::Result<Event> {
        let m = EventAM {
            id: NotSet,
            name: Set(event.name),
            description: Set(event.description),
            location: Set(event.location),
            tags: Set(tags_to_column(&event.tags)?),
            created_by: Set(event.created_by),
            datetime: Set(event.datetime),
            image_hash: Set(event.image_hash),
        };
        let row = m.insert(&self.conn).await.context("insert failed")?;
        row_to_contract(row)
    }

    async fn update(&self, event: Event) -> anyhow::Result<()> {
        let m = EventAM {
            id: Set(event.id),
            name: Set(event.name),
            description: Set(event.description),
            location: Set(event.location),
            tags: Set(tags_to_column(&event.tags)?),
            created_by: Set(event.created_by),
            datetime: Set(event.datetime),
            image_hash: Set(event.image_hash),
        };
        let _ = m.update(&self.conn).await.context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = EventRow::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_chronological(
        &self,
        range: DatetimeRange,
        after: Option<ChronoKey>,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Event>> {
        let mut query = EventRow::find();
        if let Some(from) = range.from {
            query = query.filter(Column::Datetime.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(Column::Datetime.lte(to));
        }
        if let Some(key) = after {
            query = query.filter(after_chrono(key));
        }
        query = query
            .order_by_asc(Column::Datetime)
            .order_by_asc(Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("list_chronological failed")?;
        rows.into_iter().map(row_to_contract).collect()
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Event>> {
        let rows = EventRow::find()
            .filter(Column::Datetime.gt(now))
            .order_by_asc(Column::Datetime)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list_upcoming failed")?;
        rows.into_iter().map(row_to_contract).collect()
    }

    async fn list_by_owner(
        &self,
        owner: i64,
        after_id: i64,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Event>> {
        let mut query = EventRow::find()
            .filter(Column::CreatedBy.eq(owner))
            .filter(Column::Id.gt(after_id))
            .order_by_asc(Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.conn).await.context("list_by_owner failed")?;
        rows.into_iter().map(row_to_contract).collect()
    }
}
