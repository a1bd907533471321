use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Row shape for the `events` table. `tags` holds the tag list as a
/// JSON array of wire names; the mapper translates to and from the
/// typed contract model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: String,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
    pub image_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
