use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::contract::{NewUser, User};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserRow, Model};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn row_to_contract(row: Model) -> User {
    User {
        id: row.id,
        email: row.email,
        display_name: row.display_name,
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = UserRow::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(row_to_contract))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = UserRow::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, user: NewUser) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            email: Set(user.email),
            display_name: Set(user.display_name),
        };
        let row = m.insert(&self.conn).await.context("insert failed")?;
        Ok(row_to_contract(row))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = UserRow::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
