use async_trait::async_trait;

use crate::contract::{NewUser, User};

/// Persistence port for the user service.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;

    /// Insert and return the stored record with its assigned id.
    async fn insert(&self, user: NewUser) -> anyhow::Result<User>;

    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
