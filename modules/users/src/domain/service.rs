use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::contract::{NewUser, User, UsersError};
use crate::domain::repo::UsersRepository;
use syncmq::{ChangeEvent, DeleteUser, SyncProducer};

pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    producer: SyncProducer,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>, producer: SyncProducer) -> Self {
        Self { repo, producer }
    }

    #[instrument(name = "users.create_user", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError> {
        if new_user.email.trim().is_empty() || !new_user.email.contains('@') {
            return Err(UsersError::invalid_argument("a valid email is required"));
        }
        if new_user.display_name.trim().is_empty() {
            return Err(UsersError::invalid_argument("display name must not be empty"));
        }

        let taken = self
            .repo
            .email_exists(&new_user.email)
            .await
            .map_err(internal)?;
        if taken {
            return Err(UsersError::conflict(new_user.email));
        }

        let user = self.repo.insert(new_user).await.map_err(internal)?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(name = "users.get_user", skip(self))]
    pub async fn get_user(&self, id: i64) -> Result<User, UsersError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(UsersError::NotFound { id })
    }

    /// Delete the caller's own account and announce it so dependent
    /// services drop the rows they hold for the user.
    #[instrument(name = "users.delete_user", skip(self))]
    pub async fn delete_user(&self, caller: i64) -> Result<(), UsersError> {
        let deleted = self.repo.delete(caller).await.map_err(internal)?;
        if !deleted {
            return Err(UsersError::not_found(caller));
        }

        self.producer
            .publish(&ChangeEvent::DeleteUser(DeleteUser { user_id: caller }))
            .await?;
        info!(user_id = caller, "user deleted");
        Ok(())
    }
}

fn internal(e: anyhow::Error) -> UsersError {
    error!(error = %e, "users repository failure");
    UsersError::internal()
}
