use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use syncmq::{ChangeHandler, DeleteEvent, DeleteUser, EditEvent};

use crate::domain::repo::{CalendarRepository, ReplicaUpdate};

/// Applies change events from the owning services to the calendar's
/// local state. Errors propagate to the consumer, which withholds the
/// ack so the message is redelivered; every application is idempotent.
pub struct CalendarChangeHandler {
    repo: Arc<dyn CalendarRepository>,
}

impl CalendarChangeHandler {
    pub fn new(repo: Arc<dyn CalendarRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ChangeHandler for CalendarChangeHandler {
    async fn delete_user(&self, change: DeleteUser) -> anyhow::Result<()> {
        self.repo.remove_entries_for_user(change.user_id).await?;
        info!(user_id = change.user_id, "calendar entries removed for deleted user");
        Ok(())
    }

    async fn edit_event(&self, change: EditEvent) -> anyhow::Result<()> {
        // A replica may be absent when no user has the event on a
        // calendar yet; applying the edit is then a no-op success.
        self.repo
            .apply_replica_update(ReplicaUpdate {
                event_id: change.event_id,
                name: change.name,
                description: change.description,
                location: change.location,
                tags: change.tags,
                created_by: change.created_by,
                datetime: change.datetime,
            })
            .await
    }

    async fn delete_event(&self, change: DeleteEvent) -> anyhow::Result<()> {
        // Join rows first, then the replica: the cascade is explicit so
        // a crash between the two steps leaves a state the redelivered
        // message completes.
        self.repo.remove_entries_for_event(change.event_id).await?;
        self.repo.delete_replica(change.event_id).await?;
        info!(event_id = change.event_id, "replica removed for deleted event");
        Ok(())
    }
}
