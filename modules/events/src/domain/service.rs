use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::contract::{
    Event, EventPatch, EventView, EventsError, EventsFilter, NewEvent,
};
use crate::domain::ports::BlobStore;
use crate::domain::query::{self, cursor::IdCursor, QueryOutcome};
use crate::domain::repo::{EventsRepository, NewStoredEvent};
use pagecore::{Edge, Page};
use syncmq::{ChangeEvent, DeleteEvent, EditEvent, SyncProducer};

/// Application service for the event module: owns validation, ownership
/// checks, blob resolution and change publication. Storage and the
/// broker stay behind ports.
pub struct EventsService {
    repo: Arc<dyn EventsRepository>,
    blobs: Arc<dyn BlobStore>,
    producer: SyncProducer,
}

impl EventsService {
    pub fn new(
        repo: Arc<dyn EventsRepository>,
        blobs: Arc<dyn BlobStore>,
        producer: SyncProducer,
    ) -> Self {
        Self {
            repo,
            blobs,
            producer,
        }
    }

    /// Paginated listing under the strategy selected by `filter`.
    #[instrument(name = "events.get_events", skip(self, filter))]
    pub async fn get_events(
        &self,
        filter: Option<EventsFilter>,
        first: Option<u64>,
        after: Option<String>,
    ) -> Result<Page<EventView>, EventsError> {
        let outcome = query::execute(
            self.repo.as_ref(),
            filter.as_ref(),
            first,
            after.as_deref(),
            Utc::now(),
        )
        .await?;
        self.resolve_page(outcome).await
    }

    /// Events created by the caller, id ascending.
    #[instrument(name = "events.my_events", skip(self))]
    pub async fn my_events(
        &self,
        owner: i64,
        first: Option<u64>,
        after: Option<String>,
    ) -> Result<Page<EventView>, EventsError> {
        if first == Some(0) {
            return Err(EventsError::invalid_argument("page size must be at least 1"));
        }
        let after_id = after
            .as_deref()
            .map(pagecore::decode_cursor::<IdCursor>)
            .transpose()?
            .map_or(0, |c| c.id);

        let mut events = self
            .repo
            .list_by_owner(owner, after_id, first.map(|f| f.saturating_add(1)))
            .await
            .map_err(internal)?;
        let has_next_page = matches!(first, Some(f) if events.len() as u64 > f);
        if has_next_page {
            events.pop();
        }

        let items = events
            .into_iter()
            .map(|e| {
                let token = pagecore::encode_cursor(&IdCursor { id: e.id });
                (e, token)
            })
            .collect();
        self.resolve_page(QueryOutcome {
            items,
            has_next_page,
        })
        .await
    }

    #[instrument(name = "events.get_event", skip(self))]
    pub async fn get_event(&self, id: i64) -> Result<EventView, EventsError> {
        let event = self.load(id).await?;
        Ok(self.resolve(event).await)
    }

    /// Create an event. `(name, datetime)` must not collide with an
    /// existing event. The image is uploaded before the insert so the
    /// stored record always carries a resolvable hash.
    #[instrument(name = "events.create_event", skip(self, new_event), fields(name = %new_event.name))]
    pub async fn create_event(
        &self,
        creator: i64,
        new_event: NewEvent,
    ) -> Result<EventView, EventsError> {
        if new_event.name.trim().is_empty() {
            return Err(EventsError::invalid_argument("event name must not be empty"));
        }

        let taken = self
            .repo
            .exists_by_name_and_datetime(&new_event.name, new_event.datetime)
            .await
            .map_err(internal)?;
        if taken {
            return Err(EventsError::conflict(new_event.name, new_event.datetime));
        }

        let image_hash = self.blobs.upload(new_event.image.as_deref()).await;
        let event = self
            .repo
            .insert(NewStoredEvent {
                name: new_event.name,
                description: new_event.description,
                location: new_event.location,
                tags: new_event.tags,
                created_by: Some(creator),
                datetime: new_event.datetime,
                image_hash,
            })
            .await
            .map_err(internal)?;

        info!(event_id = event.id, "event created");
        Ok(self.resolve(event).await)
    }

    /// Apply a partial update to an event owned by the caller, then
    /// publish the new state for dependent services.
    #[instrument(name = "events.edit_event", skip(self, patch))]
    pub async fn edit_event(
        &self,
        caller: i64,
        id: i64,
        patch: EventPatch,
    ) -> Result<EventView, EventsError> {
        let mut event = self.load(id).await?;
        self.check_owner(&event, caller)?;

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(EventsError::invalid_argument("event name must not be empty"));
            }
            event.name = name;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(location) = patch.location {
            event.location = location;
        }
        if let Some(tags) = patch.tags {
            event.tags = tags;
        }
        if let Some(datetime) = patch.datetime {
            event.datetime = datetime;
        }
        if let Some(image) = patch.image {
            event.image_hash = self.blobs.upload(Some(&image)).await;
        }

        self.repo.update(event.clone()).await.map_err(internal)?;
        self.publish_edit(&event).await?;

        info!(event_id = id, "event updated");
        Ok(self.resolve(event).await)
    }

    /// Delete an event owned by the caller and announce the removal.
    #[instrument(name = "events.delete_event", skip(self))]
    pub async fn delete_event(&self, caller: i64, id: i64) -> Result<(), EventsError> {
        let event = self.load(id).await?;
        self.check_owner(&event, caller)?;

        let deleted = self.repo.delete(id).await.map_err(internal)?;
        if !deleted {
            return Err(EventsError::not_found(id));
        }

        self.producer
            .publish(&ChangeEvent::DeleteEvent(DeleteEvent { event_id: id }))
            .await?;
        info!(event_id = id, "event deleted");
        Ok(())
    }

    async fn load(&self, id: i64) -> Result<Event, EventsError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(EventsError::NotFound { id })
    }

    fn check_owner(&self, event: &Event, caller: i64) -> Result<(), EventsError> {
        if event.created_by != Some(caller) {
            return Err(EventsError::permission_denied(event.id));
        }
        Ok(())
    }

    async fn publish_edit(&self, event: &Event) -> Result<(), EventsError> {
        let change = ChangeEvent::EditEvent(EditEvent {
            event_id: event.id,
            name: event.name.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            tags: event.tags.iter().map(|t| t.as_wire().to_owned()).collect(),
            created_by: event.created_by,
            datetime: event.datetime,
        });
        self.producer.publish(&change).await?;
        Ok(())
    }

    async fn resolve(&self, event: Event) -> EventView {
        let image = self.blobs.fetch(&event.image_hash).await;
        EventView::from_event(event, image)
    }

    async fn resolve_page(&self, outcome: QueryOutcome) -> Result<Page<EventView>, EventsError> {
        let mut edges = Vec::with_capacity(outcome.items.len());
        for (event, cursor) in outcome.items {
            let node = self.resolve(event).await;
            edges.push(Edge { cursor, node });
        }
        Ok(Page::new(edges, outcome.has_next_page))
    }
}

fn internal(e: anyhow::Error) -> EventsError {
    error!(error = %e, "events repository failure");
    EventsError::internal()
}
