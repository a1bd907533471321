use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::{EventPatch, EventView, EventsError, EventsFilter, NewEvent, Tag};

/// Event representation on the wire. `image` is resolved content, not a
/// hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
    pub image: String,
}

impl From<EventView> for EventDto {
    fn from(view: EventView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            description: view.description,
            location: view.location,
            tags: view.tags,
            created_by: view.created_by,
            datetime: view.datetime,
            image: view.image,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventReq {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateEventReq> for NewEvent {
    fn from(req: CreateEventReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            location: req.location,
            tags: req.tags,
            datetime: req.datetime,
            image: req.image,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventReq {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub datetime: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl From<UpdateEventReq> for EventPatch {
    fn from(req: UpdateEventReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            location: req.location,
            tags: req.tags,
            datetime: req.datetime,
            image: req.image,
        }
    }
}

/// Query parameters for the paginated listing. At most one filter kind
/// (`search`, `tags`, `from`/`to`) may be supplied per request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsQuery {
    pub first: Option<u64>,
    pub after: Option<String>,
    pub search: Option<String>,
    /// Comma-separated tag wire names.
    pub tags: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl EventsQuery {
    /// Decode the one-of filter union, rejecting combined filter kinds
    /// and unknown tag names.
    pub fn into_filter(self) -> Result<Option<EventsFilter>, EventsError> {
        let kinds = usize::from(self.search.is_some())
            + usize::from(self.tags.is_some())
            + usize::from(self.from.is_some() || self.to.is_some());
        if kinds > 1 {
            return Err(EventsError::invalid_argument(
                "at most one of search, tags, from/to may be supplied",
            ));
        }

        if let Some(query) = self.search {
            return Ok(Some(EventsFilter::Search { query }));
        }
        if let Some(tags) = self.tags {
            let tags = tags
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Tag::from_wire(s)
                        .ok_or_else(|| EventsError::invalid_argument(format!("unknown tag: {s}")))
                })
                .collect::<Result<Vec<Tag>, _>>()?;
            return Ok(Some(EventsFilter::Relevance { tags }));
        }
        if self.from.is_some() || self.to.is_some() {
            return Ok(Some(EventsFilter::DateRange {
                from: self.from,
                to: self.to,
            }));
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub first: Option<u64>,
    pub after: Option<String>,
}
