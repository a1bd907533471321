use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of event categories. The serialized names are a wire
/// contract shared with dependent services and existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "ARTIFICIAL INTELLIGENCE")]
    ArtificialIntelligence,
    #[serde(rename = "WEB APPS")]
    WebApps,
    #[serde(rename = "CRYPTOGRAPHY")]
    Cryptography,
    #[serde(rename = "ROBOTICS")]
    Robotics,
    #[serde(rename = "COMPETITIVE PROGRAMMING")]
    CompetitiveProgramming,
    #[serde(rename = "EMBEDDED SYSTEMS")]
    EmbeddedSystems,
    #[serde(rename = "UX DESIGN")]
    UxDesign,
    #[serde(rename = "NETWORKS")]
    Networks,
    #[serde(rename = "DATABASES")]
    Databases,
    #[serde(rename = "SYSTEM_DESIGN")]
    SystemDesign,
}

impl Tag {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Tag::ArtificialIntelligence => "ARTIFICIAL INTELLIGENCE",
            Tag::WebApps => "WEB APPS",
            Tag::Cryptography => "CRYPTOGRAPHY",
            Tag::Robotics => "ROBOTICS",
            Tag::CompetitiveProgramming => "COMPETITIVE PROGRAMMING",
            Tag::EmbeddedSystems => "EMBEDDED SYSTEMS",
            Tag::UxDesign => "UX DESIGN",
            Tag::Networks => "NETWORKS",
            Tag::Databases => "DATABASES",
            Tag::SystemDesign => "SYSTEM_DESIGN",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Some(match s {
            "ARTIFICIAL INTELLIGENCE" => Tag::ArtificialIntelligence,
            "WEB APPS" => Tag::WebApps,
            "CRYPTOGRAPHY" => Tag::Cryptography,
            "ROBOTICS" => Tag::Robotics,
            "COMPETITIVE PROGRAMMING" => Tag::CompetitiveProgramming,
            "EMBEDDED SYSTEMS" => Tag::EmbeddedSystems,
            "UX DESIGN" => Tag::UxDesign,
            "NETWORKS" => Tag::Networks,
            "DATABASES" => Tag::Databases,
            "SYSTEM_DESIGN" => Tag::SystemDesign,
            _ => return None,
        })
    }
}

/// Stored event record. `(name, datetime)` is unique at creation time.
/// `image_hash` references content in the blob store; it is resolved to
/// content on the way out (see [`EventView`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
    pub image_hash: String,
}

/// Event as returned to callers: the image reference has been resolved
/// to content (or the default placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
    pub image: String,
}

impl EventView {
    pub fn from_event(event: Event, image: String) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            location: event.location,
            tags: event.tags,
            created_by: event.created_by,
            datetime: event.datetime,
            image,
        }
    }
}

/// Input for event creation. `image` is the raw content to upload, not
/// a hash; absent content maps to the blob store's default.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub datetime: DateTime<Utc>,
    pub image: Option<String>,
}

/// Partial update for an owned event.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub datetime: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// One-of filter union selecting the query strategy. Exactly one
/// variant is active per request; supplying more than one filter kind
/// at once is a caller error, enforced where the request is decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum EventsFilter {
    /// Free-text search ranked by edit distance to the event name.
    Search { query: String },
    /// Ranked by the number of tags shared with the query set.
    Relevance { tags: Vec<Tag> },
    /// Chronological, restricted to the inclusive `[from, to]` range;
    /// either bound may be omitted, but not both.
    DateRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}
