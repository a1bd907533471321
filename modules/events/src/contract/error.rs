use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that are safe to expose to callers of this module. Typed so
/// the API layer can distinguish bad input from not-found from
/// forbidden without string matching.
#[derive(Error, Debug, Clone)]
pub enum EventsError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid cursor: {message}")]
    InvalidCursor { message: String },

    #[error("event not found: {id}")]
    NotFound { id: i64 },

    #[error("event '{name}' at {datetime} already exists")]
    Conflict {
        name: String,
        datetime: DateTime<Utc>,
    },

    #[error("caller does not own event {id}")]
    PermissionDenied { id: i64 },

    #[error("collaborator unavailable: {message}")]
    Unavailable { message: String },

    #[error("internal error")]
    Internal,
}

impl EventsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_cursor(message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            message: message.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(name: String, datetime: DateTime<Utc>) -> Self {
        Self::Conflict { name, datetime }
    }

    pub fn permission_denied(id: i64) -> Self {
        Self::PermissionDenied { id }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<pagecore::CursorError> for EventsError {
    fn from(e: pagecore::CursorError) -> Self {
        Self::invalid_cursor(e.to_string())
    }
}

impl From<syncmq::BrokerError> for EventsError {
    fn from(e: syncmq::BrokerError) -> Self {
        Self::unavailable(e.to_string())
    }
}
