use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::contract::EventsError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Transport wrapper so handlers can use `?` on domain errors.
pub struct ApiError(pub EventsError);

impl From<EventsError> for ApiError {
    fn from(e: EventsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EventsError::InvalidArgument { .. } | EventsError::InvalidCursor { .. } => {
                StatusCode::BAD_REQUEST
            }
            EventsError::NotFound { .. } => StatusCode::NOT_FOUND,
            EventsError::Conflict { .. } => StatusCode::CONFLICT,
            EventsError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            EventsError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            EventsError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
