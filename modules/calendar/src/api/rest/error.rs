use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::contract::CalendarError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(pub CalendarError);

impl From<CalendarError> for ApiError {
    fn from(e: CalendarError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CalendarError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            CalendarError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
