use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::contract::UsersError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(pub UsersError);

impl From<UsersError> for ApiError {
    fn from(e: UsersError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            UsersError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            UsersError::NotFound { .. } => StatusCode::NOT_FOUND,
            UsersError::Conflict { .. } => StatusCode::CONFLICT,
            UsersError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            UsersError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
