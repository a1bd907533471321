use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::CalendarService;

pub fn router(svc: Arc<CalendarService>) -> Router {
    Router::new()
        .route(
            "/calendar",
            get(handlers::get_calendar).post(handlers::add_to_calendar),
        )
        .route(
            "/calendar/{event_id}",
            axum::routing::delete(handlers::remove_from_calendar),
        )
        .layer(Extension(svc))
}
