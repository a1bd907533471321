use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::EventsService;

/// REST surface of the event module. The service is injected via an
/// `Extension` layer so the router composes into any host application.
pub fn router(svc: Arc<EventsService>) -> Router {
    Router::new()
        .route("/events", get(handlers::get_events).post(handlers::create_event))
        .route("/events/mine", get(handlers::my_events))
        .route(
            "/events/{id}",
            get(handlers::get_event)
                .patch(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .layer(Extension(svc))
}
