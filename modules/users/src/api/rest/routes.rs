use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::UsersService;

pub fn router(svc: Arc<UsersService>) -> Router {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/me", delete(handlers::delete_me))
        .route("/users/{id}", get(handlers::get_user))
        .layer(Extension(svc))
}
