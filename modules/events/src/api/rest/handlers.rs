use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::info;

use runtime::Principal;

use crate::api::rest::dto::{CreateEventReq, EventDto, EventsQuery, PageQuery, UpdateEventReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::EventsService;
use pagecore::Page;

pub async fn get_events(
    Extension(svc): Extension<Arc<EventsService>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Page<EventDto>>, ApiError> {
    let first = query.first;
    let after = query.after.clone();
    let filter = query.into_filter()?;
    let page = svc.get_events(filter, first, after).await?;
    Ok(Json(page.map_nodes(EventDto::from)))
}

pub async fn my_events(
    Extension(svc): Extension<Arc<EventsService>>,
    Principal(caller): Principal,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<EventDto>>, ApiError> {
    let page = svc.my_events(caller, query.first, query.after).await?;
    Ok(Json(page.map_nodes(EventDto::from)))
}

pub async fn get_event(
    Extension(svc): Extension<Arc<EventsService>>,
    Path(id): Path<i64>,
) -> Result<Json<EventDto>, ApiError> {
    let view = svc.get_event(id).await?;
    Ok(Json(EventDto::from(view)))
}

pub async fn create_event(
    Extension(svc): Extension<Arc<EventsService>>,
    Principal(caller): Principal,
    Json(req): Json<CreateEventReq>,
) -> Result<(StatusCode, Json<EventDto>), ApiError> {
    info!(name = %req.name, "creating event");
    let view = svc.create_event(caller, req.into()).await?;
    Ok((StatusCode::CREATED, Json(EventDto::from(view))))
}

pub async fn update_event(
    Extension(svc): Extension<Arc<EventsService>>,
    Principal(caller): Principal,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEventReq>,
) -> Result<Json<EventDto>, ApiError> {
    let view = svc.edit_event(caller, id, req.into()).await?;
    Ok(Json(EventDto::from(view)))
}

pub async fn delete_event(
    Extension(svc): Extension<Arc<EventsService>>,
    Principal(caller): Principal,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    svc.delete_event(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
