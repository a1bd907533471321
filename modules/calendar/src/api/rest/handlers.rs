use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};

use runtime::Principal;

use crate::api::rest::dto::{AddToCalendarReq, CalendarEventDto, CalendarQuery};
use crate::api::rest::error::ApiError;
use crate::domain::service::CalendarService;

pub async fn get_calendar(
    Extension(svc): Extension<Arc<CalendarService>>,
    Principal(caller): Principal,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEventDto>>, ApiError> {
    let events = svc.get_calendar(caller, query.year, query.month).await?;
    Ok(Json(events.into_iter().map(CalendarEventDto::from).collect()))
}

pub async fn add_to_calendar(
    Extension(svc): Extension<Arc<CalendarService>>,
    Principal(caller): Principal,
    Json(req): Json<AddToCalendarReq>,
) -> Result<StatusCode, ApiError> {
    svc.add_to_calendar(caller, req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_from_calendar(
    Extension(svc): Extension<Arc<CalendarService>>,
    Principal(caller): Principal,
    Path(event_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    svc.remove_from_calendar(caller, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
