use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use runtime::Principal;

use crate::api::rest::dto::{CreateUserReq, UserDto};
use crate::api::rest::error::ApiError;
use crate::domain::service::UsersService;

pub async fn create_user(
    Extension(svc): Extension<Arc<UsersService>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = svc.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

pub async fn get_user(
    Extension(svc): Extension<Arc<UsersService>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    let user = svc.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Account deletion is self-service: the principal is the deleted user.
pub async fn delete_me(
    Extension(svc): Extension<Arc<UsersService>>,
    Principal(caller): Principal,
) -> Result<StatusCode, ApiError> {
    svc.delete_user(caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
