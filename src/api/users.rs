use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user_id;
use super::validation::{parse_status_filter, validate_pagination};
use super::{ApiError, ApiResponse, AppState, Page, UserDto};
use crate::db::{UserChanges, UserListQuery};
use crate::services::{UserError, UserService};

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::NotFound("User not found".to_string()),
            UserError::AlreadyExists => Self::Conflict("User already exists".to_string()),
            UserError::Forbidden(msg) => Self::Forbidden(msg),
            UserError::IncorrectPassword => {
                Self::Unauthorized("Current password is incorrect".to_string())
            }
            UserError::Validation(msg) => Self::validation(msg),
            UserError::Database(msg) | UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStatusRequest {
    pub is_active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStatusResponse {
    pub id: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<Page<UserDto>>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    validate_pagination(page, page_size)?;

    let is_active = parse_status_filter(params.status.as_deref().unwrap_or("all"))?;

    let users = state
        .user_service()
        .list_users(UserListQuery {
            page,
            page_size,
            search: params.search,
            is_active,
            date_from: params.date_from,
            date_to: params.date_to,
        })
        .await?;

    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.user_service().get_user(&id).await?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .user_service()
        .create_user(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .user_service()
        .update_user(
            &id,
            UserChanges {
                name: payload.name,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let acting_user_id = current_user_id(&session).await?;
    state.user_service().delete_user(&id, &acting_user_id).await?;

    Ok(Json(ApiResponse::success(())))
}

/// POST /users/{id}/toggle-status
pub async fn toggle_user_status(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<ToggleStatusRequest>,
) -> Result<Json<ApiResponse<ToggleStatusResponse>>, ApiError> {
    let acting_user_id = current_user_id(&session).await?;
    let user = state
        .user_service()
        .toggle_status(&id, payload.is_active, &acting_user_id)
        .await?;

    Ok(Json(ApiResponse::success(ToggleStatusResponse {
        id: user.id,
        is_active: user.is_active,
    })))
}

/// POST /users/{id}/password
/// Administrative password set; the target's current password is not needed.
pub async fn change_user_password(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<PasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.user_service().set_password(&id, &payload.password).await?;

    Ok(Json(ApiResponse::success(())))
}
