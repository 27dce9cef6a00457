use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user_id;
use super::validation::{parse_directory, parse_directory_filter, validate_pagination};
use super::{ApiError, ApiResponse, AppState, Page, ResourceDto};
use crate::db::{NewResource, ResourceListQuery};
use crate::services::{ResourceError, ResourceService};

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound => Self::NotFound("Resource not found".to_string()),
            ResourceError::FileMissing => Self::NotFound("File not found".to_string()),
            ResourceError::MoveFailed => {
                Self::FileOperationError("Failed to move file".to_string())
            }
            ResourceError::Validation(msg) => Self::validation(msg),
            ResourceError::Database(msg) | ResourceError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourcesParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub directory: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub mime_type: String,
    pub directory: String,
}

#[derive(Deserialize)]
pub struct UpdateResourceRequest {
    pub directory: Option<String>,
}

/// GET /resources
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListResourcesParams>,
) -> Result<Json<ApiResponse<Page<ResourceDto>>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    validate_pagination(page, page_size)?;

    let directory = parse_directory_filter(params.directory.as_deref().unwrap_or("all"))?;

    let resources = state
        .resource_service()
        .list_resources(ResourceListQuery {
            page,
            page_size,
            search: params.search,
            directory,
        })
        .await?;

    Ok(Json(ApiResponse::success(resources)))
}

/// GET /resources/{id}
pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ResourceDto>>, ApiError> {
    let resource = state.resource_service().get_resource(&id).await?;

    Ok(Json(ApiResponse::success(resource)))
}

/// POST /resources
/// Registers a file that already exists under the public directory.
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateResourceRequest>,
) -> Result<Json<ApiResponse<ResourceDto>>, ApiError> {
    let uploaded_by = current_user_id(&session).await?;
    let directory = parse_directory(&payload.directory)?;

    let resource = state
        .resource_service()
        .create_resource(NewResource {
            file_name: payload.file_name,
            file_path: payload.file_path,
            file_size: payload.file_size,
            mime_type: payload.mime_type,
            directory,
            uploaded_by: Some(uploaded_by),
        })
        .await?;

    Ok(Json(ApiResponse::success(resource)))
}

/// PUT /resources/{id}
/// The only mutable field is the directory; everything else is fixed at
/// upload time.
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateResourceRequest>,
) -> Result<Json<ApiResponse<ResourceDto>>, ApiError> {
    let directory = payload
        .directory
        .as_deref()
        .map(parse_directory)
        .transpose()?;

    let resource = state.resource_service().update_resource(&id, directory).await?;

    Ok(Json(ApiResponse::success(resource)))
}

/// DELETE /resources/{id}
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.resource_service().delete_resource(&id).await?;

    Ok(Json(ApiResponse::success(())))
}
