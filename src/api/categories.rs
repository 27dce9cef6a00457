use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_pagination;
use super::{ApiError, ApiResponse, AppState, CategoryDto, Page};
use crate::db::{CategoryChanges, CategoryListQuery, NewCategory};
use crate::services::{CategoryError, CategoryService};

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound => Self::NotFound("Category not found".to_string()),
            CategoryError::SlugTaken => {
                Self::Conflict("A category with this slug already exists".to_string())
            }
            CategoryError::Validation(msg) => Self::validation(msg),
            CategoryError::Database(msg) | CategoryError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub description_zh: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub description_zh: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<String>,
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListCategoriesParams>,
) -> Result<Json<ApiResponse<Page<CategoryDto>>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    validate_pagination(page, page_size)?;

    let categories = state
        .category_service()
        .list_categories(CategoryListQuery {
            page,
            page_size,
            search: params.search,
        })
        .await?;

    Ok(Json(ApiResponse::success(categories)))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state.category_service().get_category(&id).await?;

    Ok(Json(ApiResponse::success(category)))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state
        .category_service()
        .create_category(NewCategory {
            name_zh: payload.name_zh,
            name_en: payload.name_en,
            slug: payload.slug,
            description_zh: payload.description_zh,
            description_en: payload.description_en,
            sort_order: payload.sort_order,
        })
        .await?;

    Ok(Json(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state
        .category_service()
        .update_category(
            &id,
            CategoryChanges {
                name_zh: payload.name_zh,
                name_en: payload.name_en,
                slug: payload.slug,
                description_zh: payload.description_zh,
                description_en: payload.description_en,
                sort_order: payload.sort_order,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(category)))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.category_service().delete_category(&id).await?;

    Ok(Json(ApiResponse::success(())))
}
