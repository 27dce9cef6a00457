use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user_id;
use super::validation::validate_pagination;
use super::{ApiError, ApiResponse, AppState, ArticleDto, Page};
use crate::db::{ArticleChanges, ArticleListQuery, NewArticle};
use crate::services::{ArticleError, ArticleService};

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound => Self::NotFound("Article not found".to_string()),
            ArticleError::SlugTaken => {
                Self::Conflict("An article with this slug already exists".to_string())
            }
            ArticleError::Validation(msg) => Self::validation(msg),
            ArticleError::Database(msg) | ArticleError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticlesParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title_zh: String,
    pub title_en: String,
    pub content_zh: String,
    pub content_en: String,
    pub slug: String,
    pub category_id: Option<String>,
    pub is_published: Option<bool>,
    pub meta_title_zh: Option<String>,
    pub meta_title_en: Option<String>,
    pub meta_description_zh: Option<String>,
    pub meta_description_en: Option<String>,
    pub meta_keywords_zh: Option<String>,
    pub meta_keywords_en: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title_zh: Option<String>,
    pub title_en: Option<String>,
    pub content_zh: Option<String>,
    pub content_en: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<String>,
    pub is_published: Option<bool>,
    pub meta_title_zh: Option<String>,
    pub meta_title_en: Option<String>,
    pub meta_description_zh: Option<String>,
    pub meta_description_en: Option<String>,
    pub meta_keywords_zh: Option<String>,
    pub meta_keywords_en: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePublishResponse {
    pub id: String,
    pub is_published: bool,
    pub published_at: Option<String>,
}

/// GET /articles
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListArticlesParams>,
) -> Result<Json<ApiResponse<Page<ArticleDto>>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    validate_pagination(page, page_size)?;

    let articles = state
        .article_service()
        .list_articles(ArticleListQuery {
            page,
            page_size,
            search: params.search,
            category_id: params.category_id,
            is_published: params.is_published,
        })
        .await?;

    Ok(Json(ApiResponse::success(articles)))
}

/// GET /articles/published
/// Public listing; the publish filter is forced regardless of what the
/// caller asks for.
pub async fn list_published_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListArticlesParams>,
) -> Result<Json<ApiResponse<Page<ArticleDto>>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    validate_pagination(page, page_size)?;

    let articles = state
        .article_service()
        .list_articles(ArticleListQuery {
            page,
            page_size,
            search: params.search,
            category_id: params.category_id,
            is_published: Some(true),
        })
        .await?;

    Ok(Json(ApiResponse::success(articles)))
}

/// GET /articles/{id}
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    let article = state.article_service().get_article(&id).await?;

    Ok(Json(ApiResponse::success(article)))
}

/// GET /articles/slug/{slug}
pub async fn get_article_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    let article = state.article_service().get_article_by_slug(&slug).await?;

    Ok(Json(ApiResponse::success(article)))
}

/// POST /articles
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    // The author is whoever is logged in, not a field of the payload.
    let author_id = current_user_id(&session).await?;

    let article = state
        .article_service()
        .create_article(NewArticle {
            title_zh: payload.title_zh,
            title_en: payload.title_en,
            content_zh: payload.content_zh,
            content_en: payload.content_en,
            slug: payload.slug,
            category_id: payload.category_id,
            author_id: Some(author_id),
            is_published: payload.is_published.unwrap_or(false),
            meta_title_zh: payload.meta_title_zh,
            meta_title_en: payload.meta_title_en,
            meta_description_zh: payload.meta_description_zh,
            meta_description_en: payload.meta_description_en,
            meta_keywords_zh: payload.meta_keywords_zh,
            meta_keywords_en: payload.meta_keywords_en,
            og_image: payload.og_image,
        })
        .await?;

    Ok(Json(ApiResponse::success(article)))
}

/// PUT /articles/{id}
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleDto>>, ApiError> {
    let article = state
        .article_service()
        .update_article(
            &id,
            ArticleChanges {
                title_zh: payload.title_zh,
                title_en: payload.title_en,
                content_zh: payload.content_zh,
                content_en: payload.content_en,
                slug: payload.slug,
                category_id: payload.category_id,
                is_published: payload.is_published,
                meta_title_zh: payload.meta_title_zh,
                meta_title_en: payload.meta_title_en,
                meta_description_zh: payload.meta_description_zh,
                meta_description_en: payload.meta_description_en,
                meta_keywords_zh: payload.meta_keywords_zh,
                meta_keywords_en: payload.meta_keywords_en,
                og_image: payload.og_image,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(article)))
}

/// DELETE /articles/{id}
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.article_service().delete_article(&id).await?;

    Ok(Json(ApiResponse::success(())))
}

/// POST /articles/{id}/toggle-publish
pub async fn toggle_publish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TogglePublishResponse>>, ApiError> {
    let article = state.article_service().toggle_publish(&id).await?;

    Ok(Json(ApiResponse::success(TogglePublishResponse {
        id: article.id,
        is_published: article.is_published,
        published_at: article.published_at,
    })))
}
