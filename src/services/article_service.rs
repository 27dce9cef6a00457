//! Domain service for bilingual articles.

use thiserror::Error;

use crate::api::types::{ArticleDto, Page};
use crate::db::{ArticleChanges, ArticleListQuery, NewArticle};

/// Errors specific to article operations.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article not found")]
    NotFound,

    #[error("An article with this slug already exists")]
    SlugTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ArticleError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ArticleError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for articles.
#[async_trait::async_trait]
pub trait ArticleService: Send + Sync {
    /// Gets a single article by id, with category names joined in.
    async fn get_article(&self, id: &str) -> Result<ArticleDto, ArticleError>;

    /// Gets a single article by slug, with category names joined in.
    async fn get_article_by_slug(&self, slug: &str) -> Result<ArticleDto, ArticleError>;

    /// Lists articles matching the query, newest first.
    async fn list_articles(&self, query: ArticleListQuery)
    -> Result<Page<ArticleDto>, ArticleError>;

    /// Creates an article. New articles never carry a publication
    /// timestamp, even when created already published.
    ///
    /// # Errors
    ///
    /// Returns [`ArticleError::SlugTaken`] if the slug is in use.
    async fn create_article(&self, new: NewArticle) -> Result<ArticleDto, ArticleError>;

    /// Applies a partial update.
    async fn update_article(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<ArticleDto, ArticleError>;

    /// Deletes an article.
    async fn delete_article(&self, id: &str) -> Result<(), ArticleError>;

    /// Flips the publish flag, setting or clearing the publication
    /// timestamp in the same write.
    async fn toggle_publish(&self, id: &str) -> Result<ArticleDto, ArticleError>;
}
