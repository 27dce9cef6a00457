//! Domain service for article categories.

use thiserror::Error;

use crate::api::types::{CategoryDto, Page};
use crate::db::{CategoryChanges, CategoryListQuery, NewCategory};

/// Errors specific to category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found")]
    NotFound,

    #[error("A category with this slug already exists")]
    SlugTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CategoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CategoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for categories.
#[async_trait::async_trait]
pub trait CategoryService: Send + Sync {
    /// Gets a single category by id.
    async fn get_category(&self, id: &str) -> Result<CategoryDto, CategoryError>;

    /// Lists categories matching the query, newest first.
    async fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> Result<Page<CategoryDto>, CategoryError>;

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::SlugTaken`] if the slug is in use.
    async fn create_category(&self, new: NewCategory) -> Result<CategoryDto, CategoryError>;

    /// Applies a partial update.
    async fn update_category(
        &self,
        id: &str,
        changes: CategoryChanges,
    ) -> Result<CategoryDto, CategoryError>;

    /// Deletes a category. Articles in it fall back to "no category".
    async fn delete_category(&self, id: &str) -> Result<(), CategoryError>;
}
