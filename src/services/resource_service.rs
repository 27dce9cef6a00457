//! Domain service for uploaded file resources.
//!
//! Resource rows describe files under the public static root; directory
//! moves keep the row and the file in step.

use thiserror::Error;

use crate::api::types::{Page, ResourceDto};
use crate::db::{NewResource, ResourceListQuery};
use crate::entities::resources::Directory;

/// Errors specific to resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource not found")]
    NotFound,

    #[error("File not found")]
    FileMissing,

    #[error("Failed to move file")]
    MoveFailed,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ResourceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ResourceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for resources.
#[async_trait::async_trait]
pub trait ResourceService: Send + Sync {
    /// Gets a single resource by id.
    async fn get_resource(&self, id: &str) -> Result<ResourceDto, ResourceError>;

    /// Lists resources matching the query, newest first.
    async fn list_resources(
        &self,
        query: ResourceListQuery,
    ) -> Result<Page<ResourceDto>, ResourceError>;

    /// Records an already-uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FileMissing`] if the path does not exist
    /// under the public static root.
    async fn create_resource(&self, new: NewResource) -> Result<ResourceDto, ResourceError>;

    /// Moves a resource between directories, renaming the file on disk
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MoveFailed`] if the rename fails; the
    /// stored row is left untouched.
    async fn update_resource(
        &self,
        id: &str,
        directory: Option<Directory>,
    ) -> Result<ResourceDto, ResourceError>;

    /// Deletes a resource row and, best effort, its file.
    async fn delete_resource(&self, id: &str) -> Result<(), ResourceError>;
}
