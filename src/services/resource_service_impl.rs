//! `SeaORM` implementation of the `ResourceService` trait.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::api::types::{Page, ResourceDto};
use crate::db::{NewResource, ResourceListQuery, Store};
use crate::entities::resources::Directory;
use crate::services::resource_service::{ResourceError, ResourceService};

pub struct SeaOrmResourceService {
    store: Store,
    public_dir: PathBuf,
}

impl SeaOrmResourceService {
    #[must_use]
    pub const fn new(store: Store, public_dir: PathBuf) -> Self {
        Self { store, public_dir }
    }
}

#[async_trait]
impl ResourceService for SeaOrmResourceService {
    async fn get_resource(&self, id: &str) -> Result<ResourceDto, ResourceError> {
        let resource = self
            .store
            .get_resource_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound)?;

        Ok(ResourceDto::from(resource))
    }

    async fn list_resources(
        &self,
        query: ResourceListQuery,
    ) -> Result<Page<ResourceDto>, ResourceError> {
        let (resources, total) = self.store.list_resources(&query).await?;
        let items = resources.into_iter().map(ResourceDto::from).collect();

        Ok(Page::new(items, total, query.page, query.page_size))
    }

    async fn create_resource(&self, new: NewResource) -> Result<ResourceDto, ResourceError> {
        if new.file_name.is_empty()
            || new.file_path.is_empty()
            || new.file_size.is_empty()
            || new.mime_type.is_empty()
        {
            return Err(ResourceError::Validation(
                "File name, path, size, and MIME type are required".to_string(),
            ));
        }

        // The upload endpoint wrote the file already; refuse to record a
        // path that is not actually on disk.
        let on_disk = self.public_dir.join(&new.file_path);
        if fs::metadata(&on_disk).await.is_err() {
            return Err(ResourceError::FileMissing);
        }

        let resource = self.store.create_resource(new).await?;

        Ok(ResourceDto::from(resource))
    }

    async fn update_resource(
        &self,
        id: &str,
        directory: Option<Directory>,
    ) -> Result<ResourceDto, ResourceError> {
        let resource = self
            .store
            .get_resource_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound)?;

        let updated = match directory {
            Some(target) if target != resource.directory => {
                let new_path = match target {
                    Directory::Root => resource.file_name.clone(),
                    Directory::Upload => format!("upload/{}", resource.file_name),
                };

                // Rename on disk first; the row is only rewritten once
                // the file is in place.
                let moved: anyhow::Result<_> = async {
                    if target == Directory::Upload {
                        fs::create_dir_all(self.public_dir.join(Directory::Upload.as_str()))
                            .await?;
                    }
                    fs::rename(
                        self.public_dir.join(&resource.file_path),
                        self.public_dir.join(&new_path),
                    )
                    .await?;

                    self.store
                        .update_resource(id, Some(target), Some(new_path))
                        .await
                }
                .await;

                match moved {
                    Ok(updated) => updated,
                    Err(err) => {
                        tracing::error!("Failed to move resource {}: {}", id, err);
                        return Err(ResourceError::MoveFailed);
                    }
                }
            }
            other => self.store.update_resource(id, other, None).await?,
        };

        Ok(ResourceDto::from(updated))
    }

    async fn delete_resource(&self, id: &str) -> Result<(), ResourceError> {
        let resource = self
            .store
            .get_resource_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound)?;

        // A missing file does not block the delete.
        if let Err(err) = fs::remove_file(self.public_dir.join(&resource.file_path)).await {
            tracing::warn!("Could not remove file for resource {}: {}", id, err);
        }

        self.store.delete_resource(id).await?;

        Ok(())
    }
}
