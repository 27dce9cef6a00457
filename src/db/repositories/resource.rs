use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::resources::{self, Directory};

#[derive(Debug, Clone, Default)]
pub struct ResourceListQuery {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
    pub directory: Option<Directory>,
}

#[derive(Debug, Clone)]
pub struct NewResource {
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub mime_type: String,
    pub directory: Directory,
    pub uploaded_by: Option<String>,
}

pub struct ResourceRepository {
    conn: DatabaseConnection,
}

impl ResourceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<resources::Model>> {
        let resource = resources::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query resource by ID")?;

        Ok(resource)
    }

    /// List resources newest first; search matches the file name.
    pub async fn list(
        &self,
        query: &ResourceListQuery,
    ) -> Result<(Vec<resources::Model>, u64)> {
        let mut select = resources::Entity::find().order_by_desc(resources::Column::CreatedAt);

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            select = select.filter(resources::Column::FileName.contains(search));
        }

        if let Some(directory) = query.directory {
            select = select.filter(resources::Column::Directory.eq(directory));
        }

        let paginator = select.paginate(&self.conn, query.page_size);
        let total = paginator
            .num_items()
            .await
            .context("Failed to count resources")?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .context("Failed to fetch resource page")?;

        Ok((items, total))
    }

    pub async fn create(&self, new: NewResource) -> Result<resources::Model> {
        let now = super::now_rfc3339();

        let active = resources::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            file_name: Set(new.file_name),
            file_path: Set(new.file_path),
            file_size: Set(new.file_size),
            mime_type: Set(new.mime_type),
            directory: Set(new.directory),
            uploaded_by: Set(new.uploaded_by.filter(|v| !v.is_empty())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create resource")?;

        Ok(model)
    }

    /// Apply the fields that are present; always refreshes `updated_at`.
    pub async fn update(
        &self,
        id: &str,
        directory: Option<Directory>,
        file_path: Option<String>,
    ) -> Result<resources::Model> {
        let resource = resources::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query resource for update")?
            .ok_or_else(|| anyhow::anyhow!("Resource not found: {id}"))?;

        let mut active: resources::ActiveModel = resource.into();

        if let Some(directory) = directory {
            active.directory = Set(directory);
        }
        if let Some(file_path) = file_path.filter(|v| !v.is_empty()) {
            active.file_path = Set(file_path);
        }

        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(model)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        resources::Entity::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete resource")?;
        Ok(())
    }
}
