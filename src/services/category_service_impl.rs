//! `SeaORM` implementation of the `CategoryService` trait.

use async_trait::async_trait;

use crate::api::types::{CategoryDto, Page};
use crate::api::validation::is_valid_slug;
use crate::db::{CategoryChanges, CategoryListQuery, NewCategory, Store};
use crate::services::category_service::{CategoryError, CategoryService};

const SLUG_FORMAT_MESSAGE: &str = "Slug must contain only lowercase letters, numbers, and hyphens";

pub struct SeaOrmCategoryService {
    store: Store,
}

impl SeaOrmCategoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_slug_free(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<(), CategoryError> {
        if let Some(existing) = self.store.get_category_by_slug(slug).await?
            && exclude_id != Some(existing.id.as_str())
        {
            return Err(CategoryError::SlugTaken);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryService for SeaOrmCategoryService {
    async fn get_category(&self, id: &str) -> Result<CategoryDto, CategoryError> {
        let category = self
            .store
            .get_category_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)?;

        Ok(CategoryDto::from(category))
    }

    async fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> Result<Page<CategoryDto>, CategoryError> {
        let (categories, total) = self.store.list_categories(&query).await?;
        let items = categories.into_iter().map(CategoryDto::from).collect();

        Ok(Page::new(items, total, query.page, query.page_size))
    }

    async fn create_category(&self, new: NewCategory) -> Result<CategoryDto, CategoryError> {
        if new.name_zh.is_empty() || new.name_en.is_empty() || new.slug.is_empty() {
            return Err(CategoryError::Validation(
                "Name and slug are required".to_string(),
            ));
        }

        if !is_valid_slug(&new.slug) {
            return Err(CategoryError::Validation(SLUG_FORMAT_MESSAGE.to_string()));
        }

        self.ensure_slug_free(&new.slug, None).await?;

        let category = self.store.create_category(new).await?;

        Ok(CategoryDto::from(category))
    }

    async fn update_category(
        &self,
        id: &str,
        changes: CategoryChanges,
    ) -> Result<CategoryDto, CategoryError> {
        let provided_empty = [&changes.name_zh, &changes.name_en, &changes.slug]
            .iter()
            .any(|field| field.as_deref() == Some(""));

        if provided_empty {
            return Err(CategoryError::Validation(
                "Name and slug must not be empty".to_string(),
            ));
        }

        if self.store.get_category_by_id(id).await?.is_none() {
            return Err(CategoryError::NotFound);
        }

        if let Some(slug) = &changes.slug {
            if !is_valid_slug(slug) {
                return Err(CategoryError::Validation(SLUG_FORMAT_MESSAGE.to_string()));
            }
            self.ensure_slug_free(slug, Some(id)).await?;
        }

        let category = self.store.update_category(id, changes).await?;

        Ok(CategoryDto::from(category))
    }

    async fn delete_category(&self, id: &str) -> Result<(), CategoryError> {
        if self.store.get_category_by_id(id).await?.is_none() {
            return Err(CategoryError::NotFound);
        }

        self.store.delete_category(id).await?;

        Ok(())
    }
}
