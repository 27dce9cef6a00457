use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{article_categories, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub description_zh: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<String>,
}

/// Partial update. Names and the slug are applied only when non-empty; a
/// supplied empty description clears the column to NULL.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub description_zh: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<String>,
}

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<article_categories::Model>> {
        let category = ArticleCategories::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query category by ID")?;

        Ok(category)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<article_categories::Model>> {
        let category = ArticleCategories::find()
            .filter(article_categories::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query category by slug")?;

        Ok(category)
    }

    /// List categories newest first; search matches either name or the slug.
    pub async fn list(
        &self,
        query: &CategoryListQuery,
    ) -> Result<(Vec<article_categories::Model>, u64)> {
        let mut select =
            ArticleCategories::find().order_by_desc(article_categories::Column::CreatedAt);

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            select = select.filter(
                Condition::any()
                    .add(article_categories::Column::NameZh.contains(search))
                    .add(article_categories::Column::NameEn.contains(search))
                    .add(article_categories::Column::Slug.contains(search)),
            );
        }

        let paginator = select.paginate(&self.conn, query.page_size);
        let total = paginator
            .num_items()
            .await
            .context("Failed to count categories")?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .context("Failed to fetch category page")?;

        Ok((items, total))
    }

    pub async fn create(&self, new: NewCategory) -> Result<article_categories::Model> {
        let now = super::now_rfc3339();

        let active = article_categories::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name_zh: Set(new.name_zh),
            name_en: Set(new.name_en),
            slug: Set(new.slug),
            description_zh: Set(new.description_zh.filter(|v| !v.is_empty())),
            description_en: Set(new.description_en.filter(|v| !v.is_empty())),
            sort_order: Set(new
                .sort_order
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "0".to_string())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create category")?;

        Ok(model)
    }

    pub async fn update(
        &self,
        id: &str,
        changes: CategoryChanges,
    ) -> Result<article_categories::Model> {
        let category = ArticleCategories::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query category for update")?
            .ok_or_else(|| anyhow::anyhow!("Category not found: {id}"))?;

        let mut active: article_categories::ActiveModel = category.into();

        if let Some(v) = changes.name_zh.filter(|v| !v.is_empty()) {
            active.name_zh = Set(v);
        }
        if let Some(v) = changes.name_en.filter(|v| !v.is_empty()) {
            active.name_en = Set(v);
        }
        if let Some(v) = changes.slug.filter(|v| !v.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = changes.description_zh {
            active.description_zh = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.description_en {
            active.description_en = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.sort_order.filter(|v| !v.is_empty()) {
            active.sort_order = Set(v);
        }

        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(model)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        ArticleCategories::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete category")?;
        Ok(())
    }
}
