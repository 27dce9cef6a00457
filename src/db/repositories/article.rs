use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{article_categories, articles, prelude::*};

/// Row with its category joined in, as returned by the list and lookup
/// queries.
pub type ArticleWithCategory = (articles::Model, Option<article_categories::Model>);

#[derive(Debug, Clone, Default)]
pub struct ArticleListQuery {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub is_published: Option<bool>,
}

/// Fields for a new article. `published_at` is never set at creation, even
/// when the article starts out published.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title_zh: String,
    pub title_en: String,
    pub content_zh: String,
    pub content_en: String,
    pub slug: String,
    pub category_id: Option<String>,
    pub author_id: Option<String>,
    pub is_published: bool,
    pub meta_title_zh: Option<String>,
    pub meta_title_en: Option<String>,
    pub meta_description_zh: Option<String>,
    pub meta_description_en: Option<String>,
    pub meta_keywords_zh: Option<String>,
    pub meta_keywords_en: Option<String>,
    pub og_image: Option<String>,
}

/// Partial update. Required text fields are applied only when non-empty;
/// for the nullable metadata fields a supplied empty string clears the
/// column to NULL.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
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

pub struct ArticleRepository {
    conn: DatabaseConnection,
}

impl ArticleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ArticleWithCategory>> {
        let article = Articles::find_by_id(id.to_string())
            .find_also_related(ArticleCategories)
            .one(&self.conn)
            .await
            .context("Failed to query article by ID")?;

        Ok(article)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ArticleWithCategory>> {
        let article = Articles::find()
            .filter(articles::Column::Slug.eq(slug))
            .find_also_related(ArticleCategories)
            .one(&self.conn)
            .await
            .context("Failed to query article by slug")?;

        Ok(article)
    }

    /// List articles newest first with their categories joined in. Search
    /// matches either title or the slug.
    pub async fn list(
        &self,
        query: &ArticleListQuery,
    ) -> Result<(Vec<ArticleWithCategory>, u64)> {
        let mut select = Articles::find()
            .find_also_related(ArticleCategories)
            .order_by_desc(articles::Column::CreatedAt);

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            select = select.filter(
                Condition::any()
                    .add(articles::Column::TitleZh.contains(search))
                    .add(articles::Column::TitleEn.contains(search))
                    .add(articles::Column::Slug.contains(search)),
            );
        }

        if let Some(category_id) = query.category_id.as_deref() {
            select = select.filter(articles::Column::CategoryId.eq(category_id));
        }

        if let Some(is_published) = query.is_published {
            select = select.filter(articles::Column::IsPublished.eq(is_published));
        }

        let paginator = select.paginate(&self.conn, query.page_size);
        let total = paginator
            .num_items()
            .await
            .context("Failed to count articles")?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .context("Failed to fetch article page")?;

        Ok((items, total))
    }

    pub async fn create(&self, new: NewArticle) -> Result<articles::Model> {
        let now = super::now_rfc3339();

        let active = articles::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title_zh: Set(new.title_zh),
            title_en: Set(new.title_en),
            content_zh: Set(new.content_zh),
            content_en: Set(new.content_en),
            slug: Set(new.slug),
            category_id: Set(new.category_id.filter(|v| !v.is_empty())),
            author_id: Set(new.author_id.filter(|v| !v.is_empty())),
            is_published: Set(new.is_published),
            published_at: Set(None),
            meta_title_zh: Set(new.meta_title_zh.filter(|v| !v.is_empty())),
            meta_title_en: Set(new.meta_title_en.filter(|v| !v.is_empty())),
            meta_description_zh: Set(new.meta_description_zh.filter(|v| !v.is_empty())),
            meta_description_en: Set(new.meta_description_en.filter(|v| !v.is_empty())),
            meta_keywords_zh: Set(new.meta_keywords_zh.filter(|v| !v.is_empty())),
            meta_keywords_en: Set(new.meta_keywords_en.filter(|v| !v.is_empty())),
            og_image: Set(new.og_image.filter(|v| !v.is_empty())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create article")?;

        Ok(model)
    }

    pub async fn update(&self, id: &str, changes: ArticleChanges) -> Result<articles::Model> {
        let article = Articles::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query article for update")?
            .ok_or_else(|| anyhow::anyhow!("Article not found: {id}"))?;

        let mut active: articles::ActiveModel = article.into();

        if let Some(v) = changes.title_zh.filter(|v| !v.is_empty()) {
            active.title_zh = Set(v);
        }
        if let Some(v) = changes.title_en.filter(|v| !v.is_empty()) {
            active.title_en = Set(v);
        }
        if let Some(v) = changes.content_zh.filter(|v| !v.is_empty()) {
            active.content_zh = Set(v);
        }
        if let Some(v) = changes.content_en.filter(|v| !v.is_empty()) {
            active.content_en = Set(v);
        }
        if let Some(v) = changes.slug.filter(|v| !v.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = changes.category_id {
            active.category_id = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.is_published {
            active.is_published = Set(v);
        }
        if let Some(v) = changes.meta_title_zh {
            active.meta_title_zh = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.meta_title_en {
            active.meta_title_en = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.meta_description_zh {
            active.meta_description_zh = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.meta_description_en {
            active.meta_description_en = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.meta_keywords_zh {
            active.meta_keywords_zh = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.meta_keywords_en {
            active.meta_keywords_en = Set(Some(v).filter(|v| !v.is_empty()));
        }
        if let Some(v) = changes.og_image {
            active.og_image = Set(Some(v).filter(|v| !v.is_empty()));
        }

        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(model)
    }

    /// Write the publish flag and its timestamp together in a single UPDATE.
    pub async fn set_publish_state(
        &self,
        id: &str,
        is_published: bool,
        published_at: Option<String>,
    ) -> Result<articles::Model> {
        let article = Articles::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query article for publish toggle")?
            .ok_or_else(|| anyhow::anyhow!("Article not found: {id}"))?;

        let mut active: articles::ActiveModel = article.into();
        active.is_published = Set(is_published);
        active.published_at = Set(published_at);
        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(model)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        Articles::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete article")?;
        Ok(())
    }
}
