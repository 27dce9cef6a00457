//! `SeaORM` implementation of the `ArticleService` trait.

use async_trait::async_trait;

use crate::api::types::{ArticleDto, Page};
use crate::api::validation::is_valid_slug;
use crate::db::{ArticleChanges, ArticleListQuery, NewArticle, Store, now_rfc3339};
use crate::services::article_service::{ArticleError, ArticleService};

const SLUG_FORMAT_MESSAGE: &str = "Slug must contain only lowercase letters, numbers, and hyphens";

pub struct SeaOrmArticleService {
    store: Store,
}

impl SeaOrmArticleService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Rejects a slug that belongs to a different article. `exclude_id`
    /// lets an update keep its own slug.
    async fn ensure_slug_free(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<(), ArticleError> {
        if let Some((existing, _)) = self.store.get_article_by_slug(slug).await?
            && exclude_id != Some(existing.id.as_str())
        {
            return Err(ArticleError::SlugTaken);
        }

        Ok(())
    }
}

#[async_trait]
impl ArticleService for SeaOrmArticleService {
    async fn get_article(&self, id: &str) -> Result<ArticleDto, ArticleError> {
        let article = self
            .store
            .get_article_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        Ok(ArticleDto::from(article))
    }

    async fn get_article_by_slug(&self, slug: &str) -> Result<ArticleDto, ArticleError> {
        let article = self
            .store
            .get_article_by_slug(slug)
            .await?
            .ok_or(ArticleError::NotFound)?;

        Ok(ArticleDto::from(article))
    }

    async fn list_articles(
        &self,
        query: ArticleListQuery,
    ) -> Result<Page<ArticleDto>, ArticleError> {
        let (articles, total) = self.store.list_articles(&query).await?;
        let items = articles.into_iter().map(ArticleDto::from).collect();

        Ok(Page::new(items, total, query.page, query.page_size))
    }

    async fn create_article(&self, new: NewArticle) -> Result<ArticleDto, ArticleError> {
        if new.title_zh.is_empty()
            || new.title_en.is_empty()
            || new.content_zh.is_empty()
            || new.content_en.is_empty()
            || new.slug.is_empty()
        {
            return Err(ArticleError::Validation(
                "Title, content, and slug are required".to_string(),
            ));
        }

        if !is_valid_slug(&new.slug) {
            return Err(ArticleError::Validation(SLUG_FORMAT_MESSAGE.to_string()));
        }

        self.ensure_slug_free(&new.slug, None).await?;

        let article = self.store.create_article(new).await?;

        Ok(ArticleDto::from(article))
    }

    async fn update_article(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<ArticleDto, ArticleError> {
        let provided_empty = [
            &changes.title_zh,
            &changes.title_en,
            &changes.content_zh,
            &changes.content_en,
            &changes.slug,
        ]
        .iter()
        .any(|field| field.as_deref() == Some(""));

        if provided_empty {
            return Err(ArticleError::Validation(
                "Title, content, and slug must not be empty".to_string(),
            ));
        }

        if self.store.get_article_by_id(id).await?.is_none() {
            return Err(ArticleError::NotFound);
        }

        if let Some(slug) = &changes.slug {
            if !is_valid_slug(slug) {
                return Err(ArticleError::Validation(SLUG_FORMAT_MESSAGE.to_string()));
            }
            self.ensure_slug_free(slug, Some(id)).await?;
        }

        let article = self.store.update_article(id, changes).await?;

        Ok(ArticleDto::from(article))
    }

    async fn delete_article(&self, id: &str) -> Result<(), ArticleError> {
        if self.store.get_article_by_id(id).await?.is_none() {
            return Err(ArticleError::NotFound);
        }

        self.store.delete_article(id).await?;

        Ok(())
    }

    async fn toggle_publish(&self, id: &str) -> Result<ArticleDto, ArticleError> {
        let (article, _) = self
            .store
            .get_article_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        let publish = !article.is_published;
        let published_at = publish.then(now_rfc3339);

        // Flag and timestamp change in a single UPDATE.
        let updated = self
            .store
            .set_article_publish_state(id, publish, published_at)
            .await?;

        Ok(ArticleDto::from(updated))
    }
}
