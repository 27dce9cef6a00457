use serde::Serialize;

use crate::db::{ArticleWithCategory, User};
use crate::entities::resources::Directory;
use crate::entities::{article_categories, articles, resources};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Page of results as returned by every list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, page_size: u64) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total.div_ceil(page_size.max(1)),
        }
    }
}

/// User payload with the password hash stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Article payload. Category names are populated only by reads that join
/// the category table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: String,
    pub title_zh: String,
    pub title_en: String,
    pub content_zh: String,
    pub content_en: String,
    pub slug: String,
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name_zh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name_en: Option<String>,
    pub author_id: Option<String>,
    pub is_published: bool,
    pub published_at: Option<String>,
    pub meta_title_zh: Option<String>,
    pub meta_title_en: Option<String>,
    pub meta_description_zh: Option<String>,
    pub meta_description_en: Option<String>,
    pub meta_keywords_zh: Option<String>,
    pub meta_keywords_en: Option<String>,
    pub og_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<articles::Model> for ArticleDto {
    fn from(article: articles::Model) -> Self {
        Self {
            id: article.id,
            title_zh: article.title_zh,
            title_en: article.title_en,
            content_zh: article.content_zh,
            content_en: article.content_en,
            slug: article.slug,
            category_id: article.category_id,
            category_name_zh: None,
            category_name_en: None,
            author_id: article.author_id,
            is_published: article.is_published,
            published_at: article.published_at,
            meta_title_zh: article.meta_title_zh,
            meta_title_en: article.meta_title_en,
            meta_description_zh: article.meta_description_zh,
            meta_description_en: article.meta_description_en,
            meta_keywords_zh: article.meta_keywords_zh,
            meta_keywords_en: article.meta_keywords_en,
            og_image: article.og_image,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

impl From<ArticleWithCategory> for ArticleDto {
    fn from((article, category): ArticleWithCategory) -> Self {
        let mut dto = Self::from(article);
        if let Some(category) = category {
            dto.category_name_zh = Some(category.name_zh);
            dto.category_name_en = Some(category.name_en);
        }
        dto
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub description_zh: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<article_categories::Model> for CategoryDto {
    fn from(category: article_categories::Model) -> Self {
        Self {
            id: category.id,
            name_zh: category.name_zh,
            name_en: category.name_en,
            slug: category.slug,
            description_zh: category.description_zh,
            description_en: category.description_en,
            sort_order: category.sort_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub mime_type: String,
    pub directory: Directory,
    pub uploaded_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<resources::Model> for ResourceDto {
    fn from(resource: resources::Model) -> Self {
        Self {
            id: resource.id,
            file_name: resource.file_name,
            file_path: resource.file_path,
            file_size: resource.file_size,
            mime_type: resource.mime_type,
            directory: resource.directory,
            uploaded_by: resource.uploaded_by,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}
