use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{article_categories, articles, password_reset_tokens, resources};
use crate::entities::resources::Directory;

pub mod migrator;
pub mod repositories;

pub use repositories::article::{ArticleChanges, ArticleListQuery, ArticleWithCategory, NewArticle};
pub use repositories::category::{CategoryChanges, CategoryListQuery, NewCategory};
pub use repositories::resource::{NewResource, ResourceListQuery};
pub use repositories::user::{User, UserChanges, UserListQuery};
pub(crate) use repositories::now_rfc3339;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn article_repo(&self) -> repositories::article::ArticleRepository {
        repositories::article::ArticleRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn resource_repo(&self) -> repositories::resource::ResourceRepository {
        repositories::resource::ResourceRepository::new(self.conn.clone())
    }

    fn password_reset_repo(&self) -> repositories::password_reset::PasswordResetRepository {
        repositories::password_reset::PasswordResetRepository::new(self.conn.clone())
    }

    // ---- Users ----

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self, query: &UserListQuery) -> Result<(Vec<User>, u64)> {
        self.user_repo().list(query).await
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        config: Option<&SecurityConfig>,
    ) -> Result<User> {
        self.user_repo().create(name, email, password, config).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        changes: UserChanges,
        config: Option<&SecurityConfig>,
    ) -> Result<User> {
        self.user_repo().update(id, changes, config).await
    }

    pub async fn update_user_status(&self, id: &str, is_active: bool) -> Result<User> {
        self.user_repo().update_status(id, is_active).await
    }

    pub async fn update_user_password(
        &self,
        id: &str,
        new_password: &str,
        config: Option<&SecurityConfig>,
    ) -> Result<()> {
        self.user_repo()
            .update_password(id, new_password, config)
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.user_repo().delete(id).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn verify_user_password_by_id(&self, id: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password_by_id(id, password).await
    }

    // ---- Articles ----

    pub async fn get_article_by_id(&self, id: &str) -> Result<Option<ArticleWithCategory>> {
        self.article_repo().get_by_id(id).await
    }

    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Option<ArticleWithCategory>> {
        self.article_repo().get_by_slug(slug).await
    }

    pub async fn list_articles(
        &self,
        query: &ArticleListQuery,
    ) -> Result<(Vec<ArticleWithCategory>, u64)> {
        self.article_repo().list(query).await
    }

    pub async fn create_article(&self, new: NewArticle) -> Result<articles::Model> {
        self.article_repo().create(new).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<articles::Model> {
        self.article_repo().update(id, changes).await
    }

    pub async fn set_article_publish_state(
        &self,
        id: &str,
        is_published: bool,
        published_at: Option<String>,
    ) -> Result<articles::Model> {
        self.article_repo()
            .set_publish_state(id, is_published, published_at)
            .await
    }

    pub async fn delete_article(&self, id: &str) -> Result<()> {
        self.article_repo().delete(id).await
    }

    // ---- Categories ----

    pub async fn get_category_by_id(&self, id: &str) -> Result<Option<article_categories::Model>> {
        self.category_repo().get_by_id(id).await
    }

    pub async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<article_categories::Model>> {
        self.category_repo().get_by_slug(slug).await
    }

    pub async fn list_categories(
        &self,
        query: &CategoryListQuery,
    ) -> Result<(Vec<article_categories::Model>, u64)> {
        self.category_repo().list(query).await
    }

    pub async fn create_category(&self, new: NewCategory) -> Result<article_categories::Model> {
        self.category_repo().create(new).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        changes: CategoryChanges,
    ) -> Result<article_categories::Model> {
        self.category_repo().update(id, changes).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        self.category_repo().delete(id).await
    }

    // ---- Resources ----

    pub async fn get_resource_by_id(&self, id: &str) -> Result<Option<resources::Model>> {
        self.resource_repo().get_by_id(id).await
    }

    pub async fn list_resources(
        &self,
        query: &ResourceListQuery,
    ) -> Result<(Vec<resources::Model>, u64)> {
        self.resource_repo().list(query).await
    }

    pub async fn create_resource(&self, new: NewResource) -> Result<resources::Model> {
        self.resource_repo().create(new).await
    }

    pub async fn update_resource(
        &self,
        id: &str,
        directory: Option<Directory>,
        file_path: Option<String>,
    ) -> Result<resources::Model> {
        self.resource_repo().update(id, directory, file_path).await
    }

    pub async fn delete_resource(&self, id: &str) -> Result<()> {
        self.resource_repo().delete(id).await
    }

    // ---- Password reset tokens ----

    pub async fn issue_reset_token(&self, email: &str) -> Result<password_reset_tokens::Model> {
        self.password_reset_repo().issue(email).await
    }

    pub async fn find_valid_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<password_reset_tokens::Model>> {
        self.password_reset_repo().find_valid(token).await
    }

    pub async fn consume_reset_token(&self, token: &str) -> Result<()> {
        self.password_reset_repo().consume(token).await
    }
}
