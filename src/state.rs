use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ArticleService, AuthService, CategoryService, ResourceService, SeaOrmArticleService,
    SeaOrmAuthService, SeaOrmCategoryService, SeaOrmResourceService, SeaOrmUserService,
    UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub article_service: Arc<dyn ArticleService>,

    pub category_service: Arc<dyn CategoryService>,

    pub resource_service: Arc<dyn ResourceService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        // Services take what they need from the config before it moves
        // behind the lock.
        let security = config.security.clone();
        let public_dir = PathBuf::from(&config.storage.public_dir);
        let config_arc = Arc::new(RwLock::new(config));

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), security.clone()))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), security))
            as Arc<dyn UserService + Send + Sync + 'static>;

        let article_service = Arc::new(SeaOrmArticleService::new(store.clone()))
            as Arc<dyn ArticleService + Send + Sync + 'static>;

        let category_service = Arc::new(SeaOrmCategoryService::new(store.clone()))
            as Arc<dyn CategoryService + Send + Sync + 'static>;

        let resource_service = Arc::new(SeaOrmResourceService::new(store.clone(), public_dir))
            as Arc<dyn ResourceService + Send + Sync + 'static>;

        Ok(Self {
            config: config_arc,
            store,
            auth_service,
            user_service,
            article_service,
            category_service,
            resource_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
