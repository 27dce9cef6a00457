pub mod article_service;
pub mod article_service_impl;
pub use article_service::{ArticleError, ArticleService};
pub use article_service_impl::SeaOrmArticleService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, RegisteredUser};
pub use auth_service_impl::SeaOrmAuthService;

pub mod category_service;
pub mod category_service_impl;
pub use category_service::{CategoryError, CategoryService};
pub use category_service_impl::SeaOrmCategoryService;

pub mod resource_service;
pub mod resource_service_impl;
pub use resource_service::{ResourceError, ResourceService};
pub use resource_service_impl::SeaOrmResourceService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
