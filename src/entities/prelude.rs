pub use super::article_categories::Entity as ArticleCategories;
pub use super::articles::Entity as Articles;
pub use super::password_reset_tokens::Entity as PasswordResetTokens;
pub use super::resources::Entity as Resources;
pub use super::users::Entity as Users;
