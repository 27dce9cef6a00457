pub mod prelude;

pub mod article_categories;
pub mod articles;
pub mod password_reset_tokens;
pub mod resources;
pub mod users;
