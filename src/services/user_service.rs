//! Domain service for user administration.
//!
//! Wraps repository access with existence, uniqueness, and
//! self-protection checks.

use thiserror::Error;

use crate::api::types::{Page, UserDto};
use crate::db::{UserChanges, UserListQuery};

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for user administration.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Gets a single user by id.
    async fn get_user(&self, id: &str) -> Result<UserDto, UserError>;

    /// Lists users matching the query, newest first.
    async fn list_users(&self, query: UserListQuery) -> Result<Page<UserDto>, UserError>;

    /// Creates a user with a hashed password. New accounts always start
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::AlreadyExists`] if the email is taken.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserDto, UserError>;

    /// Applies a partial update. The email cannot be changed.
    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<UserDto, UserError>;

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Forbidden`] when `acting_user_id` names the
    /// target account.
    async fn delete_user(&self, id: &str, acting_user_id: &str) -> Result<(), UserError>;

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Forbidden`] on an attempt to deactivate the
    /// acting account itself.
    async fn toggle_status(
        &self,
        id: &str,
        is_active: bool,
        acting_user_id: &str,
    ) -> Result<UserDto, UserError>;

    /// Sets a user's password without checking the old one.
    async fn set_password(&self, id: &str, password: &str) -> Result<(), UserError>;

    /// Changes the acting user's own password.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::IncorrectPassword`] if the current password
    /// does not verify.
    async fn change_own_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError>;

    /// Updates the acting user's own profile fields.
    async fn update_profile(
        &self,
        user_id: &str,
        name: Option<String>,
    ) -> Result<UserDto, UserError>;
}
