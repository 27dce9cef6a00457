//! Domain service for authentication flows.
//!
//! Handles credentials login, self-registration, and the password-reset
//! token lifecycle.

use serde::Serialize;
use thiserror::Error;

use crate::api::types::UserDto;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Newly registered account summary.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the sanitized user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email, a
    /// wrong password, or a disabled account, without distinguishing
    /// between them.
    async fn login(&self, email: &str, password: &str) -> Result<UserDto, AuthError>;

    /// Creates a new account from a self-registration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyExists`] if the email is taken.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, AuthError>;

    /// Issues a reset token for the given email.
    ///
    /// Returns `None` for an unknown email so callers can answer
    /// identically whether or not the account exists.
    async fn forgot_password(&self, email: &str) -> Result<Option<String>, AuthError>;

    /// Consumes a reset token and sets a new password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidResetToken`] if the token is unknown
    /// or past its expiry.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;
}
