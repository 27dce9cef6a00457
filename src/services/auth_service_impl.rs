//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::api::types::UserDto;
use crate::api::validation::is_valid_email;
use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, RegisteredUser};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<UserDto, AuthError> {
        let is_valid = self.store.verify_user_password(email, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Disabled accounts fail exactly like bad credentials.
        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserDto::from(user))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, AuthError> {
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }
        if !is_valid_email(email) {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }
        if password.len() < 6 {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let user = self
            .store
            .create_user(name, email, password, Some(&self.security))
            .await?;

        tracing::info!("Registered new user {}", user.email);

        Ok(RegisteredUser {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    async fn forgot_password(&self, email: &str) -> Result<Option<String>, AuthError> {
        if !is_valid_email(email) {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }

        // Unknown emails are not distinguishable from known ones at the
        // API surface; the caller answers the same either way.
        if self.store.get_user_by_email(email).await?.is_none() {
            return Ok(None);
        }

        let reset = self.store.issue_reset_token(email).await?;

        Ok(Some(reset.token))
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::Validation("Reset token is required".to_string()));
        }
        if new_password.len() < 6 {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        let reset = self
            .store
            .find_valid_reset_token(token)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let user = self
            .store
            .get_user_by_email(&reset.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.store
            .update_user_password(&user.id, new_password, Some(&self.security))
            .await?;

        // Tokens are single use.
        self.store.consume_reset_token(token).await?;

        tracing::info!("Password reset completed for {}", user.email);

        Ok(())
    }
}
