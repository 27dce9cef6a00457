//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::api::types::{Page, UserDto};
use crate::api::validation::is_valid_email;
use crate::config::SecurityConfig;
use crate::db::{Store, UserChanges, UserListQuery};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn get_user(&self, id: &str) -> Result<UserDto, UserError> {
        let user = self
            .store
            .get_user_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(UserDto::from(user))
    }

    async fn list_users(&self, query: UserListQuery) -> Result<Page<UserDto>, UserError> {
        let (users, total) = self.store.list_users(&query).await?;
        let items = users.into_iter().map(UserDto::from).collect();

        Ok(Page::new(items, total, query.page, query.page_size))
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserDto, UserError> {
        if name.is_empty() {
            return Err(UserError::Validation("Name is required".to_string()));
        }
        if !is_valid_email(email) {
            return Err(UserError::Validation("Invalid email address".to_string()));
        }
        if password.len() < 6 {
            return Err(UserError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        // Uniqueness check before the insert so the caller gets a 409
        // instead of a driver error.
        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(UserError::AlreadyExists);
        }

        let user = self
            .store
            .create_user(name, email, password, Some(&self.security))
            .await?;

        Ok(UserDto::from(user))
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<UserDto, UserError> {
        if let Some(name) = &changes.name
            && name.is_empty()
        {
            return Err(UserError::Validation("Name must not be empty".to_string()));
        }
        if let Some(password) = &changes.password
            && password.len() < 6
        {
            return Err(UserError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.store.get_user_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        let user = self
            .store
            .update_user(id, changes, Some(&self.security))
            .await?;

        Ok(UserDto::from(user))
    }

    async fn delete_user(&self, id: &str, acting_user_id: &str) -> Result<(), UserError> {
        // The self-guard runs before the existence check.
        if id == acting_user_id {
            return Err(UserError::Forbidden(
                "Cannot delete your own account".to_string(),
            ));
        }

        if self.store.get_user_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        self.store.delete_user(id).await?;

        Ok(())
    }

    async fn toggle_status(
        &self,
        id: &str,
        is_active: bool,
        acting_user_id: &str,
    ) -> Result<UserDto, UserError> {
        if id == acting_user_id && !is_active {
            return Err(UserError::Forbidden(
                "Cannot disable your own account".to_string(),
            ));
        }

        if self.store.get_user_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        let user = self.store.update_user_status(id, is_active).await?;

        Ok(UserDto::from(user))
    }

    async fn set_password(&self, id: &str, password: &str) -> Result<(), UserError> {
        if password.len() < 6 {
            return Err(UserError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.store.get_user_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        self.store
            .update_user_password(id, password, Some(&self.security))
            .await?;

        Ok(())
    }

    async fn change_own_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        if current_password.is_empty() {
            return Err(UserError::Validation(
                "Current password is required".to_string(),
            ));
        }
        if new_password.len() < 6 {
            return Err(UserError::Validation(
                "New password must be at least 6 characters".to_string(),
            ));
        }

        if self.store.get_user_by_id(user_id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        // Verify current password
        let is_valid = self
            .store
            .verify_user_password_by_id(user_id, current_password)
            .await?;

        if !is_valid {
            return Err(UserError::IncorrectPassword);
        }

        self.store
            .update_user_password(user_id, new_password, Some(&self.security))
            .await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        name: Option<String>,
    ) -> Result<UserDto, UserError> {
        if let Some(name) = &name
            && name.is_empty()
        {
            return Err(UserError::Validation("Name must not be empty".to_string()));
        }

        if self.store.get_user_by_id(user_id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        let changes = UserChanges {
            name,
            password: None,
        };

        let user = self
            .store
            .update_user(user_id, changes, Some(&self.security))
            .await?;

        Ok(UserDto::from(user))
    }
}
