use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

/// User data returned from the repository (without the password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            image: model.image,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Filters for the paginated user listing. Date bounds accept `YYYY-MM-DD`
/// or full RFC 3339; unparseable values are skipped rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    /// List users, newest first, with free-text search over name and email
    /// plus status and creation-date filters.
    pub async fn list(&self, query: &UserListQuery) -> Result<(Vec<User>, u64)> {
        let mut select = users::Entity::find().order_by_desc(users::Column::CreatedAt);

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            select = select.filter(
                Condition::any()
                    .add(users::Column::Name.contains(search))
                    .add(users::Column::Email.contains(search)),
            );
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(users::Column::IsActive.eq(is_active));
        }

        if let Some(from) = query.date_from.as_deref().and_then(parse_date_from) {
            select = select.filter(users::Column::CreatedAt.gte(from));
        }

        if let Some(to) = query.date_to.as_deref().and_then(parse_date_to) {
            select = select.filter(users::Column::CreatedAt.lte(to));
        }

        let paginator = select.paginate(&self.conn, query.page_size);
        let total = paginator
            .num_items()
            .await
            .context("Failed to count users")?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .context("Failed to fetch user page")?;

        Ok((items.into_iter().map(User::from).collect(), total))
    }

    /// Create a user with a hashed password. New accounts always start
    /// active.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        config: Option<&SecurityConfig>,
    ) -> Result<User> {
        let password = password.to_string();
        let config = config.cloned();
        let password_hash =
            task::spawn_blocking(move || hash_password(&password, config.as_ref()))
                .await
                .context("Password hashing task panicked")??;

        let now = super::now_rfc3339();

        let active = users::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            image: Set(None),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create user")?;

        Ok(User::from(model))
    }

    /// Apply a partial update. Empty strings are treated as absent; a
    /// supplied password is re-hashed.
    pub async fn update(
        &self,
        id: &str,
        changes: UserChanges,
        config: Option<&SecurityConfig>,
    ) -> Result<User> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let mut active: users::ActiveModel = user.into();

        if let Some(name) = changes.name.filter(|v| !v.is_empty()) {
            active.name = Set(name);
        }

        if let Some(password) = changes.password.filter(|v| !v.is_empty()) {
            let config = config.cloned();
            let new_hash =
                task::spawn_blocking(move || hash_password(&password, config.as_ref()))
                    .await
                    .context("Password hashing task panicked")??;
            active.password_hash = Set(new_hash);
        }

        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(User::from(model))
    }

    /// Flip the active flag for a user
    pub async fn update_status(&self, id: &str, is_active: bool) -> Result<User> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user for status update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(super::now_rfc3339());
        let model = active.update(&self.conn).await?;

        Ok(User::from(model))
    }

    /// Update password for a user (hashes the new password)
    pub async fn update_password(
        &self,
        id: &str,
        new_password: &str,
        config: Option<&SecurityConfig>,
    ) -> Result<()> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user for password update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let password = new_password.to_string();
        let config = config.cloned();
        let new_hash = task::spawn_blocking(move || hash_password(&password, config.as_ref()))
            .await
            .context("Password hashing task panicked")??;

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(new_hash);
        active.updated_at = Set(super::now_rfc3339());
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        users::Entity::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;
        Ok(())
    }

    /// Verify a password against the account matching the email. Missing
    /// users and accounts without a stored password verify as false.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(false);
        };

        check_password(user.password_hash, password.to_string()).await
    }

    /// Verify a password for a user looked up by id (current-password check)
    pub async fn verify_password_by_id(&self, id: &str, password: &str) -> Result<bool> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(false);
        };

        check_password(user.password_hash, password.to_string()).await
    }
}

/// Note: this uses `spawn_blocking` because Argon2 verification is
/// CPU-intensive and would block the async runtime if run directly.
async fn check_password(password_hash: String, password: String) -> Result<bool> {
    if password_hash.is_empty() {
        return Ok(false);
    }

    let is_valid = task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        let argon2 = Argon2::default();
        Ok::<bool, anyhow::Error>(
            argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")??;

    Ok(is_valid)
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, default params are used.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None, // output length (use default)
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Lower bound for a created_at range filter. Date-only input means
/// midnight UTC; full RFC 3339 input keeps its exact instant.
fn parse_date_from(raw: &str) -> Option<String> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(
            date.and_time(chrono::NaiveTime::MIN)
                .and_utc()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        );
    }

    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| {
            dt.with_timezone(&chrono::Utc)
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        })
}

/// Upper bound for a created_at range filter, always widened to the end of
/// the named day (23:59:59.999).
fn parse_date_to(raw: &str) -> Option<String> {
    let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc).date_naive())
        })?;

    let end_of_day = chrono::NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;

    Some(
        date.and_time(end_of_day)
            .and_utc()
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    )
}
