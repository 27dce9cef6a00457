use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::password_reset_tokens;

pub struct PasswordResetRepository {
    conn: DatabaseConnection,
}

impl PasswordResetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Replace any existing tokens for this email with a fresh one valid
    /// for one hour. Delete-then-insert without a transaction; concurrent
    /// requests for the same email race last-write-wins.
    pub async fn issue(&self, email: &str) -> Result<password_reset_tokens::Model> {
        password_reset_tokens::Entity::delete_many()
            .filter(password_reset_tokens::Column::Email.eq(email))
            .exec(&self.conn)
            .await
            .context("Failed to delete existing reset tokens")?;

        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::hours(1);

        let active = password_reset_tokens::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            token: Set(generate_token()),
            expires: Set(expires.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            created_at: Set(now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create reset token")?;

        Ok(model)
    }

    /// Look up a token that has not expired yet.
    pub async fn find_valid(&self, token: &str) -> Result<Option<password_reset_tokens::Model>> {
        let now = super::now_rfc3339();

        let row = password_reset_tokens::Entity::find()
            .filter(password_reset_tokens::Column::Token.eq(token))
            .filter(password_reset_tokens::Column::Expires.gt(now))
            .one(&self.conn)
            .await
            .context("Failed to query reset token")?;

        Ok(row)
    }

    /// Remove a token after a successful reset (single use).
    pub async fn consume(&self, token: &str) -> Result<()> {
        password_reset_tokens::Entity::delete_many()
            .filter(password_reset_tokens::Column::Token.eq(token))
            .exec(&self.conn)
            .await
            .context("Failed to delete reset token")?;

        Ok(())
    }
}

/// Generate a random reset token (64 character hex string)
#[must_use]
pub fn generate_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
