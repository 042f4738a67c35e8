use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, User};

/// Data access for the `users` table.
///
/// The table carries a UNIQUE index on `email`; a violation surfaces
/// through `From<sqlx::Error>` as the duplicate-email conflict, which is
/// the authoritative signal even when two registrations race past the
/// service-level pre-check.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Persists a new account and returns its store-generated id.
    pub async fn insert(&self, new_user: NewUser) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, email, username, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        log::debug!("inserted user {} ({})", id, new_user.email);

        Ok(id)
    }
}
