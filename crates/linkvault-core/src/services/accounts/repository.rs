//! User repository
//!
//! Abstracts credential storage for testability using trait-based dependency injection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::is_unique_violation;
use crate::error::{Error, Result};
use crate::models::User;

pub(crate) const USERNAME_TAKEN: &str = "Username is already taken";
pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by (already normalized) username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Check if username exists
    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Create a new user; a taken username is `Conflict`
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Delete a user together with their share link and content; false if no such user
    async fn delete_user_cascade(&self, id: &str) -> Result<bool>;
}

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0 > 0)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        // A concurrent signup can slip past the existence check; the index decides
        match inserted {
            Err(e) if is_unique_violation(&e) => return Err(Error::conflict(USERNAME_TAKEN)),
            other => {
                other?;
            }
        }

        self.find_by_id(&user.id)
            .await?
            .ok_or_else(|| Error::internal("Failed to fetch created user"))
    }

    async fn delete_user_cascade(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM share_links WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM contents WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(deleted.rows_affected() > 0)
    }
}
