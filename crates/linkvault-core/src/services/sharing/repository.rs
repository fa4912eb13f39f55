//! Share link repository

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::is_foreign_key_violation;
use crate::error::{Error, Result};
use crate::services::accounts::repository::USER_NOT_FOUND;
use crate::models::ShareLink;

/// Share link repository trait
#[async_trait]
pub trait ShareLinkRepository: Send + Sync {
    async fn find_by_owner(&self, owner: &str) -> Result<Option<ShareLink>>;

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShareLink>>;

    /// Insert `link` unless its owner already has one.
    ///
    /// Returns the owner's link afterwards and whether it is the one just inserted.
    async fn insert_if_absent(&self, link: &ShareLink) -> Result<(ShareLink, bool)>;

    async fn delete_by_owner(&self, owner: &str) -> Result<bool>;
}

/// SQLite implementation of ShareLinkRepository
#[derive(Clone)]
pub struct SqliteShareLinkRepository {
    pool: SqlitePool,
}

impl SqliteShareLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareLinkRepository for SqliteShareLinkRepository {
    async fn find_by_owner(&self, owner: &str) -> Result<Option<ShareLink>> {
        Ok(sqlx::query_as("SELECT * FROM share_links WHERE user_id = ?")
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShareLink>> {
        Ok(sqlx::query_as("SELECT * FROM share_links WHERE hash = ?")
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_if_absent(&self, link: &ShareLink) -> Result<(ShareLink, bool)> {
        // A hash collision with another owner still fails on UNIQUE(hash)
        let inserted = sqlx::query(
            r#"
            INSERT INTO share_links (id, hash, user_id, content_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(&link.id)
        .bind(&link.hash)
        .bind(&link.user_id)
        .bind(&link.content_id)
        .bind(link.created_at)
        .execute(&self.pool)
        .await;

        let inserted = match inserted {
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(Error::not_found(USER_NOT_FOUND));
            }
            other => other?.rows_affected() > 0,
        };

        let current = self
            .find_by_owner(&link.user_id)
            .await?
            .ok_or_else(|| Error::internal("Share link vanished right after insert"))?;

        Ok((current, inserted))
    }

    async fn delete_by_owner(&self, owner: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM share_links WHERE user_id = ?")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
