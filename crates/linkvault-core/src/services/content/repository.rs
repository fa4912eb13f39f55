//! Content repository
//!
//! Every query here filters on the owner column; there is no unscoped read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::is_foreign_key_violation;
use crate::error::{Error, Result};
use crate::services::accounts::repository::USER_NOT_FOUND;
use crate::models::{ContentItem, ContentRow};

/// Content repository trait
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn insert(&self, item: &ContentItem) -> Result<()>;

    /// All items owned by `owner`, oldest first
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>>;

    /// Owner's items whose title contains `needle` (case-sensitive)
    async fn search_by_title(&self, owner: &str, needle: &str) -> Result<Vec<ContentItem>>;

    /// Owner's items not marked non-public, newest first
    async fn list_public_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>>;

    /// Lookup by `(id, owner)`; another user's item is indistinguishable from a missing one
    async fn find_owned(&self, owner: &str, id: &str) -> Result<Option<ContentItem>>;

    async fn delete_owned(&self, owner: &str, id: &str) -> Result<bool>;

    async fn set_visibility(
        &self,
        owner: &str,
        id: &str,
        is_public: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;
}

/// SQLite implementation of ContentRepository
#[derive(Clone)]
pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn into_items(rows: Vec<ContentRow>) -> Vec<ContentItem> {
    rows.into_iter().map(ContentItem::from).collect()
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn insert(&self, item: &ContentItem) -> Result<()> {
        let tags = serde_json::to_string(&item.tags)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO contents (id, user_id, link, title, content_type, tags, is_public, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.user_id)
        .bind(&item.link)
        .bind(&item.title)
        .bind(item.content_type.as_str())
        .bind(&tags)
        .bind(item.is_public)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await;

        // A still-valid token can outlive its account
        match inserted {
            Err(e) if is_foreign_key_violation(&e) => Err(Error::not_found(USER_NOT_FOUND)),
            other => other.map(|_| ()).map_err(Error::from),
        }
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>> {
        let rows: Vec<ContentRow> = sqlx::query_as(
            "SELECT * FROM contents WHERE user_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_items(rows))
    }

    async fn search_by_title(&self, owner: &str, needle: &str) -> Result<Vec<ContentItem>> {
        // instr() is case-sensitive and treats '' as matching everything, unlike LIKE
        let rows: Vec<ContentRow> = sqlx::query_as(
            r#"
            SELECT * FROM contents
            WHERE user_id = ? AND instr(title, ?) > 0
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(owner)
        .bind(needle)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_items(rows))
    }

    async fn list_public_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>> {
        let rows: Vec<ContentRow> = sqlx::query_as(
            r#"
            SELECT * FROM contents
            WHERE user_id = ? AND is_public != 0
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_items(rows))
    }

    async fn find_owned(&self, owner: &str, id: &str) -> Result<Option<ContentItem>> {
        let row: Option<ContentRow> =
            sqlx::query_as("SELECT * FROM contents WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(ContentItem::from))
    }

    async fn delete_owned(&self, owner: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contents WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_visibility(
        &self,
        owner: &str,
        id: &str,
        is_public: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE contents SET is_public = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(is_public)
        .bind(updated_at)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
